use crate::domain::common::lenient::{decimal, null_as_default, parse_decimal, parse_whole, whole_number};
use crate::domain::common::{aggregate_id::non_blank, generate_id, AggregateId, AggregateRoot};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Food identifier, e.g. `"chicken_breast"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub String);

impl AggregateId for FoodId {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn from_string(s: &str) -> Result<Self, String> {
        non_blank(s).map(FoodId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

pub const DEFAULT_RATING: u32 = 4;
pub const DEFAULT_PRICE_RANGE: &str = "やや高価";

/// Price range choices offered by the edit form
pub const PRICE_RANGES: &[&str] = &["安価", "普通", "やや高価", "高価"];

pub(crate) fn default_rating() -> u32 {
    DEFAULT_RATING
}

pub(crate) fn default_price_range() -> String {
    DEFAULT_PRICE_RANGE.to_string()
}

fn price_range_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_price_range))
}

/// A vitamin or mineral line such as `{ "name": "ビタミンB6", "amount": "0.6mg" }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NutrientAmount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: String,
}

/// Food of the protein database. Persisted in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "decimal")]
    pub protein_per_100g: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub carbs_per_100g: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub fat_per_100g: f64,
    #[serde(default, deserialize_with = "whole_number")]
    pub calories_per_100g: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serving_size: String,
    #[serde(default, deserialize_with = "decimal")]
    pub protein_per_serving: f64,

    /// 1..=5 stars
    #[serde(default = "default_rating", deserialize_with = "whole_number")]
    pub rating: u32,
    #[serde(default = "default_price_range", deserialize_with = "price_range_or_default")]
    pub price_range: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub vitamins: Vec<NutrientAmount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minerals: Vec<NutrientAmount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cooking_tips: Vec<String>,
}

impl Food {
    pub fn from_dto(dto: &FoodDto) -> Self {
        let id = dto
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generate_id(Self::id_prefix()));

        let rating = match parse_whole(&dto.rating) {
            0 => DEFAULT_RATING,
            r => r.min(5),
        };
        let price_range = if dto.price_range.trim().is_empty() {
            default_price_range()
        } else {
            dto.price_range.trim().to_string()
        };

        Self {
            id: FoodId(id),
            name: dto.name.trim().to_string(),
            category: dto.category.trim().to_string(),
            description: dto.description.trim().to_string(),
            protein_per_100g: parse_decimal(&dto.protein_per_100g),
            carbs_per_100g: parse_decimal(&dto.carbs_per_100g),
            fat_per_100g: parse_decimal(&dto.fat_per_100g),
            calories_per_100g: parse_whole(&dto.calories_per_100g),
            serving_size: dto.serving_size.trim().to_string(),
            protein_per_serving: parse_decimal(&dto.protein_per_serving),
            rating,
            price_range,
            vitamins: clean_amounts(&dto.vitamins),
            minerals: clean_amounts(&dto.minerals),
            benefits: lines(&dto.benefits),
            cooking_tips: lines(&dto.cooking_tips),
        }
    }

    pub fn to_dto(&self) -> FoodDto {
        FoodDto {
            id: Some(self.id.as_string()),
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            protein_per_100g: self.protein_per_100g.to_string(),
            carbs_per_100g: self.carbs_per_100g.to_string(),
            fat_per_100g: self.fat_per_100g.to_string(),
            calories_per_100g: self.calories_per_100g.to_string(),
            serving_size: self.serving_size.clone(),
            protein_per_serving: self.protein_per_serving.to_string(),
            rating: self.rating.to_string(),
            price_range: self.price_range.clone(),
            vitamins: self.vitamins.clone(),
            minerals: self.minerals.clone(),
            benefits: self.benefits.join("\n"),
            cooking_tips: self.cooking_tips.join("\n"),
        }
    }

    /// Star string for list cells
    pub fn stars(&self) -> String {
        "⭐".repeat(self.rating.min(5) as usize)
    }
}

fn clean_amounts(items: &[NutrientAmount]) -> Vec<NutrientAmount> {
    items
        .iter()
        .filter(|n| !n.name.trim().is_empty())
        .map(|n| NutrientAmount {
            name: n.name.trim().to_string(),
            amount: n.amount.trim().to_string(),
        })
        .collect()
}

fn lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

impl AggregateRoot for Food {
    type Id = FoodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.0.trim().is_empty() {
            return Err("ID が空です".into());
        }
        if self.name.trim().is_empty() {
            return Err("食材名を入力してください".into());
        }
        if !(1..=5).contains(&self.rating) {
            return Err("評価は1〜5で入力してください".into());
        }
        Ok(())
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "foods"
    }

    fn id_prefix() -> &'static str {
        "item"
    }

    fn element_name() -> &'static str {
        "食材"
    }

    fn list_name() -> &'static str {
        "食材一覧"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Edit form of a food; numbers hold raw input, benefits and tips one per line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodDto {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub protein_per_100g: String,
    pub carbs_per_100g: String,
    pub fat_per_100g: String,
    pub calories_per_100g: String,
    pub serving_size: String,
    pub protein_per_serving: String,
    pub rating: String,
    pub price_range: String,
    pub vitamins: Vec<NutrientAmount>,
    pub minerals: Vec<NutrientAmount>,
    pub benefits: String,
    pub cooking_tips: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FoodDto {
        FoodDto {
            name: "鶏むね肉".into(),
            category: "肉類".into(),
            protein_per_100g: "23.3".into(),
            calories_per_100g: "108.6".into(),
            protein_per_serving: "28".into(),
            vitamins: vec![
                NutrientAmount { name: " ナイアシン ".into(), amount: "11.8mg".into() },
                NutrientAmount { name: "".into(), amount: "1mg".into() },
            ],
            benefits: "高タンパク\n\n低脂質 ".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let f = Food::from_dto(&form());
        assert!(f.id.0.starts_with("item_"));
        assert_eq!(f.rating, DEFAULT_RATING);
        assert_eq!(f.price_range, DEFAULT_PRICE_RANGE);
        assert_eq!(f.calories_per_100g, 109);
        assert_eq!(f.vitamins.len(), 1);
        assert_eq!(f.vitamins[0].name, "ナイアシン");
        assert_eq!(f.benefits, vec!["高タンパク", "低脂質"]);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_rating_is_capped() {
        let mut d = form();
        d.rating = "9".into();
        assert_eq!(Food::from_dto(&d).rating, 5);
    }

    #[test]
    fn test_camel_case_shape() {
        let f = Food::from_dto(&form());
        let json = serde_json::to_value(&f).unwrap();
        assert!(json.get("proteinPer100g").is_some());
        assert!(json.get("proteinPerServing").is_some());
        assert!(json.get("cookingTips").is_some());
        assert!(json.get("protein_per_100g").is_none());
    }

    #[test]
    fn test_to_dto_round_trip_keeps_id() {
        let mut d = form();
        d.id = Some("chicken_breast".into());
        let f = Food::from_dto(&d);
        let again = Food::from_dto(&f.to_dto());
        assert_eq!(again, f);
    }

    #[test]
    fn test_stars() {
        let f = Food::from_dto(&form());
        assert_eq!(f.stars().chars().count(), 4);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let f: Food = serde_json::from_str(
            r#"{"id":"egg","name":"卵","servingSize":null,"priceRange":null,"vitamins":null,"benefits":null,
                "minerals":[{"name":"鉄","amount":null}]}"#,
        )
        .unwrap();
        assert_eq!(f.serving_size, "");
        assert_eq!(f.price_range, DEFAULT_PRICE_RANGE);
        assert!(f.vitamins.is_empty());
        assert!(f.benefits.is_empty());
        assert_eq!(f.minerals[0].amount, "");
    }
}

use super::nutrition::{MicroNutrients, Nutrition, MICRO_FIELDS};
use crate::domain::a001_restaurant::RestaurantId;
use crate::domain::common::lenient::{
    flag_or_true, list_or_csv, null_as_default, parse_decimal, parse_optional_decimal, parse_whole, split_csv,
    whole_number,
};
use crate::domain::common::{aggregate_id::non_blank, generate_id, AggregateId, AggregateRoot, ImageSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// ID Type
// ============================================================================

/// Menu item identifier, e.g. `"yoshinoya_gyudon_regular"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub String);

impl AggregateId for MenuId {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn from_string(s: &str) -> Result<Self, String> {
        non_blank(s).map(MenuId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

fn default_true() -> bool {
    true
}

/// Menu item of a restaurant chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub restaurant_id: RestaurantId,
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Yen
    #[serde(default, deserialize_with = "whole_number")]
    pub price: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(default)]
    pub image: ImageSource,

    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrition: Nutrition,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_vegetarian: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_vegan: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_gluten_free: bool,
    #[serde(default, deserialize_with = "list_or_csv")]
    pub allergens: Vec<String>,

    #[serde(default = "default_true", deserialize_with = "flag_or_true")]
    pub available: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seasonal: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Menu {
    /// Build a record from the edit form.
    ///
    /// Creates get a generated id and `added_date = now`; edits carry the
    /// original `added_date` through the form. `last_updated` is always `now`.
    pub fn from_dto(dto: &MenuDto, now: &str) -> Self {
        let id = dto
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generate_id(Self::id_prefix()));

        let mut micro = MicroNutrients::default();
        for (key, raw) in &dto.micro {
            micro.set(key, parse_optional_decimal(raw));
        }

        Self {
            id: MenuId(id),
            restaurant_id: RestaurantId(dto.restaurant_id.trim().to_string()),
            name: dto.name.trim().to_string(),
            category: dto.category.trim().to_string(),
            description: dto.description.trim().to_string(),
            price: parse_whole(&dto.price),
            size: dto.size.trim().to_string(),
            image: ImageSource::resolve(&dto.image_url, dto.image_upload.clone()),
            nutrition: Nutrition {
                calories: parse_whole(&dto.calories),
                protein: parse_decimal(&dto.protein),
                carbs: parse_decimal(&dto.carbs),
                fat: parse_decimal(&dto.fat),
                fiber: parse_decimal(&dto.fiber),
                sodium: parse_whole(&dto.sodium),
                micro,
            },
            is_vegetarian: dto.is_vegetarian,
            is_vegan: dto.is_vegan,
            is_gluten_free: dto.is_gluten_free,
            allergens: split_csv(&dto.allergens),
            available: dto.available,
            seasonal: dto.seasonal,
            added_date: Some(dto.added_date.clone().unwrap_or_else(|| now.to_string())),
            last_updated: Some(now.to_string()),
        }
    }

    pub fn to_dto(&self) -> MenuDto {
        let n = &self.nutrition;
        let micro = MICRO_FIELDS
            .iter()
            .filter_map(|(key, _, _)| n.micro.get(key).map(|v| (key.to_string(), v.to_string())))
            .collect();

        MenuDto {
            id: Some(self.id.as_string()),
            restaurant_id: self.restaurant_id.as_string(),
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            price: self.price.to_string(),
            size: self.size.clone(),
            image_url: self.image.url_field(),
            image_upload: match &self.image {
                ImageSource::Inline(data) => Some(data.clone()),
                _ => None,
            },
            calories: n.calories.to_string(),
            protein: n.protein.to_string(),
            carbs: n.carbs.to_string(),
            fat: n.fat.to_string(),
            fiber: n.fiber.to_string(),
            sodium: n.sodium.to_string(),
            micro,
            allergens: self.allergens.join(","),
            is_vegetarian: self.is_vegetarian,
            is_vegan: self.is_vegan,
            is_gluten_free: self.is_gluten_free,
            available: self.available,
            seasonal: self.seasonal,
            added_date: self.added_date.clone(),
        }
    }

    /// Timestamp used for the "recently updated" sort
    pub fn updated_key(&self) -> Option<&str> {
        self.last_updated.as_deref().or(self.added_date.as_deref())
    }
}

impl AggregateRoot for Menu {
    type Id = MenuId;

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
            return Err("メニュー名を入力してください".into());
        }
        if self.restaurant_id.0.trim().is_empty() {
            return Err("レストランを選択してください".into());
        }
        Ok(())
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "menus"
    }

    fn id_prefix() -> &'static str {
        "menu"
    }

    fn element_name() -> &'static str {
        "メニュー"
    }

    fn list_name() -> &'static str {
        "メニュー一覧"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Edit form of a menu item; numeric fields hold the raw input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDto {
    pub id: Option<String>,
    pub restaurant_id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub size: String,
    pub image_url: String,
    pub image_upload: Option<String>,

    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub fiber: String,
    pub sodium: String,
    /// Extended nutrients by key, see [`MICRO_FIELDS`]
    pub micro: BTreeMap<String, String>,

    /// Comma separated
    pub allergens: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub available: bool,
    pub seasonal: bool,

    /// Carried unchanged through an edit
    pub added_date: Option<String>,
}

impl Default for MenuDto {
    fn default() -> Self {
        Self {
            id: None,
            restaurant_id: String::new(),
            name: String::new(),
            category: String::new(),
            description: String::new(),
            price: String::new(),
            size: String::new(),
            image_url: String::new(),
            image_upload: None,
            calories: String::new(),
            protein: String::new(),
            carbs: String::new(),
            fat: String::new(),
            fiber: String::new(),
            sodium: String::new(),
            micro: BTreeMap::new(),
            allergens: String::new(),
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            available: true,
            seasonal: false,
            added_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger_form() -> MenuDto {
        MenuDto {
            restaurant_id: "restaurant_1".into(),
            name: "Burger".into(),
            price: "500".into(),
            calories: "650".into(),
            protein: "25".into(),
            allergens: "小麦, 乳".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_from_form() {
        let m = Menu::from_dto(&burger_form(), "2024-05-01T00:00:00.000Z");
        assert!(m.id.0.starts_with("menu_"));
        assert_eq!(m.price, 500);
        assert_eq!(m.nutrition.calories, 650);
        assert_eq!(m.nutrition.protein, 25.0);
        assert_eq!(m.allergens, vec!["小麦", "乳"]);
        assert!(m.available);
        assert_eq!(m.added_date, m.last_updated);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_edit_preserves_added_date() {
        let created = Menu::from_dto(&burger_form(), "2024-01-01");
        let mut form = created.to_dto();
        form.name = "Double Burger".into();
        let edited = Menu::from_dto(&form, "2024-06-01T12:00:00.000Z");
        assert_eq!(edited.id, created.id);
        assert_eq!(edited.added_date.as_deref(), Some("2024-01-01"));
        assert_eq!(edited.last_updated.as_deref(), Some("2024-06-01T12:00:00.000Z"));
    }

    #[test]
    fn test_micro_nutrients_from_form() {
        let mut form = burger_form();
        form.micro.insert("calcium".into(), "120".into());
        form.micro.insert("iron".into(), "  ".into());
        let m = Menu::from_dto(&form, "now");
        assert_eq!(m.nutrition.micro.calcium, Some(120.0));
        assert_eq!(m.nutrition.micro.iron, None);
        assert_eq!(m.to_dto().micro.get("calcium").map(String::as_str), Some("120"));
    }

    #[test]
    fn test_missing_restaurant_is_invalid() {
        let mut form = burger_form();
        form.restaurant_id = " ".into();
        assert!(Menu::from_dto(&form, "now").validate().is_err());
    }

    #[test]
    fn test_baseline_menu_defaults() {
        let m: Menu = serde_json::from_str(
            r#"{"id":"yoshinoya_gyudon_regular","restaurant_id":"yoshinoya","name":"牛丼（並盛）","price":426,
                "nutrition":{"calories":633,"protein":19.6,"carbs":88.2,"fat":23.6,"fiber":0,"sodium":2500},
                "added_date":"2024-01-01"}"#,
        )
        .unwrap();
        assert!(m.available);
        assert!(!m.is_vegan);
        assert_eq!(m.updated_key(), Some("2024-01-01"));
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let m: Menu = serde_json::from_str(
            r#"{"id":"m1","restaurant_id":"mine","name":"x","description":null,"nutrition":null,
                "is_vegan":null,"is_gluten_free":null,"available":null,"seasonal":null,"allergens":null,"image":null}"#,
        )
        .unwrap();
        assert!(!m.is_vegan);
        assert!(m.available);
        assert_eq!(m.nutrition, Nutrition::default());
        assert!(m.allergens.is_empty());
        assert_eq!(m.description, "");
    }
}

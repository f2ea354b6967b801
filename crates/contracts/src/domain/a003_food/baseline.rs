//! Shipped food baseline and its conversion into the persisted shape.
//!
//! The static JSON files use snake_case keys (`protein_per_100g`), while the
//! console stores camelCase records. Conversion is one-to-one with defaults
//! for anything missing.

use super::aggregate::{default_price_range, Food, FoodId, NutrientAmount, DEFAULT_RATING};
use crate::domain::common::lenient::{decimal, whole_number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Food record as written in the shipped JSON
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BaselineFood {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "decimal")]
    pub protein_per_100g: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub carbs_per_100g: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub fat_per_100g: f64,
    #[serde(default, deserialize_with = "whole_number")]
    pub calories_per_100g: u32,
    #[serde(default)]
    pub serving_size: String,
    #[serde(default, deserialize_with = "decimal")]
    pub protein_per_serving: f64,
    #[serde(default, deserialize_with = "whole_number")]
    pub rating: u32,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub vitamins: Vec<NutrientAmount>,
    #[serde(default)]
    pub minerals: Vec<NutrientAmount>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub cooking_tips: Vec<String>,
}

impl From<BaselineFood> for Food {
    fn from(b: BaselineFood) -> Self {
        Food {
            id: FoodId(b.id),
            name: b.name,
            category: b.category,
            description: b.description,
            protein_per_100g: b.protein_per_100g,
            carbs_per_100g: b.carbs_per_100g,
            fat_per_100g: b.fat_per_100g,
            calories_per_100g: b.calories_per_100g,
            serving_size: b.serving_size,
            protein_per_serving: b.protein_per_serving,
            rating: if b.rating == 0 { DEFAULT_RATING } else { b.rating },
            price_range: if b.price_range.trim().is_empty() {
                default_price_range()
            } else {
                b.price_range
            },
            vitamins: b.vitamins,
            minerals: b.minerals,
            benefits: b.benefits,
            cooking_tips: b.cooking_tips,
        }
    }
}

/// Accepted layouts of a food baseline file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BaselineDocument {
    /// `{ "recommended_foods": [ ... ] }`
    Recommended { recommended_foods: Vec<BaselineFood> },
    /// `[ ... ]`
    Flat(Vec<BaselineFood>),
    /// `{ "肉類": [ ... ], "魚介類": [ ... ] }`, the key fills a blank category
    Grouped(BTreeMap<String, Vec<BaselineFood>>),
}

impl BaselineDocument {
    pub fn into_foods(self) -> Vec<Food> {
        match self {
            BaselineDocument::Recommended { recommended_foods } => {
                recommended_foods.into_iter().map(Food::from).collect()
            }
            BaselineDocument::Flat(items) => items.into_iter().map(Food::from).collect(),
            BaselineDocument::Grouped(groups) => groups
                .into_iter()
                .flat_map(|(group, items)| {
                    items.into_iter().map(move |mut b| {
                        if b.category.trim().is_empty() {
                            b.category = group.clone();
                        }
                        Food::from(b)
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_baseline_converts_with_defaults() {
        let doc: BaselineDocument = serde_json::from_str(
            r#"{"recommended_foods":[{"id":"chicken_breast","name":"鶏むね肉","category":"肉類",
                "protein_per_100g":23.3,"serving_size":"100g","protein_per_serving":23.3,
                "cooking_tips":["低温調理"]}]}"#,
        )
        .unwrap();
        let foods = doc.into_foods();
        assert_eq!(foods.len(), 1);
        let f = &foods[0];
        assert_eq!(f.id.0, "chicken_breast");
        assert_eq!(f.protein_per_100g, 23.3);
        assert_eq!(f.carbs_per_100g, 0.0);
        assert_eq!(f.rating, 4);
        assert_eq!(f.price_range, "やや高価");
        assert_eq!(f.cooking_tips, vec!["低温調理"]);
        assert!(f.vitamins.is_empty());
    }

    #[test]
    fn test_explicit_rating_is_kept() {
        let b = BaselineFood { id: "x".into(), rating: 5, price_range: "安価".into(), ..Default::default() };
        let f = Food::from(b);
        assert_eq!(f.rating, 5);
        assert_eq!(f.price_range, "安価");
    }

    #[test]
    fn test_grouped_layout_fills_category() {
        let doc: BaselineDocument = serde_json::from_str(
            r#"{"meat":[{"id":"chicken_breast","protein_per_serving":28}],"fish":[{"id":"canned_tuna","category":"魚介類"}]}"#,
        )
        .unwrap();
        let foods = doc.into_foods();
        assert_eq!(foods.len(), 2);
        let tuna = foods.iter().find(|f| f.id.0 == "canned_tuna").unwrap();
        assert_eq!(tuna.category, "魚介類");
        let chicken = foods.iter().find(|f| f.id.0 == "chicken_breast").unwrap();
        assert_eq!(chicken.category, "meat");
        assert_eq!(chicken.protein_per_serving, 28.0);
    }

    #[test]
    fn test_flat_layout() {
        let doc: BaselineDocument = serde_json::from_str(r#"[{"id":"tofu","name":"木綿豆腐"}]"#).unwrap();
        assert_eq!(doc.into_foods()[0].name, "木綿豆腐");
    }
}

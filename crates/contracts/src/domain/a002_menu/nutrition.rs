use crate::domain::common::lenient::{decimal, optional_decimal, whole_number};
use serde::{Deserialize, Serialize};

/// Nutrition facts of one menu item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    /// kcal
    #[serde(default, deserialize_with = "whole_number")]
    pub calories: u32,
    /// g
    #[serde(default, deserialize_with = "decimal")]
    pub protein: f64,
    /// g
    #[serde(default, deserialize_with = "decimal")]
    pub carbs: f64,
    /// g
    #[serde(default, deserialize_with = "decimal")]
    pub fat: f64,
    /// g
    #[serde(default, deserialize_with = "decimal")]
    pub fiber: f64,
    /// mg
    #[serde(default, deserialize_with = "whole_number")]
    pub sodium: u32,

    #[serde(flatten)]
    pub micro: MicroNutrients,
}

/// Optional extended nutrients; absent values are not written back
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MicroNutrients {
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_d: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_e: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_k: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub thiamin: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub riboflavin: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub niacin: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_b6: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub folate: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub vitamin_b12: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub magnesium: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub zinc: Option<f64>,
    #[serde(default, deserialize_with = "optional_decimal", skip_serializing_if = "Option::is_none")]
    pub selenium: Option<f64>,
}

/// Form key, label and unit of every extended nutrient, in display order
pub const MICRO_FIELDS: &[(&str, &str, &str)] = &[
    ("sugar", "糖質", "g"),
    ("saturated_fat", "飽和脂肪酸", "g"),
    ("trans_fat", "トランス脂肪酸", "g"),
    ("cholesterol", "コレステロール", "mg"),
    ("calcium", "カルシウム", "mg"),
    ("iron", "鉄", "mg"),
    ("potassium", "カリウム", "mg"),
    ("vitamin_a", "ビタミンA", "μg"),
    ("vitamin_c", "ビタミンC", "mg"),
    ("vitamin_d", "ビタミンD", "μg"),
    ("vitamin_e", "ビタミンE", "mg"),
    ("vitamin_k", "ビタミンK", "μg"),
    ("thiamin", "ビタミンB1", "mg"),
    ("riboflavin", "ビタミンB2", "mg"),
    ("niacin", "ナイアシン", "mg"),
    ("vitamin_b6", "ビタミンB6", "mg"),
    ("folate", "葉酸", "μg"),
    ("vitamin_b12", "ビタミンB12", "μg"),
    ("phosphorus", "リン", "mg"),
    ("magnesium", "マグネシウム", "mg"),
    ("zinc", "亜鉛", "mg"),
    ("selenium", "セレン", "μg"),
];

impl MicroNutrients {
    fn slot(&mut self, key: &str) -> Option<&mut Option<f64>> {
        Some(match key {
            "sugar" => &mut self.sugar,
            "saturated_fat" => &mut self.saturated_fat,
            "trans_fat" => &mut self.trans_fat,
            "cholesterol" => &mut self.cholesterol,
            "calcium" => &mut self.calcium,
            "iron" => &mut self.iron,
            "potassium" => &mut self.potassium,
            "vitamin_a" => &mut self.vitamin_a,
            "vitamin_c" => &mut self.vitamin_c,
            "vitamin_d" => &mut self.vitamin_d,
            "vitamin_e" => &mut self.vitamin_e,
            "vitamin_k" => &mut self.vitamin_k,
            "thiamin" => &mut self.thiamin,
            "riboflavin" => &mut self.riboflavin,
            "niacin" => &mut self.niacin,
            "vitamin_b6" => &mut self.vitamin_b6,
            "folate" => &mut self.folate,
            "vitamin_b12" => &mut self.vitamin_b12,
            "phosphorus" => &mut self.phosphorus,
            "magnesium" => &mut self.magnesium,
            "zinc" => &mut self.zinc,
            "selenium" => &mut self.selenium,
            _ => return None,
        })
    }

    /// Value by form key; unknown keys read as `None`
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "sugar" => self.sugar,
            "saturated_fat" => self.saturated_fat,
            "trans_fat" => self.trans_fat,
            "cholesterol" => self.cholesterol,
            "calcium" => self.calcium,
            "iron" => self.iron,
            "potassium" => self.potassium,
            "vitamin_a" => self.vitamin_a,
            "vitamin_c" => self.vitamin_c,
            "vitamin_d" => self.vitamin_d,
            "vitamin_e" => self.vitamin_e,
            "vitamin_k" => self.vitamin_k,
            "thiamin" => self.thiamin,
            "riboflavin" => self.riboflavin,
            "niacin" => self.niacin,
            "vitamin_b6" => self.vitamin_b6,
            "folate" => self.folate,
            "vitamin_b12" => self.vitamin_b12,
            "phosphorus" => self.phosphorus,
            "magnesium" => self.magnesium,
            "zinc" => self.zinc,
            "selenium" => self.selenium,
            _ => None,
        }
    }

    /// Set by form key, returns false for unknown keys
    pub fn set(&mut self, key: &str, value: Option<f64>) -> bool {
        match self.slot(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Present values with their labels, in display order
    pub fn present(&self) -> Vec<(&'static str, &'static str, &'static str, f64)> {
        MICRO_FIELDS
            .iter()
            .filter_map(|(key, label, unit)| self.get(key).map(|v| (*key, *label, *unit, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_micro_fields_flatten_into_nutrition() {
        let n: Nutrition = serde_json::from_str(
            r#"{"calories":376,"protein":17.6,"carbs":41.5,"fat":15.6,"fiber":5.0,"sodium":2200,"calcium":60,"vitamin_c":12.5}"#,
        )
        .unwrap();
        assert_eq!(n.calories, 376);
        assert_eq!(n.micro.calcium, Some(60.0));
        assert_eq!(n.micro.vitamin_c, Some(12.5));
        assert_eq!(n.micro.zinc, None);

        let back = serde_json::to_value(&n).unwrap();
        assert!(back.get("zinc").is_none());
        assert_eq!(back["calcium"], 60.0);
    }

    #[test]
    fn test_get_set_by_key() {
        let mut m = MicroNutrients::default();
        assert!(m.set("iron", Some(2.1)));
        assert!(!m.set("unobtainium", Some(1.0)));
        assert_eq!(m.get("iron"), Some(2.1));
        assert_eq!(m.present().len(), 1);
    }

    #[test]
    fn test_every_listed_key_is_settable() {
        let mut m = MicroNutrients::default();
        for (key, _, _) in MICRO_FIELDS {
            assert!(m.set(key, Some(1.0)), "{key}");
        }
        assert_eq!(m.present().len(), MICRO_FIELDS.len());
    }
}

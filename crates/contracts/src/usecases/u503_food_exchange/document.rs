use crate::domain::a003_food::Food;
use crate::domain::a004_food_category::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("JSON の形式が正しくありません: {0}")]
    InvalidJson(String),
    #[error("foods または categories の配列が含まれていません")]
    NothingToImport,
    #[error("{field} を読み込めません: {reason}")]
    InvalidArray { field: &'static str, reason: String },
}

/// Downloadable backup of the food domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub foods: Vec<Food>,
    pub categories: Vec<Category>,
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
}

impl ExportDocument {
    pub fn new(foods: &[Food], categories: &[Category], exported_at: &str) -> Self {
        Self {
            foods: foods.to_vec(),
            categories: categories.to_vec(),
            exported_at: exported_at.to_string(),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `protein-tracker-data-YYYY-MM-DD.json`
pub fn export_filename(date: &str) -> String {
    format!("protein-tracker-data-{}.json", date)
}

/// Collections found in an import file. `None` leaves that collection as is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedData {
    pub foods: Option<Vec<Food>>,
    pub categories: Option<Vec<Category>>,
}

fn take_array<T: serde::de::DeserializeOwned>(
    doc: &mut Value,
    field: &'static str,
) -> Result<Option<Vec<T>>, ImportError> {
    match doc.get_mut(field).map(Value::take) {
        Some(value @ Value::Array(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ImportError::InvalidArray { field, reason: e.to_string() }),
        _ => Ok(None),
    }
}

/// Validate the whole file before anything is applied
pub fn parse_import(raw: &str) -> Result<ImportedData, ImportError> {
    let mut doc: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let foods = take_array::<Food>(&mut doc, "foods")?;
    let categories = take_array::<Category>(&mut doc, "categories")?;

    if foods.is_none() && categories.is_none() {
        return Err(ImportError::NothingToImport);
    }

    Ok(ImportedData { foods, categories })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_food::FoodDto;
    use crate::domain::a004_food_category::CategoryDto;

    fn sample() -> ExportDocument {
        let food = Food::from_dto(&FoodDto {
            id: Some("tofu".into()),
            name: "豆腐".into(),
            protein_per_100g: "7".into(),
            ..Default::default()
        });
        let category = Category::from_dto(&CategoryDto {
            id: Some("soy".into()),
            name: "大豆製品".into(),
            ..Default::default()
        });
        ExportDocument::new(&[food], &[category], "2024-06-01T12:00:00.000Z")
    }

    #[test]
    fn test_export_shape() {
        let json = sample().to_pretty_json().unwrap();
        assert!(json.contains("\n  \"foods\""));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["exportedAt"], "2024-06-01T12:00:00.000Z");
        assert_eq!(value["foods"][0]["proteinPer100g"], 7.0);
        assert_eq!(export_filename("2024-06-01"), "protein-tracker-data-2024-06-01.json");
    }

    #[test]
    fn test_exported_file_imports_back() {
        let json = sample().to_pretty_json().unwrap();
        let data = parse_import(&json).unwrap();
        assert_eq!(data.foods.unwrap()[0].id.0, "tofu");
        assert_eq!(data.categories.unwrap()[0].name, "大豆製品");
    }

    #[test]
    fn test_only_categories_leaves_foods_alone() {
        let data = parse_import(r#"{"categories":[{"id":"c1","name":"魚介類"}]}"#).unwrap();
        assert!(data.foods.is_none());
        assert_eq!(data.categories.unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(parse_import("not json"), Err(ImportError::InvalidJson(_))));
        assert_eq!(parse_import(r#"{"foods":{}}"#), Err(ImportError::NothingToImport));
        assert_eq!(parse_import("[]"), Err(ImportError::NothingToImport));
        assert!(matches!(
            parse_import(r#"{"foods":[{"name":"no id"}],"categories":[]}"#),
            Err(ImportError::InvalidArray { field: "foods", .. })
        ));
    }
}

use crate::domain::common::{aggregate_id::non_blank, generate_id, AggregateId, AggregateRoot};
use crate::domain::common::lenient::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl AggregateId for CategoryId {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn from_string(s: &str) -> Result<Self, String> {
        non_blank(s).map(CategoryId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

pub const DEFAULT_EMOJI: &str = "📄";

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

fn emoji_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_emoji))
}

/// Food category managed in the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_emoji", deserialize_with = "emoji_or_default")]
    pub emoji: String,
}

impl Category {
    pub fn from_dto(dto: &CategoryDto) -> Self {
        let id = dto
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generate_id(Self::id_prefix()));
        let emoji = dto.emoji.trim();

        Self {
            id: CategoryId(id),
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            emoji: if emoji.is_empty() { default_emoji() } else { emoji.to_string() },
        }
    }

    pub fn to_dto(&self) -> CategoryDto {
        CategoryDto {
            id: Some(self.id.as_string()),
            name: self.name.clone(),
            description: self.description.clone(),
            emoji: self.emoji.clone(),
        }
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

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
            return Err("カテゴリー名を入力してください".into());
        }
        Ok(())
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "categories"
    }

    fn id_prefix() -> &'static str {
        "item"
    }

    fn element_name() -> &'static str {
        "カテゴリー"
    }

    fn list_name() -> &'static str {
        "カテゴリー一覧"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub emoji: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_emoji_defaults() {
        let c = Category::from_dto(&CategoryDto { name: "肉類".into(), ..Default::default() });
        assert_eq!(c.emoji, DEFAULT_EMOJI);
        assert!(c.id.0.starts_with("item_"));
    }

    #[test]
    fn test_missing_emoji_in_json_defaults() {
        let c: Category = serde_json::from_str(r#"{"id":"meat","name":"肉類"}"#).unwrap();
        assert_eq!(c.emoji, DEFAULT_EMOJI);
        assert_eq!(c.description, "");
    }

    #[test]
    fn test_null_emoji_in_json_defaults() {
        let c: Category =
            serde_json::from_str(r#"{"id":"meat","name":"肉類","description":null,"emoji":null}"#).unwrap();
        assert_eq!(c.emoji, DEFAULT_EMOJI);
        assert_eq!(c.description, "");
    }
}

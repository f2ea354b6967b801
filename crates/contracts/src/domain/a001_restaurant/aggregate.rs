use crate::domain::common::lenient::{list_or_csv, null_as_default, split_csv, string_or_number};
use crate::domain::common::{aggregate_id::non_blank, generate_id, AggregateId, AggregateRoot, ImageSource};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Restaurant (chain) identifier, e.g. `"yoshinoya"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub String);

impl AggregateId for RestaurantId {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn from_string(s: &str) -> Result<Self, String> {
        non_blank(s).map(RestaurantId)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Restaurant chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub logo: ImageSource,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub established: String,
    #[serde(default, deserialize_with = "list_or_csv")]
    pub locations: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Restaurant {
    /// Build a record from the edit form. A new id is generated for creates.
    pub fn from_dto(dto: &RestaurantDto, now: &str) -> Self {
        let id = dto
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generate_id(Self::id_prefix()));

        Self {
            id: RestaurantId(id),
            name: dto.name.trim().to_string(),
            category: dto.category.trim().to_string(),
            description: dto.description.trim().to_string(),
            logo: ImageSource::resolve(&dto.logo_url, dto.logo_upload.clone()),
            website: dto.website.trim().to_string(),
            established: dto.established.trim().to_string(),
            locations: split_csv(&dto.locations),
            last_updated: Some(now.to_string()),
        }
    }

    pub fn to_dto(&self) -> RestaurantDto {
        RestaurantDto {
            id: Some(self.id.as_string()),
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            logo_url: self.logo.url_field(),
            logo_upload: match &self.logo {
                ImageSource::Inline(data) => Some(data.clone()),
                _ => None,
            },
            website: self.website.clone(),
            established: self.established.clone(),
            locations: self.locations.join(","),
        }
    }
}

impl AggregateRoot for Restaurant {
    type Id = RestaurantId;

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
            return Err("レストラン名を入力してください".into());
        }
        Ok(())
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "restaurants"
    }

    fn id_prefix() -> &'static str {
        "restaurant"
    }

    fn element_name() -> &'static str {
        "レストラン"
    }

    fn list_name() -> &'static str {
        "レストラン一覧"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Edit form of a restaurant
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestaurantDto {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub description: String,
    /// URL typed into the logo field
    pub logo_url: String,
    /// `data:` URI of an uploaded file; wins over `logo_url`
    pub logo_upload: Option<String>,
    pub website: String,
    pub established: String,
    /// Comma separated
    pub locations: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> RestaurantDto {
        RestaurantDto {
            name: "Test Diner".into(),
            category: "ファミレス".into(),
            locations: " 東京, 大阪 ,,".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_generates_prefixed_id() {
        let r = Restaurant::from_dto(&dto(), "2024-05-01T00:00:00.000Z");
        assert!(r.id.0.starts_with("restaurant_"));
        assert_eq!(r.locations, vec!["東京", "大阪"]);
        assert_eq!(r.last_updated.as_deref(), Some("2024-05-01T00:00:00.000Z"));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_edit_keeps_id() {
        let mut d = dto();
        d.id = Some("test_diner".into());
        let r = Restaurant::from_dto(&d, "now");
        assert_eq!(r.id.0, "test_diner");
    }

    #[test]
    fn test_uploaded_logo_wins_and_survives_round_trip() {
        let mut d = dto();
        d.logo_url = "https://example.com/logo.png".into();
        d.logo_upload = Some("data:image/png;base64,AAAA".into());
        let r = Restaurant::from_dto(&d, "now");
        assert!(r.logo.is_inline());

        // re-opening the form and saving without touching the logo keeps it
        let again = Restaurant::from_dto(&r.to_dto(), "later");
        assert_eq!(again.logo, r.logo);
    }

    #[test]
    fn test_blank_name_is_invalid() {
        let mut d = dto();
        d.name = "   ".into();
        assert!(Restaurant::from_dto(&d, "now").validate().is_err());
    }

    #[test]
    fn test_baseline_record_parses() {
        let r: Restaurant = serde_json::from_str(
            r#"{"id":"yoshinoya","name":"吉野家","category":"牛丼","established":1899,"locations":["全国"]}"#,
        )
        .unwrap();
        assert_eq!(r.established, "1899");
        assert!(r.logo.is_none());
        assert!(r.last_updated.is_none());
    }

    #[test]
    fn test_null_fields_read_as_blank() {
        let r: Restaurant = serde_json::from_str(
            r#"{"id":"other","name":"別の店","category":null,"description":null,"logo":null,"website":null,"locations":null}"#,
        )
        .unwrap();
        assert_eq!(r.description, "");
        assert_eq!(r.category, "");
        assert!(r.logo.is_none());
        assert!(r.locations.is_empty());
    }
}

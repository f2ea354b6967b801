use crate::domain::a001_restaurant::Restaurant;
use crate::domain::a002_menu::Menu;
use crate::domain::a003_food::Food;
use crate::domain::common::lenient::null_as_default;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// What a stored key held when it was read
#[derive(Debug, Clone, PartialEq)]
pub enum StoredEntry<T> {
    Absent,
    Readable(T),
    /// Present but not parseable; `raw` is the untouched text
    Unreadable { raw: String, error: String },
}

impl<T: DeserializeOwned> StoredEntry<T> {
    pub fn read(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return StoredEntry::Absent;
        };
        match serde_json::from_str(raw) {
            Ok(value) => StoredEntry::Readable(value),
            Err(e) => StoredEntry::Unreadable { raw: raw.to_string(), error: e.to_string() },
        }
    }
}

impl<T: Default> StoredEntry<T> {
    /// The parsed value, or the empty default for a missing or malformed entry
    pub fn into_value_or_default(self, key: &str) -> T {
        match self {
            StoredEntry::Readable(value) => value,
            StoredEntry::Absent => T::default(),
            StoredEntry::Unreadable { error, .. } => {
                log::warn!("stored '{}' is not readable, ignoring it: {}", key, error);
                T::default()
            }
        }
    }
}

fn parse_or_default<T: DeserializeOwned + Default>(raw: Option<&str>, key: &str) -> T {
    StoredEntry::read(raw).into_value_or_default(key)
}

// ============================================================================
// Store A
// ============================================================================

/// Restaurants and menus as written under `restaurantData`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestaurantSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub restaurants: Vec<Restaurant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub menus: Vec<Menu>,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl RestaurantSnapshot {
    pub fn parse(raw: Option<&str>, key: &str) -> Self {
        parse_or_default(raw, key)
    }

    /// An override exists only when it carries at least one restaurant
    pub fn is_override(&self) -> bool {
        !self.restaurants.is_empty()
    }
}

// ============================================================================
// Store B
// ============================================================================

/// Foods as written under `foodsData`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodsSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub foods: Vec<Food>,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl FoodsSnapshot {
    pub fn parse(raw: Option<&str>, key: &str) -> Self {
        parse_or_default(raw, key)
    }

    pub fn is_override(&self) -> bool {
        !self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_invalid_entries_are_empty() {
        assert!(!RestaurantSnapshot::parse(None, "restaurantData").is_override());
        assert!(!RestaurantSnapshot::parse(Some("{not json"), "restaurantData").is_override());
        assert!(!FoodsSnapshot::parse(Some("[]"), "foodsData").is_override());
        assert!(matches!(
            StoredEntry::<Vec<crate::domain::a004_food_category::Category>>::read(Some("{}")),
            StoredEntry::Unreadable { .. }
        ));
    }

    #[test]
    fn test_absent_and_unreadable_are_told_apart() {
        assert_eq!(StoredEntry::<RestaurantSnapshot>::read(None), StoredEntry::Absent);
        match StoredEntry::<RestaurantSnapshot>::read(Some("{not json")) {
            StoredEntry::Unreadable { raw, .. } => assert_eq!(raw, "{not json"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            StoredEntry::<FoodsSnapshot>::read(Some(r#"{"foods":[]}"#)),
            StoredEntry::Readable(_)
        ));
    }

    #[test]
    fn test_null_fields_keep_the_override() {
        let s = RestaurantSnapshot::parse(
            Some(
                r#"{"restaurants":[{"id":"mine","name":"自分の店"},{"id":"other","name":"別の店","description":null}],
                    "menus":[{"id":"m1","restaurant_id":"mine","name":"x","is_vegan":null,"nutrition":null}],"lastUpdated":null}"#,
            ),
            "restaurantData",
        );
        assert!(s.is_override());
        assert_eq!(s.restaurants.len(), 2);
        assert_eq!(s.menus.len(), 1);

        let f = FoodsSnapshot::parse(
            Some(r#"{"foods":[{"id":"tofu","name":"豆腐"},{"id":"egg","name":"卵","servingSize":null}],"lastUpdated":null}"#),
            "foodsData",
        );
        assert!(f.is_override());
        assert_eq!(f.foods.len(), 2);
    }

    #[test]
    fn test_menus_default_to_empty() {
        let s = RestaurantSnapshot::parse(
            Some(r#"{"restaurants":[{"id":"r1","name":"Test Diner"}]}"#),
            "restaurantData",
        );
        assert!(s.is_override());
        assert!(s.menus.is_empty());
        assert_eq!(s.last_updated, None);
    }

    #[test]
    fn test_empty_restaurants_is_not_an_override() {
        let s = RestaurantSnapshot::parse(
            Some(r#"{"restaurants":[],"menus":[{"id":"m1","restaurant_id":"r1","name":"x"}]}"#),
            "restaurantData",
        );
        assert!(!s.is_override());
    }

    #[test]
    fn test_last_updated_key_is_camel_case() {
        let s = FoodsSnapshot { foods: vec![], last_updated: Some("2024-06-01".into()) };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["lastUpdated"], "2024-06-01");
    }
}

use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate identifier types.
///
/// Ids are opaque strings: baseline records carry stable slugs
/// (`"yoshinoya"`, `"chicken_breast"`), records created in the console carry
/// generated `<prefix>_<millis>_<random>` values.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Borrow the id as a string slice
    fn as_str(&self) -> &str;

    /// Build an id from a string, rejecting blanks
    fn from_string(s: &str) -> Result<Self, String>;

    /// Owned string form
    fn as_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// Generate a fresh id of the form `<prefix>_<unix millis>_<9 random chars>`.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, millis, &random[..9])
}

/// Shared blank check for string id newtypes
pub(crate) fn non_blank(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("ID が空です".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("menu");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "menu");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(generate_id("item"), generate_id("item"));
    }

    #[test]
    fn test_non_blank_rejects_whitespace() {
        assert!(non_blank("   ").is_err());
        assert_eq!(non_blank(" tofu ").unwrap(), "tofu");
    }
}

//! Tolerant field readers for hand-edited baseline and imported JSON.
//!
//! Baseline files were written by hand over several years, so the same field
//! shows up as a number in one record and a string in another.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Split a comma separated form field: trims items and drops empties
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `null` reads as the type's default, like a missing field does
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `true` unless the field says otherwise; `null` counts as unset
pub fn flag_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Accepts `"1899"`, `1899` or `null`
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Accepts `["a", "b"]`, `"a, b"` or `null`
pub fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_csv(&s),
        _ => Vec::new(),
    })
}

/// Whole non-negative number; floats are rounded, negatives and junk become 0
pub fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(clamp_whole(value))
}

/// Decimal number; numeric strings are parsed, junk becomes 0
pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Optional decimal; `null`, missing and junk become `None`
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Round half up and clamp into `u32`
pub fn clamp_whole(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.round() as u32
    }
}

/// Parse a whole-number form field, blank or junk is 0
pub fn parse_whole(raw: &str) -> u32 {
    clamp_whole(raw.trim().parse::<f64>().unwrap_or(0.0))
}

/// Parse a decimal form field, blank or junk is 0
pub fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse an optional decimal form field, blank is `None`
pub fn parse_optional_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "string_or_number")]
        established: String,
        #[serde(default, deserialize_with = "list_or_csv")]
        locations: Vec<String>,
        #[serde(default, deserialize_with = "whole_number")]
        price: u32,
        #[serde(default, deserialize_with = "null_as_default")]
        note: String,
        #[serde(default, deserialize_with = "null_as_default")]
        vegan: bool,
        #[serde(default = "yes", deserialize_with = "flag_or_true")]
        available: bool,
    }

    fn yes() -> bool {
        true
    }

    #[test]
    fn test_mixed_shapes_are_accepted() {
        let p: Record =
            serde_json::from_str(r#"{"established": 1899, "locations": "東京, 大阪,,", "price": 426.4}"#).unwrap();
        assert_eq!(p.established, "1899");
        assert_eq!(p.locations, vec!["東京", "大阪"]);
        assert_eq!(p.price, 426);
    }

    #[test]
    fn test_nulls_and_missing_fields_default() {
        let p: Record = serde_json::from_str(r#"{"established": null, "locations": null}"#).unwrap();
        assert_eq!(p.established, "");
        assert!(p.locations.is_empty());
        assert_eq!(p.price, 0);
        assert!(p.available);
    }

    #[test]
    fn test_explicit_null_reads_as_default() {
        let p: Record =
            serde_json::from_str(r#"{"note": null, "vegan": null, "available": null}"#).unwrap();
        assert_eq!(p.note, "");
        assert!(!p.vegan);
        assert!(p.available);

        let p: Record = serde_json::from_str(r#"{"note": "大盛り", "vegan": true, "available": false}"#).unwrap();
        assert_eq!(p.note, "大盛り");
        assert!(p.vegan);
        assert!(!p.available);
    }

    #[test]
    fn test_split_csv_trims() {
        assert_eq!(split_csv(" 卵 ,乳,, 小麦 "), vec!["卵", "乳", "小麦"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn test_form_number_parsing() {
        assert_eq!(parse_whole("690"), 690);
        assert_eq!(parse_whole("-5"), 0);
        assert_eq!(parse_whole("abc"), 0);
        assert_eq!(parse_decimal("19.6"), 19.6);
        assert_eq!(parse_optional_decimal(" "), None);
        assert_eq!(parse_optional_decimal("2.5"), Some(2.5));
    }
}

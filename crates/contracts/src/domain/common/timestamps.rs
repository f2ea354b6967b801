use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Current time as an ISO-8601 string with millisecond precision (`2024-05-01T09:30:00.000Z`)
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

pub fn format_iso(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Current UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` and a bare date
/// (baseline records only carry `2024-01-01`). Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short display form, falls back to the raw text
pub fn display_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso_round_trips_through_parser() {
        assert!(parse_timestamp(&now_iso()).is_some());
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(format_iso(dt), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_ordering() {
        let a = parse_timestamp("2024-01-01").unwrap();
        let b = parse_timestamp("2024-03-05T10:00:00.000Z").unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_today_shape() {
        assert_eq!(today().len(), 10);
    }
}

//! Display Formatting

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Render a backend timestamp or date as `YYYY-MM-DD`; unknown shapes pass through
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

pub fn format_optional_date(raw: Option<&str>) -> Option<String> {
    raw.filter(|r| !r.trim().is_empty()).map(format_date)
}

/// "3 views" / "1 view"
pub fn views(count: u64) -> String {
    if count == 1 {
        "1 view".to_string()
    } else {
        format!("{count} views")
    }
}

/// Schedule range such as "2024-01-05 – 2024-03-01" or "from 2024-01-05"
pub fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (format_optional_date(start), format_optional_date(end)) {
        (Some(s), Some(e)) => Some(format!("{s} – {e}")),
        (Some(s), None) => Some(format!("from {s}")),
        (None, Some(e)) => Some(format!("until {e}")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_shapes() {
        assert_eq!(format_date("2024-03-01T10:20:30Z"), "2024-03-01");
        assert_eq!(format_date("2024-03-01T10:20:30.123"), "2024-03-01");
        assert_eq!(format_date("2024-03-01"), "2024-03-01");
        assert_eq!(format_date("spring 2024"), "spring 2024");
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(Some("2024-01-05"), Some("2024-03-01")).as_deref(), Some("2024-01-05 – 2024-03-01"));
        assert_eq!(date_range(Some("2024-01-05"), Some("")).as_deref(), Some("from 2024-01-05"));
        assert_eq!(date_range(None, None), None);
    }

    #[test]
    fn test_views() {
        assert_eq!(views(1), "1 view");
        assert_eq!(views(0), "0 views");
    }
}

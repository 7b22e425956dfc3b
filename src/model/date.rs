//! Date parsing for the formats the mock API emits.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a plain date, an RFC 3339 timestamp, a naive ISO timestamp, or a
/// unix timestamp (seconds or milliseconds).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if raw.chars().all(|c| c.is_ascii_digit()) {
        let value: i64 = raw.parse().ok()?;
        let dt = if raw.len() >= 12 {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        };
        return dt.map(|dt| dt.date_naive());
    }
    None
}

/// Strict `YYYY-MM-DD`, as typed into forms.
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// `dd-mm-yyyy`, "N/A" when missing, "Invalid Date" when unparsable.
pub fn format_display(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => "N/A".to_string(),
        Some(value) => match parse_date(value) {
            Some(date) => date.format("%d-%m-%Y").to_string(),
            None => "Invalid Date".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        assert_eq!(parse_date("2025-07-03"), Some(expected));
        assert_eq!(parse_date("2025-07-03T08:15:00.000Z"), Some(expected));
        assert_eq!(parse_date("2025-07-03T08:15:00"), Some(expected));
        assert_eq!(parse_date("1751530500"), Some(expected));
        assert_eq!(parse_date("1751530500000"), Some(expected));
    }

    #[test]
    fn display_format_and_fallbacks() {
        assert_eq!(format_display(Some("2025-07-03")), "03-07-2025");
        assert_eq!(format_display(None), "N/A");
        assert_eq!(format_display(Some("  ")), "N/A");
        assert_eq!(format_display(Some("not a date")), "Invalid Date");
    }

    #[test]
    fn input_dates_are_strict() {
        assert!(parse_input_date("2025-02-30").is_none());
        assert!(parse_input_date("03-07-2025").is_none());
        assert!(parse_input_date("2025-07-03").is_some());
    }
}

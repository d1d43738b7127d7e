//! Timestamp parsing and display formatting for feed records.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Label for a record that has no usable timestamp.
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Parses a feed timestamp, keeping the offset the feed supplied.
///
/// Accepts RFC 3339 (`2024-06-01T08:30:00-04:00`), a local date-time without
/// offset, or a bare date; the last two are read as UTC. Anything else is
/// `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t);
    }

    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc().fixed_offset());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().fixed_offset())
}

/// Formats a timestamp as `Jun 1, 2024, 8:30 AM` in its own offset.
pub fn format_timestamp(t: &DateTime<FixedOffset>) -> String {
    t.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Parses and formats in one step, falling back to [`UNKNOWN_TIME`].
pub fn display_timestamp(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|t| format_timestamp(&t))
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let t = parse_timestamp("2024-06-01T08:30:00-04:00").unwrap();
        assert_eq!(t.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(format_timestamp(&t), "Jun 1, 2024, 8:30 AM");
    }

    #[test]
    fn test_parse_bare_date() {
        let t = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(format_timestamp(&t), "Jan 1, 2024, 12:00 AM");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let t = parse_timestamp("2024-03-09T17:05:00").unwrap();
        assert_eq!(format_timestamp(&t), "Mar 9, 2024, 5:05 PM");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_display_timestamp_fallback() {
        assert_eq!(display_timestamp(None), UNKNOWN_TIME);
        assert_eq!(display_timestamp(Some("not a date")), UNKNOWN_TIME);
    }
}

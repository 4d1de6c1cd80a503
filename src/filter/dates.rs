//! Timestamp parsing and display formats.
//!
//! The backend sends either RFC 3339 stamps or naive `YYYY-MM-DD HH:MM:SS`
//! strings. Naive values are read as wall-clock time at the configured offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// `ddd, D MMMM YYYY`, e.g. "Thu, 1 August 2024".
pub const LONG_DATE_FORMAT: &str = "%a, %-d %B %Y";
/// `hh:mm A`, e.g. "07:55 AM".
pub const CLOCK_12H_FORMAT: &str = "%I:%M %p";
/// `HH:mm`.
pub const CLOCK_24H_FORMAT: &str = "%H:%M";

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a backend timestamp and shift it to `offset`.
pub fn parse_timestamp(raw: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(offset));
    }

    let naive = parse_naive(raw)?;
    offset.from_local_datetime(&naive).single()
}

/// Calendar date as written in the value, ignoring any timezone shift.
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    parse_naive(raw).map(|naive| naive.date())
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_naive_timestamp_uses_offset() {
        let stamp = parse_timestamp("2024-08-01 07:55:12", &wib()).unwrap();
        assert_eq!(stamp.hour(), 7);
        assert_eq!(stamp.offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn test_rfc3339_is_shifted() {
        let stamp = parse_timestamp("2024-08-01T20:30:00Z", &wib()).unwrap();
        assert_eq!(stamp.day(), 2);
        assert_eq!(stamp.hour(), 3);
    }

    #[test]
    fn test_calendar_date_keeps_written_day() {
        assert_eq!(
            calendar_date("2024-01-31T23:30:00-05:00"),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(calendar_date("2023-02-10"), NaiveDate::from_ymd_opt(2023, 2, 10));
        assert_eq!(calendar_date("yesterday"), None);
    }

    #[test]
    fn test_long_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(format_long_date(date), "Thu, 1 August 2024");
    }

    #[test]
    fn test_empty_timestamp() {
        assert!(parse_timestamp("  ", &wib()).is_none());
    }
}

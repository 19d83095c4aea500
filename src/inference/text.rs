//! String classification: UUID, then date with offset, then plain date/time,
//! then time span, else opaque text.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::CanonicalType;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// `[-][d.]hh:mm[:ss[.fffffff]]`
static TIME_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:\d+\.)?(\d{1,2}):(\d{2})(?::(\d{2})(?:\.\d{1,7})?)?$")
        .expect("time span pattern is valid")
});

pub fn classify_string(s: &str) -> CanonicalType {
    if looks_like_uuid(s) {
        CanonicalType::Guid
    } else if looks_like_offset_date_time(s) {
        CanonicalType::DateTimeOffset
    } else if looks_like_date_time(s) {
        CanonicalType::DateTime
    } else if looks_like_time_span(s) {
        CanonicalType::TimeSpan
    } else {
        CanonicalType::String
    }
}

pub fn looks_like_uuid(s: &str) -> bool {
    Uuid::try_parse(s).is_ok()
}

pub fn looks_like_offset_date_time(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok()
}

pub fn looks_like_date_time(s: &str) -> bool {
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

pub fn looks_like_time_span(s: &str) -> bool {
    let Some(caps) = TIME_SPAN.captures(s) else {
        return false;
    };
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let hours_ok = field(1).is_some_and(|h| h < 24);
    let minutes_ok = field(2).is_some_and(|m| m < 60);
    let seconds_ok = caps.get(3).is_none() || field(3).is_some_and(|s| s < 60);
    hours_ok && minutes_ok && seconds_ok
}

#[cfg(test)]
mod tests {
    use super::classify_string;
    use super::CanonicalType::*;

    #[test]
    fn uuid_forms() {
        assert_eq!(classify_string("67e55044-10b1-426f-9247-bb680e5fe0c8"), Guid);
        assert_eq!(classify_string("{67e55044-10b1-426f-9247-bb680e5fe0c8}"), Guid);
        assert_eq!(classify_string("67e5504410b1426f9247bb680e5fe0c8"), Guid);
    }

    #[test]
    fn dates_with_offsets() {
        assert_eq!(classify_string("2024-03-01T12:30:00Z"), DateTimeOffset);
        assert_eq!(classify_string("2024-03-01T12:30:00.123+02:00"), DateTimeOffset);
        assert_eq!(classify_string("Tue, 1 Jul 2003 10:52:37 +0200"), DateTimeOffset);
    }

    #[test]
    fn plain_dates() {
        assert_eq!(classify_string("2024-03-01T12:30:00"), DateTime);
        assert_eq!(classify_string("2024-03-01 12:30:00.5"), DateTime);
        assert_eq!(classify_string("2024-03-01"), DateTime);
    }

    #[test]
    fn time_spans() {
        assert_eq!(classify_string("12:30"), TimeSpan);
        assert_eq!(classify_string("01:02:03.5"), TimeSpan);
        assert_eq!(classify_string("3.04:05:06"), TimeSpan);
        assert_eq!(classify_string("25:00"), String);
        assert_eq!(classify_string("10:75"), String);
    }

    #[test]
    fn everything_else_is_text() {
        assert_eq!(classify_string(""), String);
        assert_eq!(classify_string("hello"), String);
        assert_eq!(classify_string("2024-13-45"), String);
        assert_eq!(classify_string("not-a-uuid-at-all"), String);
    }
}

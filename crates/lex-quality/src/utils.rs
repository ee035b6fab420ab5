//! Shared parsing and arithmetic helpers.
//!
//! Every parser here is total: a failed parse returns `None`/`false`, which
//! callers treat as "does not match this type", never as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// =============================================================================
// Value Classification
// =============================================================================

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex: email"));

/// Date-time layouts tried after RFC 3339 / RFC 2822.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Calendar date layouts.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Literal `true`/`false`, ignoring case and surrounding whitespace.
pub fn is_boolean_literal(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false")
}

/// Parse a string as a finite number. `"inf"` and `"NaN"` are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_number(s: &str) -> bool {
    parse_number(s).is_some()
}

/// A single `@` with a dot somewhere in the domain part and no whitespace.
pub fn is_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Absolute URL with a scheme.
pub fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Parse a calendar date or date-time. Matching is case-insensitive.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let normalized = s.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&normalized) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn is_date(s: &str) -> bool {
    parse_date(s).is_some()
}

// =============================================================================
// Arithmetic
// =============================================================================

/// Round to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `count / total * 100` rounded to two decimals; 0 when `total` is 0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_boolean_literal() {
        assert!(is_boolean_literal("true"));
        assert!(is_boolean_literal(" FALSE "));
        assert!(!is_boolean_literal("yes"));
        assert!(!is_boolean_literal("1"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" -3.5 "), Some(-3.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last@sub.example.org"));
        assert!(!is_email("bad"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a@@b.com"));
        assert!(!is_email("a b@c.com"));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/path?q=1"));
        assert!(is_url("ftp://files.example.org"));
        assert!(!is_url("example.com"));
        assert!(!is_url("a@b.com"));
        assert!(!is_url("not a url"));
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(is_date("2024-01-15"));
        assert!(is_date("2024/01/15"));
        assert!(is_date("01/15/2024"));
        assert!(is_date("2024-01-15T10:30:00"));
        assert!(is_date("2024-01-15t10:30:00z"));
        assert!(is_date("2024-01-15 10:30:00"));
        assert!(is_date("January 5, 2024"));
        assert!(is_date("jan 5 2024"));
        assert!(is_date("Mon, 15 Jan 2024 10:30:00 +0000"));
    }

    #[test]
    fn test_parse_date_rejects_invalid_calendar_dates() {
        assert!(!is_date("2024-02-30"));
        assert!(!is_date("13/45/2024"));
        assert!(!is_date("not a date"));
        assert!(!is_date(""));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33.33);
        assert_eq!(percent(2, 3), 66.67);
        assert_eq!(percent(10, 10), 100.0);
        assert_eq!(percent(0, 0), 0.0);
    }
}

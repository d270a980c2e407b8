//! W3C datetime parsing for sitemap `<lastmod>` values.
//!
//! The sitemap protocol uses the W3C Datetime profile of ISO 8601, which
//! allows reduced precision:
//!
//! | Form                          | Example                        |
//! |-------------------------------|--------------------------------|
//! | `YYYY`                        | `2024`                         |
//! | `YYYY-MM`                     | `2024-06`                      |
//! | `YYYY-MM-DD`                  | `2024-06-15`                   |
//! | `YYYY-MM-DDThh:mmTZD`         | `2024-06-15T14:30+02:00`       |
//! | `YYYY-MM-DDThh:mm:ssTZD`      | `2024-06-15T14:30:45Z`         |
//! | `YYYY-MM-DDThh:mm:ss.sTZD`    | `2024-06-15T14:30:45.5-05:00`  |
//!
//! Values without a time zone are taken as UTC. RFC 2822 dates are accepted
//! as a last resort because page metadata sometimes carries them.

use atom_syndication::FixedDateTime;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Formats with an explicit offset (after `Z` is normalized to `+00:00`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Formats without a time zone.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a W3C datetime (or RFC 3339 / RFC 2822) string.
///
/// Returns `None` for anything that does not describe a valid instant.
pub fn parse_datetime(s: &str) -> Option<FixedDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let with_offset = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(from_naive(naive));
        }
    }

    if let Some(date) = parse_reduced_date(s) {
        return date.and_hms_opt(0, 0, 0).map(from_naive);
    }

    DateTime::parse_from_rfc2822(s).ok()
}

/// Format as RFC 3339 with whole seconds, using `Z` for UTC.
pub fn to_rfc3339(dt: &FixedDateTime) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
fn parse_reduced_date(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match s.len() {
        10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
        7 => {
            let (year, month) = s.split_once('-')?;
            if !all_digits(year) || !all_digits(month) {
                return None;
            }
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        4 if all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}

fn from_naive(naive: NaiveDateTime) -> FixedDateTime {
    Utc.from_utc_datetime(&naive).fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfc(s: &str) -> String {
        to_rfc3339(&parse_datetime(s).expect("should parse"))
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(rfc("2024-01-01"), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_reduced_precision() {
        assert_eq!(rfc("2024-06"), "2024-06-01T00:00:00Z");
        assert_eq!(rfc("2024"), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_full_rfc3339() {
        assert_eq!(rfc("2024-06-15T14:30:45Z"), "2024-06-15T14:30:45Z");
        assert_eq!(rfc("2024-06-15T14:30:45+02:00"), "2024-06-15T14:30:45+02:00");
    }

    #[test]
    fn test_parse_minutes_with_offset() {
        assert_eq!(rfc("2024-06-15T14:30+02:00"), "2024-06-15T14:30:00+02:00");
        assert_eq!(rfc("2024-06-15T14:30Z"), "2024-06-15T14:30:00Z");
    }

    #[test]
    fn test_parse_naive_is_utc() {
        assert_eq!(rfc("2024-06-15T14:30:45"), "2024-06-15T14:30:45Z");
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(rfc("Sat, 15 Jun 2024 14:30:45 GMT"), "2024-06-15T14:30:45Z");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(rfc("  2024-01-01\n"), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("2024-13-01").is_none());
        assert!(parse_datetime("2024-02-30").is_none());
        assert!(parse_datetime("2024-1").is_none());
        assert!(parse_datetime("20x4").is_none());
    }
}

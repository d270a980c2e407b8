//! Sitemap data model.

use atom_syndication::FixedDateTime;
use std::fmt;

/// One `<url>` element of a sitemap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlRecord {
    /// `<loc>`; absent only in malformed sitemaps, rejected when mapping.
    pub location: Option<String>,
    /// `<lastmod>`, when present and parseable.
    pub last_modified: Option<FixedDateTime>,
    pub change_frequency: Option<ChangeFrequency>,
    /// `<priority>`, when present and within `0.0..=1.0`.
    pub priority: Option<f32>,
}

impl UrlRecord {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }
}

/// `<changefreq>` values defined by the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// Parse a `<changefreq>` value, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let value = s.trim();
        [
            Self::Always,
            Self::Hourly,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
            Self::Never,
        ]
        .into_iter()
        .find(|freq| freq.as_str().eq_ignore_ascii_case(value))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_frequency_parse() {
        assert_eq!(ChangeFrequency::parse("daily"), Some(ChangeFrequency::Daily));
        assert_eq!(ChangeFrequency::parse(" Weekly\n"), Some(ChangeFrequency::Weekly));
        assert_eq!(ChangeFrequency::parse("NEVER"), Some(ChangeFrequency::Never));
        assert_eq!(ChangeFrequency::parse("fortnightly"), None);
        assert_eq!(ChangeFrequency::parse(""), None);
    }

    #[test]
    fn test_change_frequency_display() {
        assert_eq!(ChangeFrequency::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_url_record_new() {
        let record = UrlRecord::new("https://example.com/");
        assert_eq!(record.location.as_deref(), Some("https://example.com/"));
        assert!(record.last_modified.is_none());
        assert!(record.change_frequency.is_none());
        assert!(record.priority.is_none());
    }
}

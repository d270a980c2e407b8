//! `[source]` section: where the sitemap comes from and how it is fetched.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default `User-Agent` header; some sitemap hosts reject unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Sitemap URL to fetch.
    pub url: Option<String>,
    /// HTTP timeout in seconds, applied to every request.
    pub timeout: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Keep only the first N URLs of the sitemap.
    pub max_entries: Option<usize>,
}

pub struct SourceConfigFields {
    pub url: FieldPath,
    pub timeout: FieldPath,
    pub user_agent: FieldPath,
    pub max_entries: FieldPath,
}

impl SourceConfig {
    pub const FIELDS: SourceConfigFields = SourceConfigFields {
        url: FieldPath::new("source.url"),
        timeout: FieldPath::new("source.timeout"),
        user_agent: FieldPath::new("source.user_agent"),
        max_entries: FieldPath::new("source.max_entries"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match self.url.as_deref() {
            None | Some("") => diag.error_with_hint(
                Self::FIELDS.url,
                "no sitemap URL configured",
                format!(
                    "pass it as the first argument or set {}",
                    Self::FIELDS.url
                ),
            ),
            Some(url_str) => match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com/sitemap.xml",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error(Self::FIELDS.url, "URL must have a valid host");
                    }
                }
                Err(e) => diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("invalid URL '{url_str}': {e}"),
                    "use format like https://example.com/sitemap.xml",
                ),
            },
        }

        if self.timeout == 0 {
            diag.error_with_hint(
                Self::FIELDS.timeout,
                "timeout must be greater than zero",
                format!("default is {DEFAULT_TIMEOUT_SECS} seconds"),
            );
        }

        if self.user_agent.trim().is_empty() {
            diag.error(Self::FIELDS.user_agent, "user agent must not be empty");
        }

        if self.max_entries == Some(0) {
            diag.error_with_hint(
                Self::FIELDS.max_entries,
                "max_entries must be greater than zero",
                format!("remove {} to keep every URL", Self::FIELDS.max_entries),
            );
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_entries: None,
        }
    }
}

//! `[build]` section: output rendering options.

use crate::config::{ConfigDiagnostics, FieldPath};
use atom_syndication::FixedDateTime;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Minify both XML outputs.
    pub minify: bool,
    /// Fixed "current time" (RFC 3339), used instead of the system clock.
    pub now: Option<String>,
}

pub struct BuildConfigFields {
    pub now: FieldPath,
}

impl BuildConfig {
    pub const FIELDS: BuildConfigFields = BuildConfigFields {
        now: FieldPath::new("build.now"),
    };

    /// Parsed `now`, if set and valid.
    pub fn fixed_now(&self) -> Option<FixedDateTime> {
        self.now
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(now) = &self.now
            && self.fixed_now().is_none()
        {
            diag.error_with_hint(
                Self::FIELDS.now,
                format!("'{now}' is not an RFC 3339 timestamp"),
                "use format like 2024-01-01T00:00:00Z",
            );
        }
    }
}

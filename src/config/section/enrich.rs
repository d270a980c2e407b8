//! `[enrich]` section: per-page metadata extraction.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Fetch each page and read its OpenGraph / Twitter metadata.
    pub enable: bool,
    /// Maximum number of pages to fetch.
    pub limit: usize,
}

pub struct EnrichConfigFields {
    pub enable: FieldPath,
    pub limit: FieldPath,
}

impl EnrichConfig {
    pub const FIELDS: EnrichConfigFields = EnrichConfigFields {
        enable: FieldPath::new("enrich.enable"),
        limit: FieldPath::new("enrich.limit"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable && self.limit == 0 {
            diag.error_with_hint(
                Self::FIELDS.limit,
                format!("{} is set but the limit is zero", Self::FIELDS.enable),
                "set a positive page limit or disable enrichment",
            );
        }
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            enable: false,
            limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(!config.enrich.enable);
        assert_eq!(config.enrich.limit, 10);
    }

    #[test]
    fn test_zero_limit_only_matters_when_enabled() {
        let mut enrich = EnrichConfig {
            enable: false,
            limit: 0,
        };
        let mut diag = ConfigDiagnostics::new();
        enrich.validate(&mut diag);
        assert!(diag.is_empty());

        enrich.enable = true;
        enrich.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, EnrichConfig::FIELDS.limit);
    }
}

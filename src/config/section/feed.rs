//! `[feed]` section: Atom feed output.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Output path for the Atom feed.
    pub path: PathBuf,
    /// Feed `<title>`.
    pub title: String,
    /// Feed `<subtitle>`.
    pub subtitle: Option<String>,
    /// Feed `<id>`, defaults to the sitemap URL.
    pub id: Option<String>,
    /// `rel="self"` link, defaults to a `file://` URL of the output path.
    pub self_link: Option<String>,
}

pub struct FeedConfigFields {
    pub path: FieldPath,
    pub title: FieldPath,
    pub id: FieldPath,
}

impl FeedConfig {
    pub const FIELDS: FeedConfigFields = FeedConfigFields {
        path: FieldPath::new("feed.path"),
        title: FieldPath::new("feed.title"),
        id: FieldPath::new("feed.id"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error(Self::FIELDS.path, "feed output path must not be empty");
        }
        if self.title.trim().is_empty() {
            diag.error(Self::FIELDS.title, "feed title must not be empty");
        }
        if self.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            diag.error_with_hint(
                Self::FIELDS.id,
                "feed id must not be empty",
                format!("remove {} to use the sitemap URL", Self::FIELDS.id),
            );
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: "feed.atom".into(),
            title: "Sitemap Feed".to_string(),
            subtitle: None,
            id: None,
            self_link: None,
        }
    }
}

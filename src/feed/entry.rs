//! Mapping from sitemap records to feed entries.

use super::title::derive_title;
use crate::{clock::Clock, sitemap::UrlRecord};
use atom_syndication::FixedDateTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("sitemap url #{index} has no <loc>")]
    MissingLocation { index: usize },
}

/// Where an entry's `updated` timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatedSource {
    /// The sitemap's `<lastmod>`.
    Sitemap,
    /// The page's `article:modified_time` (enrichment).
    Page,
    /// The run's clock, because nothing better was known.
    Clock,
}

impl UpdatedSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sitemap => "sitemap",
            Self::Page => "page",
            Self::Clock => "clock",
        }
    }
}

/// One Atom entry, derived from one sitemap URL.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: String,
    pub link: String,
    pub title: String,
    pub updated: FixedDateTime,
    pub updated_source: UpdatedSource,

    // Filled in by page enrichment.
    pub published: Option<FixedDateTime>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
}

/// Map a single record. `now` stands in for a missing `<lastmod>`.
pub fn map_record(
    index: usize,
    record: &UrlRecord,
    now: FixedDateTime,
) -> Result<FeedEntry, MappingError> {
    let location = record
        .location
        .as_deref()
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .ok_or(MappingError::MissingLocation { index })?;

    let (updated, updated_source) = match record.last_modified {
        Some(lastmod) => (lastmod, UpdatedSource::Sitemap),
        None => (now, UpdatedSource::Clock),
    };

    Ok(FeedEntry {
        id: location.to_string(),
        link: location.to_string(),
        title: derive_title(location),
        updated,
        updated_source,
        published: None,
        summary: None,
        image: None,
        category: None,
        author: None,
        site_name: None,
    })
}

/// Map every record, in order. The clock is read once for the whole run.
pub fn map_records(
    records: &[UrlRecord],
    clock: &dyn Clock,
) -> Result<Vec<FeedEntry>, MappingError> {
    let now = clock.now();
    records
        .iter()
        .enumerate()
        .map(|(index, record)| map_record(index, record, now))
        .collect()
}

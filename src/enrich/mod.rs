//! Optional page enrichment.
//!
//! Fetches the first `limit` entry pages and folds their OpenGraph / Twitter
//! metadata into the feed entries. Best-effort: a page that cannot be fetched
//! is skipped with a warning and its entry keeps the sitemap-derived values.

mod meta;

pub use meta::{PageMetadata, extract};

use crate::{
    config::EnrichConfig,
    feed::{FeedEntry, UpdatedSource},
    fetch::Fetch,
    log,
    logger::ProgressLine,
};
use url::Url;

/// Outcome of an enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub enriched: usize,
    pub skipped: usize,
}

/// Enrich up to `config.limit` entries in place. No-op when disabled.
pub fn enrich_entries(
    entries: &mut [FeedEntry],
    fetcher: &dyn Fetch,
    config: &EnrichConfig,
) -> EnrichStats {
    let mut stats = EnrichStats::default();
    if !config.enable {
        return stats;
    }

    let count = entries.len().min(config.limit);
    if count == 0 {
        return stats;
    }

    let progress = ProgressLine::new("enrich", &[("pages", count)]);
    for entry in entries.iter_mut().take(count) {
        match fetch_metadata(&entry.link, fetcher) {
            Ok(meta) => {
                apply(entry, meta);
                stats.enriched += 1;
            }
            Err(err) => {
                log!("warning"; "skipped {}: {:#}", entry.link, err);
                stats.skipped += 1;
            }
        }
        progress.inc("pages");
    }
    progress.finish();

    stats
}

fn fetch_metadata(link: &str, fetcher: &dyn Fetch) -> anyhow::Result<PageMetadata> {
    let page_url = Url::parse(link)?;
    let html = fetcher.fetch(link)?;
    Ok(extract(&html, &page_url))
}

/// Fold page metadata into an entry.
///
/// `modified` only replaces `updated` when the sitemap gave no `<lastmod>`.
pub fn apply(entry: &mut FeedEntry, meta: PageMetadata) {
    if let Some(title) = meta.title {
        entry.title = title;
    }
    if let Some(modified) = meta.modified
        && entry.updated_source == UpdatedSource::Clock
    {
        entry.updated = modified;
        entry.updated_source = UpdatedSource::Page;
    }

    entry.summary = meta.description.or(entry.summary.take());
    entry.image = meta.image.or(entry.image.take());
    entry.category = meta.kind.or(entry.category.take());
    entry.published = meta.published.or(entry.published);
    entry.author = meta.author.or(entry.author.take());
    entry.site_name = meta.site_name.or(entry.site_name.take());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock, feed::map_records, fetch::StubFetcher, sitemap::UrlRecord,
        utils::date::parse_datetime,
    };

    const PAGE: &str = r#"<html><head>
        <title>About us</title>
        <meta property="og:description" content="Who we are">
        <meta property="og:type" content="website">
        <meta property="article:modified_time" content="2024-03-01T10:00:00Z">
    </head></html>"#;

    fn entries(urls: &[&str], lastmod: Option<&str>) -> Vec<FeedEntry> {
        let records: Vec<_> = urls
            .iter()
            .map(|url| UrlRecord {
                last_modified: lastmod.and_then(parse_datetime),
                ..UrlRecord::new(*url)
            })
            .collect();
        let clock = FixedClock(parse_datetime("2024-06-01T12:00:00Z").unwrap());
        map_records(&records, &clock).unwrap()
    }

    fn enabled(limit: usize) -> EnrichConfig {
        EnrichConfig {
            enable: true,
            limit,
        }
    }

    #[test]
    fn test_disabled_fetches_nothing() {
        let fetcher = StubFetcher::default();
        let mut entries = entries(&["https://example.com/about"], None);
        let stats = enrich_entries(&mut entries, &fetcher, &EnrichConfig::default());
        assert_eq!(stats, EnrichStats::default());
        assert!(fetcher.calls().is_empty());
        assert_eq!(entries[0].title, "about");
    }

    #[test]
    fn test_enrich_applies_metadata() {
        let fetcher = StubFetcher::default().with("https://example.com/about", PAGE);
        let mut entries = entries(&["https://example.com/about"], None);
        let stats = enrich_entries(&mut entries, &fetcher, &enabled(10));

        assert_eq!(stats.enriched, 1);
        let entry = &entries[0];
        assert_eq!(entry.title, "About us");
        assert_eq!(entry.summary.as_deref(), Some("Who we are"));
        assert_eq!(entry.category.as_deref(), Some("website"));
        assert_eq!(entry.site_name.as_deref(), Some("example.com"));
        assert_eq!(entry.author.as_deref(), Some("example.com"));
        assert_eq!(entry.updated.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(entry.updated_source, UpdatedSource::Page);
        // Identity never changes.
        assert_eq!(entry.id, "https://example.com/about");
        assert_eq!(entry.link, "https://example.com/about");
    }

    #[test]
    fn test_sitemap_lastmod_beats_page_modified() {
        let fetcher = StubFetcher::default().with("https://example.com/about", PAGE);
        let mut entries = entries(&["https://example.com/about"], Some("2024-01-01"));
        enrich_entries(&mut entries, &fetcher, &enabled(10));

        assert_eq!(entries[0].updated.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(entries[0].updated_source, UpdatedSource::Sitemap);
    }

    #[test]
    fn test_limit_bounds_fetches() {
        let fetcher = StubFetcher::default()
            .with("https://example.com/a", PAGE)
            .with("https://example.com/b", PAGE)
            .with("https://example.com/c", PAGE);
        let mut entries = entries(
            &["https://example.com/a", "https://example.com/b", "https://example.com/c"],
            None,
        );
        let stats = enrich_entries(&mut entries, &fetcher, &enabled(2));

        assert_eq!(stats.enriched, 2);
        assert_eq!(fetcher.calls(), ["https://example.com/a", "https://example.com/b"]);
        assert_eq!(entries[2].title, "c");
        assert_eq!(entries[2].summary, None);
    }

    #[test]
    fn test_failed_page_is_skipped() {
        let fetcher = StubFetcher::default().with("https://example.com/b", PAGE);
        let mut entries = entries(&["https://example.com/a", "https://example.com/b"], None);
        let stats = enrich_entries(&mut entries, &fetcher, &enabled(10));

        assert_eq!(stats, EnrichStats { enriched: 1, skipped: 1 });
        assert_eq!(entries[0].title, "a");
        assert_eq!(entries[0].updated_source, UpdatedSource::Clock);
        assert_eq!(entries[1].title, "About us");
    }

    #[test]
    fn test_apply_keeps_existing_values_when_meta_is_empty() {
        let mut entry = entries(&["https://example.com/a"], None).remove(0);
        entry.summary = Some("kept".to_string());
        apply(&mut entry, PageMetadata::default());
        assert_eq!(entry.title, "a");
        assert_eq!(entry.summary.as_deref(), Some("kept"));
    }
}

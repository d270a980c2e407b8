//! Atom 1.0 feed generation.
//!
//! One `<entry>` per feed entry, in sitemap order. Entries always carry an
//! author since the feed itself has none.

use crate::{config::Config, feed::FeedEntry};
use atom_syndication::{
    Category, CategoryBuilder, Entry, EntryBuilder, Error, Feed, FeedBuilder, FixedDateTime,
    GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Source, SourceBuilder, Text,
    WriteConfig,
};
use url::Url;

/// Scheme of categories taken from `og:type`.
pub const OGP_SCHEME: &str = "http://ogp.me/ns#";

const GENERATOR: &str = env!("CARGO_PKG_NAME");
const INDENT: usize = 4;

/// Feed-level values, resolved from config, entries and the run clock.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMeta {
    pub title: String,
    pub subtitle: Option<String>,
    pub id: String,
    pub self_link: String,
    /// Origin of the sitemap's site (`rel="alternate"`).
    pub site_link: Option<String>,
    pub updated: FixedDateTime,
}

impl FeedMeta {
    pub fn resolve(config: &Config, entries: &[FeedEntry], now: FixedDateTime) -> Self {
        let sitemap_url = config.source_url();

        let self_link = config.feed.self_link.clone().unwrap_or_else(|| {
            Url::from_file_path(&config.feed.path)
                .map(String::from)
                .unwrap_or_else(|()| config.feed.path.display().to_string())
        });

        Self {
            title: config.feed.title.clone(),
            subtitle: config.feed.subtitle.clone(),
            id: config
                .feed
                .id
                .clone()
                .unwrap_or_else(|| sitemap_url.to_string()),
            self_link,
            site_link: origin(sitemap_url),
            updated: entries.iter().map(|e| e.updated).max().unwrap_or(now),
        }
    }
}

/// Render the feed document.
pub fn render_atom(meta: &FeedMeta, entries: &[FeedEntry], minify: bool) -> Result<Vec<u8>, Error> {
    let mut links = vec![
        LinkBuilder::default()
            .href(meta.self_link.clone())
            .rel("self".to_string())
            .mime_type(Some("application/atom+xml".to_string()))
            .build(),
    ];
    if let Some(site) = &meta.site_link {
        links.push(
            LinkBuilder::default()
                .href(site.clone())
                .rel("alternate".to_string())
                .build(),
        );
    }

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(meta.title.clone()))
        .id(meta.id.clone())
        .updated(meta.updated)
        .links(links)
        .subtitle(meta.subtitle.clone().map(Text::plain))
        .generator(Some(
            GeneratorBuilder::default()
                .value(GENERATOR)
                .version(Some(env!("CARGO_PKG_VERSION").to_string()))
                .build(),
        ))
        .entries(entries.iter().map(to_atom_entry).collect::<Vec<_>>())
        .build();

    // Compact output comes from the writer itself, so text is never touched.
    let config = WriteConfig {
        write_document_declaration: true,
        indent_size: (!minify).then_some(INDENT),
    };
    feed.write_with_config(Vec::new(), config)
}

fn to_atom_entry(entry: &FeedEntry) -> Entry {
    let mut links: Vec<Link> = vec![
        LinkBuilder::default()
            .href(entry.link.clone())
            .rel("alternate".to_string())
            .mime_type(Some("text/html".to_string()))
            .build(),
    ];
    if let Some(image) = &entry.image {
        links.push(
            LinkBuilder::default()
                .href(image.clone())
                .rel("enclosure".to_string())
                .build(),
        );
    }

    let author_name = entry
        .author
        .clone()
        .or_else(|| Url::parse(&entry.link).ok()?.host_str().map(str::to_string))
        .unwrap_or_else(|| entry.link.clone());
    let author: Person = PersonBuilder::default().name(author_name).build();

    let categories: Vec<Category> = entry
        .category
        .iter()
        .map(|term| {
            CategoryBuilder::default()
                .term(term.clone())
                .scheme(Some(OGP_SCHEME.to_string()))
                .build()
        })
        .collect();

    EntryBuilder::default()
        .title(Text::plain(entry.title.clone()))
        .id(entry.id.clone())
        .updated(entry.updated)
        .published(entry.published)
        .links(links)
        .authors(vec![author])
        .categories(categories)
        .summary(entry.summary.clone().map(Text::plain))
        .source(to_source(entry))
        .build()
}

/// `<source>` naming the site an enriched entry came from.
fn to_source(entry: &FeedEntry) -> Option<Source> {
    let site_name = entry.site_name.as_ref()?;
    let site = origin(&entry.link).unwrap_or_else(|| entry.link.clone());

    Some(
        SourceBuilder::default()
            .title(Text::plain(site_name.clone()))
            .id(site.clone())
            .updated(entry.updated)
            .links(vec![
                LinkBuilder::default()
                    .href(site)
                    .rel("alternate".to_string())
                    .build(),
            ])
            .build(),
    )
}

/// `scheme://host[:port]/` of an http(s) URL.
fn origin(url: &str) -> Option<String> {
    let origin = Url::parse(url).ok()?.origin();
    origin
        .is_tuple()
        .then(|| format!("{}/", origin.ascii_serialization()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock, config::test_config, feed::map_records, sitemap::UrlRecord,
        utils::date::parse_datetime,
    };
    use std::path::Path;

    const SITEMAP_URL: &str = "https://example.com/sitemap.xml";

    fn now() -> FixedDateTime {
        parse_datetime("2024-06-01T12:00:00Z").unwrap()
    }

    fn entries(records: &[UrlRecord]) -> Vec<FeedEntry> {
        map_records(records, &FixedClock(now())).unwrap()
    }

    fn render(config: &Config, entries: &[FeedEntry]) -> Feed {
        let meta = FeedMeta::resolve(config, entries, now());
        let xml = render_atom(&meta, entries, false).unwrap();
        Feed::read_from(&xml[..]).unwrap()
    }

    fn config() -> Config {
        test_config(SITEMAP_URL, Path::new("/tmp/out"))
    }

    #[test]
    fn test_feed_defaults() {
        let feed = render(&config(), &[]);

        assert_eq!(feed.title().as_str(), "Sitemap Feed");
        assert_eq!(feed.id(), SITEMAP_URL);
        assert_eq!(feed.updated(), &now());
        assert!(feed.entries().is_empty());
        assert_eq!(feed.generator().map(|g| g.value()), Some("sitemap2atom"));

        let self_link = feed.links().iter().find(|l| l.rel() == "self").unwrap();
        assert_eq!(self_link.href(), "file:///tmp/out/feed.atom");
        let site_link = feed.links().iter().find(|l| l.rel() == "alternate").unwrap();
        assert_eq!(site_link.href(), "https://example.com/");
    }

    #[test]
    fn test_feed_config_overrides() {
        let mut config = config();
        config.feed.title = "News".to_string();
        config.feed.subtitle = Some("All the news".to_string());
        config.feed.id = Some("urn:example:feed".to_string());
        config.feed.self_link = Some("https://example.com/feed.atom".to_string());

        let feed = render(&config, &[]);
        assert_eq!(feed.title().as_str(), "News");
        assert_eq!(feed.subtitle().map(|s| s.as_str()), Some("All the news"));
        assert_eq!(feed.id(), "urn:example:feed");
        assert!(
            feed.links()
                .iter()
                .any(|l| l.rel() == "self" && l.href() == "https://example.com/feed.atom")
        );
    }

    #[test]
    fn test_entries_in_order() {
        let records = [
            UrlRecord {
                last_modified: parse_datetime("2024-01-01"),
                ..UrlRecord::new("https://example.com/page1")
            },
            UrlRecord {
                last_modified: parse_datetime("2024-03-05T10:00:00+02:00"),
                ..UrlRecord::new("https://example.com/blog/second-post.html")
            },
        ];
        let feed = render(&config(), &entries(&records));

        assert_eq!(feed.entries().len(), 2);
        let first = &feed.entries()[0];
        assert_eq!(first.id(), "https://example.com/page1");
        assert_eq!(first.title().as_str(), "page1");
        assert_eq!(first.updated().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(first.links()[0].href(), "https://example.com/page1");
        assert_eq!(first.links()[0].rel(), "alternate");
        assert_eq!(first.links()[0].mime_type(), Some("text/html"));
        assert_eq!(first.authors()[0].name(), "example.com");

        let second = &feed.entries()[1];
        assert_eq!(second.title().as_str(), "second post");
        assert_eq!(
            feed.updated().to_rfc3339(),
            "2024-03-05T10:00:00+02:00",
            "feed updated is the newest entry"
        );
    }

    #[test]
    fn test_enriched_entry() {
        let mut entries = entries(&[UrlRecord::new("https://example.com/about")]);
        let entry = &mut entries[0];
        entry.title = "About us".to_string();
        entry.summary = Some("Who we are".to_string());
        entry.image = Some("https://example.com/cover.png".to_string());
        entry.category = Some("website".to_string());
        entry.author = Some("Jane".to_string());
        entry.site_name = Some("Example".to_string());
        entry.published = parse_datetime("2024-02-01");

        let feed = render(&config(), &entries);
        let entry = &feed.entries()[0];

        assert_eq!(entry.title().as_str(), "About us");
        assert_eq!(entry.summary().map(|s| s.as_str()), Some("Who we are"));
        assert_eq!(entry.authors()[0].name(), "Jane");
        assert_eq!(
            entry.published().map(|d| d.to_rfc3339()).as_deref(),
            Some("2024-02-01T00:00:00+00:00")
        );

        let enclosure = entry.links().iter().find(|l| l.rel() == "enclosure").unwrap();
        assert_eq!(enclosure.href(), "https://example.com/cover.png");

        assert_eq!(entry.categories()[0].term(), "website");
        assert_eq!(entry.categories()[0].scheme(), Some(OGP_SCHEME));

        let source = entry.source().unwrap();
        assert_eq!(source.title().as_str(), "Example");
        assert_eq!(source.id(), "https://example.com/");
    }

    #[test]
    fn test_escapes_text() {
        let mut entries = entries(&[UrlRecord::new("https://example.com/?a=1&b=2")]);
        entries[0].title = "Fish & <Chips>".to_string();

        let meta = FeedMeta::resolve(&config(), &entries, now());
        let xml = String::from_utf8(render_atom(&meta, &entries, false).unwrap()).unwrap();
        assert!(xml.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(xml.contains("a=1&amp;b=2"));

        let feed = Feed::read_from(xml.as_bytes()).unwrap();
        assert_eq!(feed.entries()[0].id(), "https://example.com/?a=1&b=2");
    }

    #[test]
    fn test_minify() {
        let entries = entries(&[UrlRecord::new("https://example.com/a")]);
        let meta = FeedMeta::resolve(&config(), &entries, now());

        let pretty = render_atom(&meta, &entries, false).unwrap();
        let minified = render_atom(&meta, &entries, true).unwrap();
        assert!(pretty.windows(5).any(|w| w == b"\n    "));
        assert!(!minified.windows(2).any(|w| w == b"\n "));
        assert!(minified.len() < pretty.len());

        let feed = Feed::read_from(&minified[..]).unwrap();
        assert_eq!(feed.entries()[0].id(), "https://example.com/a");
        assert_eq!(feed.entries()[0].title().as_str(), "a");
    }

    #[test]
    fn test_minify_keeps_multiline_text() {
        let mut config = config();
        config.feed.title = "Title\nSecond".to_string();
        config.feed.subtitle = Some("Line one\n    indented two".to_string());
        let mut entries = entries(&[UrlRecord::new("https://example.com/a")]);
        entries[0].summary = Some("first\n  second".to_string());
        let meta = FeedMeta::resolve(&config, &entries, now());

        for minify in [false, true] {
            let xml = render_atom(&meta, &entries, minify).unwrap();
            let feed = Feed::read_from(&xml[..]).unwrap();
            assert_eq!(feed.title().as_str(), "Title\nSecond");
            assert_eq!(
                feed.subtitle().map(|s| s.as_str()),
                Some("Line one\n    indented two")
            );
            assert_eq!(
                feed.entries()[0].summary().map(|s| s.as_str()),
                Some("first\n  second")
            );
        }
    }

    #[test]
    fn test_origin() {
        assert_eq!(
            origin("https://example.com/sitemap.xml").as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(
            origin("http://localhost:8080/a/b").as_deref(),
            Some("http://localhost:8080/")
        );
        assert_eq!(origin("not a url"), None);
    }
}

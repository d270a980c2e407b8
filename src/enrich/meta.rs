//! OpenGraph / Twitter Card metadata extraction.
//!
//! Reads `<meta property="og:*">`, `<meta name="twitter:*">`, the plain
//! `<meta name="description">` and the document `<title>`.

use crate::utils::date::parse_datetime;
use atom_syndication::FixedDateTime;
use quick_xml::escape::unescape;
use std::{borrow::Cow, collections::HashMap};
use url::Url;

/// Metadata found in one page, after fallbacks are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute image URL.
    pub image: Option<String>,
    pub site_name: Option<String>,
    /// `og:type`, e.g. `article`.
    pub kind: Option<String>,
    pub published: Option<FixedDateTime>,
    pub modified: Option<FixedDateTime>,
    pub author: Option<String>,
}

/// Extract metadata from `html`, resolving relative URLs against `page_url`.
pub fn extract(html: &str, page_url: &Url) -> PageMetadata {
    let tags = MetaTags::parse(html);

    let site_name = tags
        .first(&["og:site_name", "twitter:site"])
        .or_else(|| page_url.host_str().map(str::to_string));

    let author = tags
        .first(&["article:author", "twitter:creator"])
        .or_else(|| site_name.clone());

    PageMetadata {
        title: tags
            .first(&["og:title", "twitter:title"])
            .or_else(|| tags.title.clone()),
        description: tags.first(&["og:description", "twitter:description", "description"]),
        image: tags
            .first(&["og:image", "twitter:image"])
            .and_then(|image| page_url.join(&image).ok())
            .map(String::from),
        kind: tags.first(&["og:type"]),
        published: tags
            .first(&["article:published_time"])
            .and_then(|s| parse_datetime(&s)),
        modified: tags
            .first(&["article:modified_time"])
            .and_then(|s| parse_datetime(&s)),
        site_name,
        author,
    }
}

/// Raw meta tag values keyed by lowercase `property`/`name`.
#[derive(Debug, Default)]
struct MetaTags {
    values: HashMap<String, String>,
    title: Option<String>,
}

impl MetaTags {
    fn parse(html: &str) -> Self {
        let mut tags = Self::default();
        let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
            return tags;
        };
        let parser = dom.parser();

        for node in dom.nodes() {
            let Some(tag) = node.as_tag() else {
                continue;
            };
            let name = tag.name().as_utf8_str();

            if name.eq_ignore_ascii_case("meta") {
                let mut key = None;
                let mut content = None;
                for (attr, value) in tag.attributes().iter() {
                    let attr: &str = attr.as_ref();
                    if attr.eq_ignore_ascii_case("property") || attr.eq_ignore_ascii_case("name") {
                        key = key.or_else(|| value.map(|v| v.trim().to_ascii_lowercase()));
                    } else if attr.eq_ignore_ascii_case("content") {
                        content = value.map(|v| v.to_string());
                    }
                }
                if let (Some(key), Some(content)) = (key, content.as_deref().and_then(clean_text)) {
                    // First occurrence wins, as in most consumers.
                    tags.values.entry(key).or_insert(content);
                }
            } else if name.eq_ignore_ascii_case("title") && tags.title.is_none() {
                tags.title = clean_text(&tag.inner_text(parser));
            }
        }

        tags
    }

    fn first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.values.get(*key).cloned())
    }
}

/// Unescape entities and collapse whitespace. Empty results become `None`.
fn clean_text(raw: &str) -> Option<String> {
    let unescaped = unescape(raw).unwrap_or(Cow::Borrowed(raw));
    let text = unescaped.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

//! Enriched sitemap generation.
//!
//! Re-emits the input sitemap with the values the feed resolved, plus a few
//! derived fields under a private namespace.
//!
//! # Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:s2a="urn:sitemap2atom:enriched:1">
//!   <url>
//!     <loc>https://example.com/page1</loc>
//!     <lastmod>2024-01-01T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.5</priority>
//!     <s2a:title>page1</s2a:title>
//!     <s2a:lastmod-source>sitemap</s2a:lastmod-source>
//!   </url>
//! </urlset>
//! ```

use super::escape_xml;
use crate::{
    feed::FeedEntry,
    sitemap::{SITEMAP_NS, UrlRecord},
    utils::date::to_rfc3339,
};

/// Namespace of the derived `s2a:*` elements.
pub const ENRICHED_NS: &str = "urn:sitemap2atom:enriched:1";

/// Render the enriched sitemap. `records` and `entries` are index-aligned.
pub fn render_sitemap(records: &[UrlRecord], entries: &[FeedEntry], minify: bool) -> Vec<u8> {
    EnrichedSitemap {
        records,
        entries,
        pretty: !minify,
    }
    .into_xml()
    .into_bytes()
}

struct EnrichedSitemap<'a> {
    records: &'a [UrlRecord],
    entries: &'a [FeedEntry],
    /// Newlines and indentation between elements. Text is never altered.
    pretty: bool,
}

impl EnrichedSitemap<'_> {
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 * (self.entries.len() + 1));

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        self.newline(&mut xml);
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\" xmlns:s2a=\"");
        xml.push_str(ENRICHED_NS);
        xml.push_str("\">");
        self.newline(&mut xml);

        for (record, entry) in self.records.iter().zip(self.entries) {
            self.indent(&mut xml, 1);
            xml.push_str("<url>");
            self.newline(&mut xml);
            self.push_element(&mut xml, "loc", &entry.link);
            self.push_element(&mut xml, "lastmod", &to_rfc3339(&entry.updated));
            if let Some(freq) = record.change_frequency {
                self.push_element(&mut xml, "changefreq", freq.as_str());
            }
            if let Some(priority) = record.priority {
                self.push_element(&mut xml, "priority", &priority.to_string());
            }
            self.push_element(&mut xml, "s2a:title", &entry.title);
            self.push_element(&mut xml, "s2a:lastmod-source", entry.updated_source.as_str());
            if let Some(description) = &entry.summary {
                self.push_element(&mut xml, "s2a:description", description);
            }
            self.indent(&mut xml, 1);
            xml.push_str("</url>");
            self.newline(&mut xml);
        }

        xml.push_str("</urlset>");
        self.newline(&mut xml);
        xml
    }

    fn push_element(&self, xml: &mut String, name: &str, value: &str) {
        self.indent(xml, 2);
        xml.push('<');
        xml.push_str(name);
        xml.push('>');
        xml.push_str(&escape_xml(value));
        xml.push_str("</");
        xml.push_str(name);
        xml.push('>');
        self.newline(xml);
    }

    #[inline]
    fn newline(&self, xml: &mut String) {
        if self.pretty {
            xml.push('\n');
        }
    }

    #[inline]
    fn indent(&self, xml: &mut String, depth: usize) {
        if self.pretty {
            xml.extend(std::iter::repeat_n("  ", depth));
        }
    }
}

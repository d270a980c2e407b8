//! Sitemap input: the `<urlset>` data model and its parser.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.5</priority>
//!   </url>
//! </urlset>
//! ```

mod parse;
mod record;

pub use parse::{ParseError, parse_sitemap};
pub use record::{ChangeFrequency, UrlRecord};

/// Namespace of the sitemap protocol.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitemap2atom.toml`:
//!
//! | Module    | TOML Section | Purpose                                 |
//! |-----------|--------------|-----------------------------------------|
//! | `source`  | `[source]`   | Sitemap URL, timeout, user agent, limit |
//! | `feed`    | `[feed]`     | Atom feed path and metadata             |
//! | `sitemap` | `[sitemap]`  | Enriched sitemap path                   |
//! | `enrich`  | `[enrich]`   | Per-page metadata extraction            |
//! | `build`   | `[build]`    | Minification, fixed clock               |

mod build;
mod enrich;
mod feed;
mod sitemap;
mod source;

pub use build::BuildConfig;
pub use enrich::EnrichConfig;
pub use feed::FeedConfig;
pub use sitemap::SitemapConfig;
pub use source::SourceConfig;

//! Feed entries: what each sitemap URL becomes in the Atom feed.

mod entry;
mod title;

pub use entry::{FeedEntry, MappingError, UpdatedSource, map_records};

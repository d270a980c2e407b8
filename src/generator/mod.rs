//! Output document generators.
//!
//! Renders the two documents of a run in memory:
//!
//! - **Atom**: the feed, one `<entry>` per sitemap URL
//! - **Sitemap**: the input sitemap re-emitted with resolved and derived fields
//!
//! Both render either indented or compact; compact output never rewrites
//! text content. Nothing here touches the filesystem; see `output` for the
//! commit step.

pub mod atom;
pub mod sitemap;

use std::borrow::Cow;

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }
}

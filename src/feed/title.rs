//! Human-readable titles derived from page URLs.

use percent_encoding::percent_decode_str;
use url::Url;

/// Longest suffix treated as a file extension (`.html`, `.php`, `.aspx`).
const MAX_EXTENSION_LEN: usize = 5;

/// Derive an entry title from its URL.
///
/// Uses the last non-empty path segment, percent-decoded, with the file
/// extension dropped and `-`/`_` turned into spaces. Falls back to the host
/// for root URLs, and to the input itself when it is not a URL.
///
/// ```ignore
/// derive_title("https://example.com/blog/hello-world.html") // "hello world"
/// derive_title("https://example.com/")                      // "example.com"
/// ```
pub fn derive_title(location: &str) -> String {
    let Ok(url) = Url::parse(location) else {
        return location.to_string();
    };

    let host = || {
        url.host_str()
            .map(str::to_string)
            .unwrap_or_else(|| location.to_string())
    };

    let Some(segment) = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
    else {
        return host();
    };

    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    let stem = strip_extension(&decoded);
    let title = stem
        .split(['-', '_'])
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() { host() } else { title }
}

fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.bytes().all(|b| b.is_ascii_alphabetic()) =>
        {
            stem
        }
        _ => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment() {
        assert_eq!(derive_title("https://example.com/page1"), "page1");
        assert_eq!(derive_title("https://example.com/blog/my-first_post/"), "my first post");
    }

    #[test]
    fn test_strips_extension() {
        assert_eq!(derive_title("https://example.com/blog/hello-world.html"), "hello world");
        assert_eq!(derive_title("https://example.com/v1.2"), "v1.2");
        assert_eq!(derive_title("https://example.com/.well-known"), ".well known");
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(derive_title("https://example.com/caf%C3%A9-au-lait"), "café au lait");
        assert_eq!(derive_title("https://example.com/a%20b"), "a b");
    }

    #[test]
    fn test_ignores_query_and_fragment() {
        assert_eq!(derive_title("https://example.com/news/story?id=3#top"), "story");
    }

    #[test]
    fn test_root_falls_back_to_host() {
        assert_eq!(derive_title("https://example.com/"), "example.com");
        assert_eq!(derive_title("https://example.com"), "example.com");
        assert_eq!(derive_title("https://example.com/---/"), "example.com");
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(derive_title("relative/path"), "relative/path");
    }
}

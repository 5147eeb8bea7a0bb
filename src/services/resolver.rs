// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use url::Url;

/// Resolve a relative URL against a base URL.
///
/// Falls back to the reference unchanged when either side cannot be parsed,
/// so a single malformed link never aborts extraction.
pub fn resolve_url(base_url: &str, href: &str) -> String {
    let Ok(base) = Url::parse(base_url) else {
        return href.to_string();
    };

    base.join(href)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(resolve_url("http://h/p/", "/x"), "http://h/x");
    }

    #[test]
    fn test_resolve_path_relative() {
        assert_eq!(
            resolve_url("http://ex.com/p/", "a.html"),
            "http://ex.com/p/a.html"
        );
        assert_eq!(
            resolve_url("http://ex.com/p/index.html", "../up.html"),
            "http://ex.com/up.html"
        );
    }

    #[test]
    fn test_resolve_scheme_relative() {
        assert_eq!(
            resolve_url("https://ex.com/", "//cdn.ex.com/img.png"),
            "https://cdn.ex.com/img.png"
        );
    }

    #[test]
    fn test_absolute_reference_wins() {
        assert_eq!(
            resolve_url("http://ex.com/p/", "https://other.org/q?x=1"),
            "https://other.org/q?x=1"
        );
    }

    #[test]
    fn test_fragment_and_query_only() {
        assert_eq!(
            resolve_url("http://ex.com/p/page?a=1", "#top"),
            "http://ex.com/p/page?a=1#top"
        );
        assert_eq!(
            resolve_url("http://ex.com/p/page?a=1", "?b=2"),
            "http://ex.com/p/page?b=2"
        );
    }

    #[test]
    fn test_unparsable_reference_returned_verbatim() {
        assert_eq!(resolve_url("http://ex.com/", "http://[::1"), "http://[::1");
    }

    #[test]
    fn test_unparsable_base_returns_reference() {
        assert_eq!(resolve_url("not a base", "/x"), "/x");
    }
}

// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Single-pass structural extraction over a parsed HTML tree.

use crate::models::scrape::{Heading, Link, ScrapedResult};
use crate::models::settings::ScraperSettings;
use crate::services::resolver::resolve_url;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Parse raw page bytes and extract the structured summary.
///
/// Invalid UTF-8 is replaced rather than rejected; the HTML parser itself
/// recovers from any malformed markup.
pub fn extract_page(body: &[u8], source_url: &str, settings: &ScraperSettings) -> ScrapedResult {
    let document = Html::parse_document(&String::from_utf8_lossy(body));
    extract(&document, source_url, settings)
}

/// Walk the document once in pre-order and collect title, meta tags, links,
/// images and headings. Relative `href`/`src` values are resolved against
/// `source_url`.
pub fn extract(document: &Html, source_url: &str, settings: &ScraperSettings) -> ScrapedResult {
    let mut result = ScrapedResult::new(source_url);

    // `descendants` is an iterative pre-order walk: every element is visited
    // before its children and nothing is pruned.
    for node in document.tree.root().descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            visit_element(element, &mut result, source_url);
        }
    }

    if settings.debug {
        debug!(
            title = %result.title,
            links = result.links.len(),
            images = result.images.len(),
            headings = result.headings.len(),
            meta_tags = result.meta_tags.len(),
            "Extraction results"
        );
    }

    result
}

fn visit_element(element: ElementRef<'_>, result: &mut ScrapedResult, base_url: &str) {
    match element.value().name() {
        "title" => result.title = text_content(element),
        "meta" => extract_meta_tag(element, result),
        "a" => extract_link(element, result, base_url),
        "img" => extract_image(element, result, base_url),
        name => {
            if let Some(level) = heading_level(name) {
                extract_heading(element, level, result);
            }
        }
    }
}

fn extract_meta_tag(element: ElementRef<'_>, result: &mut ScrapedResult) {
    let meta = MetaAttrs::scan(element.value().attrs());

    if !meta.name.is_empty() {
        result
            .meta_tags
            .insert(meta.name.to_string(), meta.content.to_string());
        match meta.name {
            "description" => result.description = meta.content.to_string(),
            "keywords" => result.keywords = meta.content.to_string(),
            _ => {}
        }
    } else if !meta.property.is_empty() {
        result
            .meta_tags
            .insert(meta.property.to_string(), meta.content.to_string());
    }
}

fn extract_link(element: ElementRef<'_>, result: &mut ScrapedResult, base_url: &str) {
    let Some(href) = first_attr(element.value().attrs(), "href") else {
        return;
    };
    if href.is_empty() {
        return;
    }

    result.links.push(Link {
        href: resolve_url(base_url, href),
        text: text_content(element).trim().to_string(),
    });
}

fn extract_image(element: ElementRef<'_>, result: &mut ScrapedResult, base_url: &str) {
    match first_attr(element.value().attrs(), "src") {
        Some(src) if !src.is_empty() => result.images.push(resolve_url(base_url, src)),
        _ => {}
    }
}

fn extract_heading(element: ElementRef<'_>, level: u8, result: &mut ScrapedResult) {
    let text = text_content(element);
    let text = text.trim();
    if !text.is_empty() {
        result.headings.push(Heading {
            level,
            text: text.to_string(),
        });
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Full flattened text of a subtree, in document order, untrimmed
fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Value of the first attribute named `key`
fn first_attr<'a>(
    mut attrs: impl Iterator<Item = (&'a str, &'a str)>,
    key: &str,
) -> Option<&'a str> {
    attrs.find(|(k, _)| *k == key).map(|(_, v)| v)
}

/// `name`, `property` and `content` of a meta element.
/// The whole attribute list is scanned, so the last occurrence of each key wins.
#[derive(Debug, Default, PartialEq, Eq)]
struct MetaAttrs<'a> {
    name: &'a str,
    property: &'a str,
    content: &'a str,
}

impl<'a> MetaAttrs<'a> {
    fn scan(attrs: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut meta = Self::default();
        for (key, value) in attrs {
            match key {
                "name" => meta.name = value,
                "property" => meta.property = value,
                "content" => meta.content = value,
                _ => {}
            }
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scrape(html: &str, base: &str) -> ScrapedResult {
        extract_page(html.as_bytes(), base, &ScraperSettings::default())
    }

    #[test]
    fn test_full_page_extraction() {
        let html = r#"<html><head><title>T</title></head><body><h1>H</h1><img src="i.png"><a href="a.html">A</a></body></html>"#;
        let result = scrape(html, "http://ex.com/p/");

        assert_eq!(result.url, "http://ex.com/p/");
        assert_eq!(result.title, "T");
        assert_eq!(
            result.headings,
            vec![Heading {
                level: 1,
                text: "H".to_string()
            }]
        );
        assert_eq!(result.images, vec!["http://ex.com/p/i.png".to_string()]);
        assert_eq!(
            result.links,
            vec![Link {
                href: "http://ex.com/p/a.html".to_string(),
                text: "A".to_string()
            }]
        );
    }

    #[test]
    fn test_link_resolved_against_base() {
        let result = scrape(r#"<a href="/x">t</a>"#, "http://h/p/");
        assert_eq!(
            result.links,
            vec![Link {
                href: "http://h/x".to_string(),
                text: "t".to_string()
            }]
        );
    }

    #[test]
    fn test_unresolvable_href_kept_verbatim() {
        let result = scrape(r#"<a href="http://[::1">broken</a>"#, "http://h/p/");
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].href, "http://[::1");
        assert_eq!(result.links[0].text, "broken");
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let result = scrape(
            r#"<a data-href="/z">t</a><a>no href</a><a href="">empty</a>"#,
            "http://h/",
        );
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_link_text_is_trimmed_and_flattened() {
        let result = scrape(
            "<a href=\"/n\">\n  Read <b>the</b> <i>docs</i>  \n</a><a href=\"/e\"><img src=\"/x.png\"></a>",
            "http://h/",
        );
        assert_eq!(result.links[0].text, "Read the docs");
        assert_eq!(result.links[1].text, "");
        assert_eq!(result.images, vec!["http://h/x.png".to_string()]);
    }

    #[test]
    fn test_links_keep_document_order_and_duplicates() {
        let result = scrape(
            r#"<a href="/b">1</a><div><a href="/a">2</a></div><a href="/b">3</a>"#,
            "http://h/",
        );
        let hrefs: Vec<&str> = result.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["http://h/b", "http://h/a", "http://h/b"]);
    }

    #[test]
    fn test_image_without_src_is_skipped() {
        let result = scrape(
            r#"<img alt="nothing"><img src=""><img data-src="/lazy.png">"#,
            "http://h/",
        );
        assert!(result.images.is_empty());
    }

    #[test]
    fn test_meta_last_occurrence_wins() {
        let result = scrape(
            r#"<head><meta name="description" content="A"><meta name="description" content="B"></head>"#,
            "http://h/",
        );
        assert_eq!(result.meta_tags.get("description").map(String::as_str), Some("B"));
        assert_eq!(result.description, "B");
    }

    #[test]
    fn test_meta_name_and_property() {
        let result = scrape(
            r#"<head>
                <meta name="keywords" content="rust, scraping">
                <meta property="og:title" content="OG Title">
                <meta property="description" content="not the description">
                <meta name="author" property="og:author" content="Someone">
                <meta charset="utf-8">
            </head>"#,
            "http://h/",
        );

        assert_eq!(result.keywords, "rust, scraping");
        assert_eq!(result.description, "");
        assert_eq!(result.meta_tags.len(), 4);
        assert_eq!(result.meta_tags["keywords"], "rust, scraping");
        assert_eq!(result.meta_tags["og:title"], "OG Title");
        assert_eq!(result.meta_tags["description"], "not the description");
        assert_eq!(result.meta_tags["author"], "Someone");
        assert!(!result.meta_tags.contains_key("og:author"));
    }

    #[test]
    fn test_meta_without_content_stores_empty_value() {
        let result = scrape(r#"<meta name="robots">"#, "http://h/");
        assert_eq!(result.meta_tags["robots"], "");
    }

    #[test]
    fn test_headings_levels_and_blank_headings_dropped() {
        let result = scrape(
            "<h2>  </h2><h3>Hi</h3><h6> <span>Deep</span> end </h6><h4></h4>",
            "http://h/",
        );
        assert_eq!(
            result.headings,
            vec![
                Heading {
                    level: 3,
                    text: "Hi".to_string()
                },
                Heading {
                    level: 6,
                    text: "Deep end".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_title_is_untrimmed_and_last_wins() {
        let result = scrape(
            "<html><head><title> First </title><title>  Second  </title></head></html>",
            "http://h/",
        );
        assert_eq!(result.title, "  Second  ");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let result = scrape("<p>no title here</p>", "http://h/");
        assert_eq!(result.title, "");
    }

    #[test]
    fn test_nested_elements_are_all_visited() {
        let result = scrape(
            r#"<h1><a href="/in-heading">Linked <img src="/logo.png"> title</a></h1>"#,
            "http://h/",
        );
        assert_eq!(result.headings[0].text, "Linked  title");
        assert_eq!(result.links[0].href, "http://h/in-heading");
        assert_eq!(result.images, vec!["http://h/logo.png".to_string()]);
    }

    #[test]
    fn test_malformed_markup_still_extracts() {
        let result = scrape(
            "<div><p>Intro<h2>Section</div><img src=pic.png><p>tail",
            "http://h/dir/",
        );
        assert_eq!(
            result.headings,
            vec![Heading {
                level: 2,
                text: "Section".to_string()
            }]
        );
        assert_eq!(result.images, vec!["http://h/dir/pic.png".to_string()]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut body = b"<html><head><title>caf".to_vec();
        body.push(0xff);
        body.extend_from_slice(b"</title></head></html>");
        let result = extract_page(&body, "http://h/", &ScraperSettings::default());
        assert_eq!(result.title, "caf\u{fffd}");
    }

    #[test]
    fn test_debug_mode_does_not_change_result() {
        let html = r#"<title>T</title><a href="/a">A</a><meta name="k" content="v">"#;
        let quiet = scrape(html, "http://h/");
        let verbose = extract_page(
            html.as_bytes(),
            "http://h/",
            &ScraperSettings {
                debug: true,
                ..ScraperSettings::default()
            },
        );
        assert_eq!(quiet, verbose);
    }

    #[test]
    fn test_first_attr_takes_first_occurrence() {
        let attrs = vec![("class", "x"), ("href", "/first"), ("href", "/second")];
        assert_eq!(first_attr(attrs.into_iter(), "href"), Some("/first"));
        assert_eq!(first_attr(std::iter::empty(), "href"), None);
    }

    #[test]
    fn test_meta_scan_takes_last_occurrence() {
        let attrs = vec![
            ("name", "first"),
            ("content", "one"),
            ("name", "second"),
            ("property", "og:x"),
            ("content", "two"),
        ];
        assert_eq!(
            MetaAttrs::scan(attrs.into_iter()),
            MetaAttrs {
                name: "second",
                property: "og:x",
                content: "two",
            }
        );
    }
}

//! HTML extraction for crawled pages
//!
//! Two pure functions over raw markup:
//! - `clean_text`: the readable text of the page
//! - `extract_links`: the set of same-site links worth following

use crate::url::{normalize_url, LinkFilter};
use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text is never part of the readable page
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the readable plain text of a page
///
/// Text nodes under `<body>` (or the whole document when there is no body)
/// are joined with single spaces; script, style, noscript and template
/// contents are dropped.
///
/// # Example
///
/// ```
/// use ripple_search::crawler::clean_text;
///
/// let html = "<html><body><h1>Cats</h1><script>var x;</script><p>The cat sat.</p></body></html>";
/// assert_eq!(clean_text(html), "Cats The cat sat.");
/// ```
pub fn clean_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|body| *body)
        .unwrap_or_else(|| document.tree.root());

    let mut words: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let skipped = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name()))
        });
        if !skipped {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Extracts the set of followable links from a page
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` targets that resolve against `base_url`
/// and are accepted by `filter` after normalization.
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links (same page anchors)
///
/// Duplicates collapse because the result is a set.
pub fn extract_links(html: &str, base_url: &Url, filter: &LinkFilter) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(absolute) = resolve_link(href, base_url) else {
            continue;
        };

        match normalize_url(absolute.as_str()) {
            Ok(normalized) if filter.accepts(&normalized) => {
                links.insert(normalized.to_string());
            }
            Ok(_) => {}
            Err(e) => tracing::trace!("Dropping link {}: {}", absolute, e),
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    base_url.join(href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/wiki/Start").unwrap()
    }

    fn filter() -> LinkFilter {
        LinkFilter::new("example.com", "/wiki/", vec![':'])
    }

    fn links(html: &str) -> HashSet<String> {
        extract_links(html, &base_url(), &filter())
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let html = "<html><body><p>The   cat\n\tsat.</p>\n<p>The cat ran fast.</p></body></html>";
        assert_eq!(clean_text(html), "The cat sat. The cat ran fast.");
    }

    #[test]
    fn test_clean_text_skips_scripts_and_styles() {
        let html = r#"<html><head><title>T</title><style>p { color: red }</style></head>
            <body><script>alert('x')</script><p>Visible</p><noscript>Hidden</noscript></body></html>"#;
        assert_eq!(clean_text(html), "Visible");
    }

    #[test]
    fn test_clean_text_ignores_head() {
        let html = "<html><head><title>Title text</title></head><body>Body text</body></html>";
        assert_eq!(clean_text(html), "Body text");
    }

    #[test]
    fn test_clean_text_fragment() {
        assert_eq!(clean_text("Just some <b>bold</b> words"), "Just some bold words");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_extract_relative_and_absolute() {
        let html = r#"<body>
            <a href="/wiki/Cat">Cat</a>
            <a href="Dog">Dog</a>
            <a href="https://example.com/wiki/Bird">Bird</a>
        </body>"#;
        let found = links(html);
        assert_eq!(found.len(), 3);
        assert!(found.contains("https://example.com/wiki/Cat"));
        assert!(found.contains("https://example.com/wiki/Dog"));
        assert!(found.contains("https://example.com/wiki/Bird"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"<body>
            <a href="/wiki/Cat">Cat</a>
            <a href="/wiki/Cat#Behaviour">Cat behaviour</a>
            <a href="https://EXAMPLE.com/wiki/Cat/">Cat again</a>
        </body>"#;
        let found = links(html);
        assert_eq!(found.len(), 1);
        assert!(found.contains("https://example.com/wiki/Cat"));
    }

    #[test]
    fn test_skip_namespaced_and_offsite() {
        let html = r#"<body>
            <a href="/wiki/Talk:Cat">Talk</a>
            <a href="/wiki/File:Cat.jpg">File</a>
            <a href="/w/index.php?title=Cat">Edit</a>
            <a href="https://other.org/wiki/Cat">Elsewhere</a>
            <a href="/wiki/Lion">Lion</a>
        </body>"#;
        let found = links(html);
        assert_eq!(found.len(), 1);
        assert!(found.contains("https://example.com/wiki/Lion"));
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"<body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:test@example.com">Mail</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,<h1>x</h1>">Data</a>
            <a href="Mailto:upper@example.com">Mail</a>
        </body>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_fragment_only_and_download() {
        let html = r##"<body>
            <a href="#section">Jump</a>
            <a href="/wiki/Archive" download>Download</a>
            <a href="">Empty</a>
        </body>"##;
        assert!(links(html).is_empty());
    }
}

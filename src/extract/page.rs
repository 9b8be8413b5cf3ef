// src/extract/page.rs
// =============================================================================
// Turns a fetched HTML body into a PageRecord.
//
// What we pull out of each page:
// - title:           text of the first <h1>
// - lead paragraph:  first <p> inside the first <main>; if that is missing
//                    or has no text, the first <p> anywhere in the document
// - outgoing links:  every <a href>, resolved against the page's own URL
// - image URLs:      every <img src>, resolved the same way
//
// Missing elements give empty values, never errors. An empty title is a
// valid result, different from "extraction failed".
// =============================================================================

use serde::Serialize;
use url::Url;

use super::dom::{self, Document};
use crate::crawl::{NormalizedUrl, UrlNormalizer};
use crate::error::{CrawlError, CrawlResult};

/// One distinct page in the crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Normalized key of the page
    pub url: NormalizedUrl,
    pub title: String,
    pub lead_paragraph: String,
    /// Absolute URLs in document order, duplicates kept
    pub outgoing_links: Vec<String>,
    /// Absolute URLs in document order, duplicates kept
    pub image_urls: Vec<String>,
    /// 1 for the first claim, +1 for every later discovery
    pub visit_count: usize,
}

impl PageRecord {
    /// Registry entry created when a page is first claimed, before its
    /// content is known
    pub fn placeholder(url: impl Into<NormalizedUrl>) -> Self {
        Self {
            url: url.into(),
            visit_count: 1,
            ..Self::default()
        }
    }
}

/// Builds a PageRecord from an HTML body and the URL it was fetched from.
///
/// Links and images resolve against `source_url` itself, not the site root,
/// so "intro" on https://example.com/docs/ becomes
/// https://example.com/docs/intro.
///
/// Fails with `CrawlError::Extraction` when `source_url` does not normalize
/// or is not absolute. The returned record's visit_count is 0; the registry
/// keeps its own count when the record is stored.
pub fn extract_page(
    html: &str,
    source_url: &str,
    normalizer: &UrlNormalizer,
) -> CrawlResult<PageRecord> {
    let url = normalizer
        .normalize(source_url)
        .map_err(|e| CrawlError::extraction(source_url, e))?;
    let base = Url::parse(source_url.trim()).map_err(|e| CrawlError::extraction(source_url, e))?;

    let document = Document::parse(html);

    Ok(PageRecord {
        url,
        title: extract_title(&document),
        lead_paragraph: extract_lead_paragraph(&document),
        outgoing_links: extract_links(&document, &base),
        image_urls: extract_images(&document, &base),
        visit_count: 0,
    })
}

pub fn extract_title(document: &Document) -> String {
    dom::select_first(document.root(), "h1")
        .map(dom::text)
        .unwrap_or_default()
}

pub fn extract_lead_paragraph(document: &Document) -> String {
    let root = document.root();
    let in_main = dom::select_first(root, "main")
        .and_then(|main| dom::select_first(main, "p"))
        .map(dom::text)
        .unwrap_or_default();
    if !in_main.is_empty() {
        return in_main;
    }

    // No usable paragraph in <main>: take the first one in the document
    dom::select_first(root, "p")
        .map(dom::text)
        .unwrap_or_default()
}

pub fn extract_links(document: &Document, base: &Url) -> Vec<String> {
    resolve_attribute(document, base, "a", "href")
}

pub fn extract_images(document: &Document, base: &Url) -> Vec<String> {
    resolve_attribute(document, base, "img", "src")
}

// Elements without the attribute are skipped; values that fail to resolve
// are skipped too, so one bad link never fails the page.
fn resolve_attribute(document: &Document, base: &Url, tag: &str, attribute: &str) -> Vec<String> {
    dom::select_all(document.root(), tag)
        .into_iter()
        .filter_map(|element| dom::attr(element, attribute))
        .filter_map(|value| {
            let resolved = dom::resolve(base, value);
            if resolved.is_none() {
                log::debug!("skipping unresolvable {} '{}' on {}", attribute, value, base);
            }
            resolved
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> UrlNormalizer {
        UrlNormalizer::new("blog.boot.dev")
    }

    fn title_of(html: &str) -> String {
        extract_title(&Document::parse(html))
    }

    fn lead_of(html: &str) -> String {
        extract_lead_paragraph(&Document::parse(html))
    }

    #[test]
    fn test_title() {
        assert_eq!(title_of("<html><body><h1>Test Title</h1></body></html>"), "Test Title");
        assert_eq!(title_of("<html><body><h2>Not H1</h2></body></html>"), "");
        assert_eq!(title_of("<h1>First</h1><h1>Second</h1>"), "First");
        assert_eq!(title_of("<h1>No closing tag"), "No closing tag");
        assert_eq!(title_of(""), "");
        assert_eq!(
            title_of("<h1>Title <span>with</span> nested</h1>"),
            "Title with nested"
        );
    }

    #[test]
    fn test_lead_paragraph_prefers_main() {
        let html = r#"<html><body>
            <p>Outside paragraph.</p>
            <main><p>Main paragraph.</p></main>
        </body></html>"#;
        assert_eq!(lead_of(html), "Main paragraph.");
    }

    #[test]
    fn test_lead_paragraph_falls_back_when_main_has_no_paragraph() {
        let html = r#"<html><body>
            <p>Outside paragraph.</p>
            <main><div>No paragraphs here</div></main>
        </body></html>"#;
        assert_eq!(lead_of(html), "Outside paragraph.");
    }

    #[test]
    fn test_lead_paragraph_other_cases() {
        assert_eq!(lead_of("<p>First.</p><p>Second.</p>"), "First.");
        assert_eq!(lead_of("<div>No paragraphs</div>"), "");
        assert_eq!(lead_of("<main><div><p>Nested paragraph</p></div></main>"), "Nested paragraph");
        assert_eq!(
            lead_of("<main><p>First main</p></main><main><p>Second main</p></main>"),
            "First main"
        );
    }

    #[test]
    fn test_lead_paragraph_falls_back_when_main_paragraph_is_empty() {
        assert_eq!(lead_of("<p>Outside</p><main><p></p></main>"), "Outside");
        assert_eq!(lead_of("<main><p></p><p>Second</p></main>"), "");
        // whitespace is text, so it is kept
        assert_eq!(lead_of("<p>Outside</p><main><p> </p></main>"), " ");
    }

    #[test]
    fn test_links_resolve_against_page_url() {
        let doc = Document::parse(
            r#"<a href="/about">About</a><a href="intro">Intro</a><a href="https://other.com/x">X</a>"#,
        );
        let base = Url::parse("https://blog.boot.dev/docs/").unwrap();
        assert_eq!(
            extract_links(&doc, &base),
            vec![
                "https://blog.boot.dev/about",
                "https://blog.boot.dev/docs/intro",
                "https://other.com/x",
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let doc = Document::parse(r#"<a>No href</a><a href="/a">A</a><a href="/a">A again</a>"#);
        let base = Url::parse("https://blog.boot.dev").unwrap();
        assert_eq!(
            extract_links(&doc, &base),
            vec!["https://blog.boot.dev/a", "https://blog.boot.dev/a"]
        );
    }

    #[test]
    fn test_images() {
        let doc = Document::parse(r#"<img src="/logo.png"><img alt="No src"><img src="/banner.jpg">"#);
        let base = Url::parse("https://blog.boot.dev").unwrap();
        assert_eq!(
            extract_images(&doc, &base),
            vec!["https://blog.boot.dev/logo.png", "https://blog.boot.dev/banner.jpg"]
        );
    }

    #[test]
    fn test_malformed_link_is_skipped() {
        let doc = Document::parse(r#"<a href="http://[::1">bad</a><a href="/ok">ok</a>"#);
        let base = Url::parse("https://blog.boot.dev").unwrap();
        assert_eq!(extract_links(&doc, &base), vec!["https://blog.boot.dev/ok"]);
    }

    #[test]
    fn test_extract_page() {
        let html = r#"<html><body>
            <h1>Test Title</h1>
            <main><p>Main paragraph content</p></main>
            <a href="/about">About</a>
            <img src="/logo.png" alt="Logo">
        </body></html>"#;
        let page = extract_page(html, "https://blog.boot.dev/path", &normalizer()).unwrap();
        assert_eq!(
            page,
            PageRecord {
                url: "blog.boot.dev/path".to_string(),
                title: "Test Title".to_string(),
                lead_paragraph: "Main paragraph content".to_string(),
                outgoing_links: vec!["https://blog.boot.dev/about".to_string()],
                image_urls: vec!["https://blog.boot.dev/logo.png".to_string()],
                visit_count: 0,
            }
        );
    }

    #[test]
    fn test_extract_page_with_missing_elements() {
        let page = extract_page("<div>nothing</div>", "https://blog.boot.dev", &normalizer()).unwrap();
        assert_eq!(page.url, "blog.boot.dev");
        assert!(page.title.is_empty());
        assert!(page.lead_paragraph.is_empty());
        assert!(page.outgoing_links.is_empty());
        assert!(page.image_urls.is_empty());
    }

    #[test]
    fn test_extract_page_rejects_bad_source_url() {
        let result = extract_page("<h1>x</h1>", "   ", &normalizer());
        assert!(matches!(result, Err(CrawlError::Extraction { .. })));

        // normalizes fine but is not absolute, so links cannot be resolved
        let result = extract_page("<h1>x</h1>", "/docs", &normalizer());
        assert!(matches!(result, Err(CrawlError::Extraction { .. })));
    }

    #[test]
    fn test_placeholder() {
        let page = PageRecord::placeholder("blog.boot.dev/a");
        assert_eq!(page.visit_count, 1);
        assert!(page.title.is_empty());
    }
}

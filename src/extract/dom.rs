// src/extract/dom.rs
// =============================================================================
// Small DOM query helpers on top of the `scraper` crate.
//
// Page extraction only needs four things from an HTML document:
// - find elements by tag name below some element
// - read an attribute (and know whether it exists)
// - collect an element's text
// - resolve an href/src against the page URL
//
// Note: scraper's Html is not Send, so a Document must be parsed, queried and
// dropped inside one synchronous call. Never hold one across an .await.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML body.
    ///
    /// html5ever recovers from malformed markup the way a browser does
    /// ("<h1>No closing tag" still yields an h1), so parsing never fails.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// The <html> element; every query starts here
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

// Tag names are plain identifiers, so parsing only fails for garbage input.
// Treat that as "matches nothing".
fn tag_selector(tag: &str) -> Option<Selector> {
    Selector::parse(tag).ok()
}

/// All descendants of `scope` with the given tag name, in document order.
pub fn select_all<'a>(scope: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    let Some(selector) = tag_selector(tag) else {
        return Vec::new();
    };
    let elements = scope.select(&selector).collect();
    elements
}

/// First descendant of `scope` with the given tag name.
pub fn select_first<'a>(scope: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    let selector = tag_selector(tag)?;
    let first = scope.select(&selector).next();
    first
}

/// Attribute value, or None when the attribute is absent.
/// An attribute that is present but empty comes back as Some("").
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// All text below `element`, concatenated without trimming.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Resolves a possibly relative reference against `base`.
///
/// Examples with base = "https://example.com/docs/page":
///   "/about"   -> "https://example.com/about"
///   "intro"    -> "https://example.com/docs/intro"
///   "https://other.com/x" -> unchanged
pub fn resolve(base: &Url, reference: &str) -> Option<String> {
    base.join(reference).ok().map(String::from)
}

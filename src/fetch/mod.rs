// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawl engine only knows about the Fetcher trait. The real
// implementation (HttpFetcher) uses reqwest; tests plug in an in-memory
// fetcher so whole crawls can run without a network.
//
// Rust concepts:
// - Trait objects: Arc<dyn Fetcher> lets the engine work with any fetcher
// - BoxFuture: async methods in a trait object need a boxed, pinned future
// =============================================================================

mod http;

use futures::future::BoxFuture;

use crate::error::CrawlResult;

pub use http::HttpFetcher;

/// Downloads the HTML body of a page.
///
/// Implementations must fail with `CrawlError::Fetch` on network errors,
/// 4xx/5xx statuses and non-HTML content types, and must return the whole
/// body, not a stream.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, CrawlResult<String>>;
}

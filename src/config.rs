// src/config.rs
// =============================================================================
// Crawl configuration.
//
// One CrawlConfig describes one crawl: where it starts, which host it is
// allowed to visit, and how much work it may do. The engine receives it
// wrapped in an Arc and hands a clone of that Arc to every task, so there is
// no process-wide state and two crawls can run side by side.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::crawl::{host_key, UrlNormalizer};
use crate::error::{CrawlError, CrawlResult};

/// Header value sent with every page request
pub const DEFAULT_USER_AGENT: &str = "BootCrawler/1.0";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Canonical https:// form of the seed URL
    pub seed_url: Url,
    /// Host (and non-default port) every crawled page must share
    pub seed_host: String,
    /// Ceiling on the number of pages claimed in the registry
    pub max_pages: usize,
    /// Maximum number of tasks fetching at the same time
    pub concurrency: usize,
    pub user_agent: String,
    /// Per-request timeout; None means a request may wait forever
    pub request_timeout: Option<Duration>,
}

impl CrawlConfig {
    /// Builds a configuration from a user supplied seed.
    ///
    /// A seed without a scheme ("example.com/docs") is treated as https.
    /// Fails when the seed is not an http(s) URL with a host, or when either
    /// ceiling is zero.
    pub fn new(seed: &str, max_pages: usize, concurrency: usize) -> CrawlResult<Self> {
        if max_pages == 0 {
            return Err(CrawlError::invalid_url(seed, "max pages must be at least 1"));
        }
        if concurrency == 0 {
            return Err(CrawlError::invalid_url(seed, "concurrency must be at least 1"));
        }

        let trimmed = seed.trim();
        if trimmed.is_empty() {
            return Err(CrawlError::invalid_url(seed, "url cannot be blank"));
        }

        let with_scheme = if has_scheme(trimmed) {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed.trim_start_matches('/'))
        };

        let parsed = Url::parse(&with_scheme).map_err(|e| CrawlError::invalid_url(seed, e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CrawlError::invalid_url(seed, "only http and https seeds can be crawled"));
        }
        let seed_host =
            host_key(&parsed).ok_or_else(|| CrawlError::invalid_url(seed, "url has no host"))?;

        let normalized = UrlNormalizer::new(seed_host.clone()).normalize(&with_scheme)?;
        let seed_url = Url::parse(&format!("https://{}", normalized))
            .map_err(|e| CrawlError::invalid_url(seed, e))?;

        Ok(Self {
            seed_url,
            seed_host,
            max_pages,
            concurrency,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: None,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Normalizer bound to this crawl's seed host
    pub fn normalizer(&self) -> UrlNormalizer {
        UrlNormalizer::new(self.seed_host.clone())
    }

    /// True when `raw` is an absolute http(s) URL on the seed's host.
    ///
    /// Relative references and other schemes (mailto:, javascript:) are out
    /// of scope; discovered links are always resolved to absolute URLs
    /// before they reach this check.
    pub fn in_scope(&self, raw: &str) -> bool {
        match Url::parse(raw.trim()) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                host_key(&url).as_deref() == Some(self.seed_host.as_str())
            }
            _ => false,
        }
    }
}

// "scheme://" at the very start; a "://" later on (say in a query value)
// does not count
fn has_scheme(raw: &str) -> bool {
    match raw.find("://") {
        Some(end) => !raw[..end].contains(|c: char| matches!(c, '/' | '?' | '#')),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canonicalizes_seed() {
        let config = CrawlConfig::new("http://Blog.Boot.dev/path/", 10, 2).unwrap();
        assert_eq!(config.seed_url.as_str(), "https://blog.boot.dev/path");
        assert_eq!(config.seed_host, "blog.boot.dev");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_seed_without_scheme() {
        let config = CrawlConfig::new("example.com/docs", 5, 1).unwrap();
        assert_eq!(config.seed_url.as_str(), "https://example.com/docs");
        assert_eq!(config.seed_host, "example.com");
    }

    #[test]
    fn test_seed_without_scheme_containing_a_url() {
        let config = CrawlConfig::new("example.com/r?to=https://x", 5, 1).unwrap();
        assert_eq!(config.seed_url.as_str(), "https://example.com/r?to=https://x");
        assert_eq!(config.seed_host, "example.com");

        let config = CrawlConfig::new("example.com/go/https://other.com", 5, 1).unwrap();
        assert_eq!(config.seed_host, "example.com");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("ftp://example.com"));
        assert!(!has_scheme("example.com"));
        assert!(!has_scheme("example.com/r?to=https://x"));
        assert!(!has_scheme("example.com?to=https://x"));
    }

    #[test]
    fn test_rejects_bad_seeds() {
        assert!(CrawlConfig::new("", 5, 1).is_err());
        assert!(CrawlConfig::new("ftp://example.com", 5, 1).is_err());
        assert!(CrawlConfig::new("https://", 5, 1).is_err());
    }

    #[test]
    fn test_rejects_zero_ceilings() {
        assert!(CrawlConfig::new("https://example.com", 0, 1).is_err());
        assert!(CrawlConfig::new("https://example.com", 1, 0).is_err());
    }

    #[test]
    fn test_in_scope() {
        let config = CrawlConfig::new("https://example.com", 5, 1).unwrap();
        assert!(config.in_scope("https://example.com/a"));
        assert!(config.in_scope("http://EXAMPLE.com:443/b"));
        assert!(!config.in_scope("https://other.com/a"));
        assert!(!config.in_scope("https://sub.example.com/a"));
        assert!(!config.in_scope("https://example.com:8080/a"));
        assert!(!config.in_scope("mailto:me@example.com"));
        assert!(!config.in_scope("/relative"));
    }

    #[test]
    fn test_builders() {
        let config = CrawlConfig::new("https://example.com", 5, 1)
            .unwrap()
            .with_user_agent("TestAgent/2.0")
            .with_request_timeout(Duration::from_secs(3));
        assert_eq!(config.user_agent, "TestAgent/2.0");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));
    }
}

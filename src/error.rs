// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Every failure inside a crawl task is one of these variants. None of them
// escape the task that hit them: the engine logs the error and the task ends.
// Only CLI-level problems (bad seed URL, unwritable report) reach main().
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from #[error(...)] attributes
// - Enums with named fields: each variant carries the context needed to log it
// =============================================================================

/// Failures that can happen while crawling a single page
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The URL was blank or could not be parsed
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network failure, error status, or a non-HTML response
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The page could not be turned into a PageRecord
    #[error("failed to extract page data from {url}: {reason}")]
    Extraction { url: String, reason: String },

    /// The registry already holds max_pages entries
    ///
    /// This is the expected steady state near the ceiling, so the engine
    /// treats it as a silent no-op rather than a warning.
    #[error("page ceiling of {max_pages} reached")]
    CapacityExceeded { max_pages: usize },

    /// Writing the CSV report failed
    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),
}

impl CrawlError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        CrawlError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        CrawlError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(url: impl Into<String>, reason: impl ToString) -> Self {
        CrawlError::Extraction {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Shorthand used throughout the crawl and extract modules
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_message() {
        let err = CrawlError::invalid_url("   ", "url cannot be blank");
        assert_eq!(err.to_string(), "invalid url '   ': url cannot be blank");
    }

    #[test]
    fn test_fetch_message_includes_reason() {
        let err = CrawlError::fetch("https://example.com", "response status code: 404");
        assert!(err.to_string().contains("response status code: 404"));
    }

    #[test]
    fn test_capacity_message() {
        let err = CrawlError::CapacityExceeded { max_pages: 3 };
        assert_eq!(err.to_string(), "page ceiling of 3 reached");
    }
}

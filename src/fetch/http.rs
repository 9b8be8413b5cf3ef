// src/fetch/http.rs
// =============================================================================
// Fetches pages over HTTP with reqwest.
//
// Rules for a successful fetch:
// - the request carries our User-Agent header
// - status must be below 400
// - Content-Type must contain "text/html"
// - the body is read completely before returning
//
// Anything else becomes CrawlError::Fetch with a message saying why.
// =============================================================================

use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;

use super::Fetcher;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, CrawlResult};

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Creates a fetcher that uses the config's user agent and timeout.
    ///
    /// The client is built once and shared by every task (connection
    /// pooling); cloning it is cheap.
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to create HTTP client")?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    async fn fetch_html(&self, url: &str) -> CrawlResult<String> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(CrawlError::fetch(
                url,
                format!("response status code: {}", status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("text/html") {
            return Err(CrawlError::fetch(
                url,
                format!("site content not html text: {}", content_type),
            ));
        }

        response.text().await.map_err(|e| CrawlError::fetch(url, e))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, CrawlResult<String>> {
        self.fetch_html(url).boxed()
    }
}

// src/crawl/normalize.rs
// =============================================================================
// This module turns any URL string into a canonical dedupe key.
//
// The key is host + path (+ query), with no scheme, no fragment, no default
// https port and no trailing slash. Two URLs with the same key are treated as
// the same page:
//
//   https://EX.com:443/a/   ->  ex.com/a
//   http://ex.com/a#top     ->  ex.com/a
//   /a                      ->  <seed host>/a
//   /a/../b                 ->  <seed host>/b
//
// Rust concepts:
// - Cow: borrow the input when it can be parsed as-is, allocate only when
//   it needs a scheme prefix
// - strip_suffix/strip_prefix: return Option<&str>, so a missing suffix is
//   handled without panicking
// =============================================================================

use std::borrow::Cow;

use url::Url;

use crate::error::{CrawlError, CrawlResult};

/// Canonical page identity: host + path + optional query, no scheme.
pub type NormalizedUrl = String;

/// Produces normalized keys for one crawl.
///
/// Host-less input (a bare path like `/docs` or `docs/intro`) is attached to
/// `default_host`, which is the crawl's seed host.
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    default_host: String,
}

// The pieces of a URL the normalization rules look at
struct UrlParts {
    host: Option<String>,
    path: String,
    query: Option<String>,
}

impl UrlNormalizer {
    pub fn new(default_host: impl Into<String>) -> Self {
        Self {
            default_host: default_host.into().to_lowercase(),
        }
    }

    /// Normalizes a raw URL into its dedupe key.
    ///
    /// Fails with `CrawlError::InvalidUrl` when the input is blank or cannot
    /// be parsed at all.
    pub fn normalize(&self, raw: &str) -> CrawlResult<NormalizedUrl> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CrawlError::invalid_url(raw, "url cannot be blank"));
        }

        let parts = self.split_url(trimmed).map_err(|e| CrawlError::invalid_url(raw, e))?;

        let mut host = parts
            .host
            .unwrap_or_else(|| self.default_host.clone())
            .to_lowercase();
        if let Some(stripped) = host.strip_suffix(":443") {
            host = stripped.to_string();
        }

        // Only non-hierarchical URLs (mailto: and friends) have a path
        // without a leading slash
        if !parts.path.starts_with('/') {
            host.push('/');
        }
        let mut result = host + trim_one_slash(&parts.path);

        if let Some(query) = parts.query.filter(|q| !q.is_empty()) {
            result.push('?');
            result.push_str(&query);
        }

        Ok(trim_one_slash(&result).to_string())
    }

    // Every input goes through the url crate, so dot segments and percent
    // encoding are handled the same way no matter how the URL was written
    fn split_url(&self, raw: &str) -> Result<UrlParts, url::ParseError> {
        // Protocol-relative links ("//cdn.example.com/x") carry a host, and
        // scheme-less input that starts with our host ("example.com/docs")
        // is that host plus a path
        let candidate: Cow<'_, str> = if raw.starts_with("//") {
            Cow::Owned(format!("https:{}", raw))
        } else if starts_with_host(raw, &self.default_host) {
            Cow::Owned(format!("https://{}", raw))
        } else {
            Cow::Borrowed(raw)
        };

        let parsed = match Url::parse(&candidate) {
            Ok(parsed) => parsed,
            // "/a/../b" or "docs/intro": resolve against the default host's root
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(&format!("https://{}/", self.default_host))?.join(raw)?
            }
            Err(e) => return Err(e),
        };

        Ok(UrlParts {
            host: authority(&parsed),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
        })
    }
}

/// Returns "host" or "host:port" for a URL, with the default https port
/// dropped. Used to decide whether a link stays on the seed's host.
pub fn host_key(url: &Url) -> Option<String> {
    let authority = authority(url)?;
    match authority.strip_suffix(":443") {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(authority),
    }
}

// host_str() is already lower-cased by the url crate for http(s) URLs;
// port() is None when it equals the scheme's default
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

// True when `raw` is `host` followed by the end of the authority
// ("example.com", "example.com/x", "example.com:8080/x"), ignoring case
fn starts_with_host(raw: &str, host: &str) -> bool {
    match raw.get(..host.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(host) => matches!(
            raw[host.len()..].chars().next(),
            None | Some('/' | '?' | '#' | ':')
        ),
        _ => false,
    }
}

fn trim_one_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

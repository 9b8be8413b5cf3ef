// src/crawl/registry.rs
// =============================================================================
// The page registry: every page the crawl has claimed, keyed by normalized
// URL, with a hard ceiling on how many pages it will ever hold.
//
// The registry is the only shared mutable state in a crawl. It decides:
// - whether a task gets to fetch a page (first claim wins)
// - whether there is budget left (max_pages)
// - how many times each page was discovered (visit_count)
//
// All access goes through claim/update/snapshot. Each one takes a std Mutex,
// does a few map operations and releases it. The lock is never held across
// an .await, which is why none of these methods are async.
//
// A task that panicked while holding the lock leaves it poisoned. The map
// itself is still consistent (every critical section is a single insert or
// increment), so we keep using it.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::normalize::NormalizedUrl;
use crate::error::{CrawlError, CrawlResult};
use crate::extract::PageRecord;

#[derive(Debug)]
pub struct PageRegistry {
    pages: Mutex<HashMap<NormalizedUrl, PageRecord>>,
    max_pages: usize,
}

impl PageRegistry {
    pub fn new(max_pages: usize) -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            max_pages,
        }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Tries to reserve `key` for the calling task.
    ///
    /// Returns:
    ///   Ok(true)  - new claim; the caller must now fetch and extract the page
    ///   Ok(false) - already claimed; its visit_count was bumped
    ///   Err(CapacityExceeded) - registry is full, nothing was changed
    ///
    /// Capacity is checked first, so once the ceiling is hit even duplicate
    /// discoveries stop being counted.
    pub fn claim(&self, key: &str, placeholder: PageRecord) -> CrawlResult<bool> {
        let mut pages = self.lock();

        if pages.len() >= self.max_pages {
            return Err(CrawlError::CapacityExceeded {
                max_pages: self.max_pages,
            });
        }

        if let Some(existing) = pages.get_mut(key) {
            existing.visit_count += 1;
            return Ok(false);
        }

        let mut record = placeholder;
        record.url = key.to_string();
        record.visit_count = 1;
        pages.insert(key.to_string(), record);
        Ok(true)
    }

    /// Replaces the content of a claimed page, keeping its visit_count.
    /// Does nothing if `key` was never claimed.
    pub fn update(&self, key: &str, record: PageRecord) {
        let mut pages = self.lock();

        if let Some(existing) = pages.get_mut(key) {
            let visit_count = existing.visit_count;
            *existing = PageRecord {
                url: key.to_string(),
                visit_count,
                ..record
            };
        }
    }

    /// Point-in-time copy of every record
    pub fn snapshot(&self) -> HashMap<NormalizedUrl, PageRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<NormalizedUrl, PageRecord>> {
        self.pages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

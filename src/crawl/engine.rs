// src/crawl/engine.rs
// =============================================================================
// This module runs a crawl.
//
// How it works:
// 1. The driver spawns one task for the seed URL
// 2. Each task: wait for a concurrency slot -> check scope -> normalize ->
//    claim in the registry -> fetch -> extract -> store -> spawn one task
//    per outgoing link
// 3. The driver waits on a join barrier until every task (including the
//    ones spawned by other tasks) has finished
// 4. The registry snapshot is the result
//
// There is no work queue. Parallelism is bounded by a semaphore, total work
// is bounded by the registry's page ceiling, and duplicate work is prevented
// because only the task that wins the claim fetches a page.
//
// Errors never leave a task. A bad URL, failed fetch or failed extraction is
// logged and that task simply ends; its siblings keep going.
//
// Rust concepts:
// - Arc: every task shares the same context (config, registry, limiter)
// - tokio::spawn: children run independently; the parent never waits
// - BoxFuture: a task spawns copies of itself, so its future type must be
//   named (boxed) instead of being an anonymous recursive type
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tokio::sync::Semaphore;

use super::barrier::{BarrierGuard, JoinBarrier};
use super::normalize::{NormalizedUrl, UrlNormalizer};
use super::registry::PageRegistry;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::{extract_page, PageRecord};
use crate::fetch::Fetcher;

/// Everything a crawl task needs, shared by all tasks of one crawl
struct CrawlContext {
    config: CrawlConfig,
    normalizer: UrlNormalizer,
    registry: PageRegistry,
    fetcher: Arc<dyn Fetcher>,
    limiter: Arc<Semaphore>,
    barrier: Arc<JoinBarrier>,
}

/// Result of a finished crawl
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlSummary {
    pub pages: HashMap<NormalizedUrl, PageRecord>,
}

impl CrawlSummary {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Sum of visit counts across all pages
    pub fn total_visits(&self) -> usize {
        self.pages.values().map(|p| p.visit_count).sum()
    }

    /// Records ordered by normalized URL.
    /// The crawl itself has no ordering; this is only for stable output.
    pub fn sorted(&self) -> Vec<&PageRecord> {
        let mut pages: Vec<&PageRecord> = self.pages.values().collect();
        pages.sort_by(|a, b| a.url.cmp(&b.url));
        pages
    }
}

/// Crawls the site described by `config` and returns every claimed page.
///
/// Returns only after every spawned task has finished. Pages whose fetch or
/// extraction failed are still in the result, with empty content, since
/// they used up part of the page budget.
pub async fn crawl_site(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> CrawlSummary {
    // The seed is already in its canonical https:// form
    let seed = config.seed_url.to_string();

    // One barrier per crawl; it counts tasks that have not finished yet
    let barrier = JoinBarrier::new();

    // Everything the tasks share lives in one Arc
    let ctx = Arc::new(CrawlContext {
        normalizer: config.normalizer(),
        registry: PageRegistry::new(config.max_pages),
        limiter: Arc::new(Semaphore::new(config.concurrency)),
        barrier: Arc::clone(&barrier),
        fetcher,
        config,
    });

    log::info!(
        "crawling {} (max pages: {}, concurrency: {})",
        seed,
        ctx.registry.max_pages(),
        ctx.config.concurrency
    );

    // Register the seed task before spawning it, so wait() cannot return early
    let guard = barrier.enter();
    tokio::spawn(crawl_page(Arc::clone(&ctx), seed, guard));

    // Sleeps until the last task (at any depth) drops its guard
    barrier.wait().await;

    // No task is left, so this copy is the final state
    let pages = ctx.registry.snapshot();
    log::info!("crawl finished: {} page(s) claimed", pages.len());
    CrawlSummary { pages }
}

// One crawl task. The guard was registered with the barrier by whoever
// spawned this task and is released when the task ends, however it ends.
fn crawl_page(
    ctx: Arc<CrawlContext>,
    raw_url: String,
    guard: BarrierGuard,
) -> BoxFuture<'static, ()> {
    async move {
        // Bind the guard so it lives until the end of this block
        let _guard = guard;

        // Dispatch: wait for a free slot. Declared after _guard, so the slot
        // is released before the barrier is told this task is done.
        let _permit = match Arc::clone(&ctx.limiter).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                // Only happens if the semaphore was closed
                log::error!("concurrency limiter closed, dropping {}: {}", raw_url, e);
                return;
            }
        };

        // Links to other hosts are dropped without being claimed
        if !ctx.config.in_scope(&raw_url) {
            log::debug!("out of scope: {}", raw_url);
            return;
        }

        // Turn the URL into its registry key
        let key = match ctx.normalizer.normalize(&raw_url) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };

        // Only the first task to claim a key goes on to fetch it
        match ctx.registry.claim(&key, PageRecord::placeholder(key.clone())) {
            Ok(true) => {}
            Ok(false) => {
                // Someone else has it; claim() already bumped the visit count
                log::debug!("already claimed: {}", key);
                return;
            }
            Err(e @ CrawlError::CapacityExceeded { .. }) => {
                // Page budget used up; this is normal near the end of a crawl
                log::debug!("{}, skipping {}", e, key);
                return;
            }
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        }

        // The placeholder stays in the registry if anything below fails
        let fetch_url = format!("https://{}", key);
        let html = match ctx.fetcher.fetch(&fetch_url).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };

        // Parsing is synchronous; the DOM is gone before the next .await
        let record = match extract_page(&html, &raw_url, &ctx.normalizer) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };

        // Keep the links for discovery, then hand the record to the registry
        let links = record.outgoing_links.clone();
        ctx.registry.update(&key, record);
        log::info!("crawled {}", raw_url);

        // Discover: one new task per link, duplicates included, so every
        // discovery is counted by claim()
        for link in links {
            // Count the child before this task can finish
            let child = ctx.barrier.enter();
            tokio::spawn(crawl_page(Arc::clone(&ctx), link, child));
        }
    }
    .boxed()
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does crawl_page return BoxFuture instead of being an async fn?
//    - An async fn returns an anonymous future type
//    - crawl_page spawns crawl_page, so that type would contain itself
//    - .boxed() puts the future on the heap and gives it a nameable type
//
// 2. What does acquire_owned() do?
//    - Waits until the semaphore has a free permit, then takes it
//    - The permit is returned when _permit is dropped (end of the task)
//    - "owned" means the permit holds an Arc to the semaphore, so it can
//      live inside a spawned task
//
// 3. Why `let _guard = guard;` and not `let _ = guard;`?
//    - `_guard` is a real binding: the value lives until the end of scope
//    - `_` drops the value immediately, which would end the task's count
//      on the barrier before the task did any work
//
// 4. Why is the parent the one calling barrier.enter()?
//    - If the child registered itself, the parent could finish first
//    - For a moment the count would be zero and wait() would return early
//
// 5. What is `e @ CrawlError::CapacityExceeded { .. }`?
//    - Matches only that variant, and binds the whole error to `e`
//    - Lets us log it with its Display text at a different level
// -----------------------------------------------------------------------------

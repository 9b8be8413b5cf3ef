// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Pieces, from the bottom up:
// - normalize: canonical dedupe keys for URLs
// - registry:  bounded, lock-protected map of claimed pages
// - barrier:   waits for a tree of self-spawning tasks to finish
// - engine:    the crawl tasks themselves and the driver that runs them
//
// Features:
// - Stays on the seed's host
// - Never fetches the same page twice
// - Hard ceilings on pages claimed and on fetches running at once
// =============================================================================

mod barrier;
mod engine;
mod normalize;
mod registry;

pub use engine::{crawl_site, CrawlSummary};
pub use normalize::{host_key, NormalizedUrl, UrlNormalizer};

// src/extract/mod.rs
// =============================================================================
// This module turns HTML into structured page data.
//
// Submodules:
// - dom:  thin query helpers over the `scraper` crate
// - page: PageRecord and the rules for filling it in
// =============================================================================

mod dom;
mod page;

pub use page::{extract_page, PageRecord};

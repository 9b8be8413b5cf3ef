// src/report/table.rs
// =============================================================================
// Renders a crawl summary for the terminal.
//
// Output is sorted by URL so two runs over the same site are easy to diff,
// even though the crawl itself visits pages in no particular order.
// =============================================================================

use std::fmt::Write;

use crate::crawl::CrawlSummary;

/// One "<url>: <visits>" line per page, then a short summary
pub fn render_table(summary: &CrawlSummary) -> String {
    let mut out = String::new();

    if summary.is_empty() {
        out.push_str("No pages were crawled\n");
        return out;
    }

    for page in summary.sorted() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}: {}", page.url, page.visit_count);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Summary:");
    let _ = writeln!(out, "   📄 Pages: {}", summary.len());
    let _ = writeln!(out, "   🔁 Visits: {}", summary.total_visits());
    out
}

/// Pages as a pretty-printed JSON array, sorted by URL
pub fn render_json(summary: &CrawlSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&summary.sorted())
}

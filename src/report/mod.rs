// src/report/mod.rs
// =============================================================================
// Output for a finished crawl.
//
// Submodules:
// - table: the visit-count listing printed to the terminal, and JSON output
// - csv_export: the spreadsheet export written with --report
// =============================================================================

mod csv_export;
mod table;

pub use csv_export::write_report_file;
pub use table::{render_json, render_table};

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   crawl <SEED_URL> <MAX_PAGES> <CONCURRENCY> [--report FILE] [--json]
//
// clap prints a usage message and exits with a non-zero status when an
// argument is missing or is not a positive integer, so main() never sees
// invalid numbers.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Option<T>: optional flags are None when not given
// =============================================================================

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "crawl",
    version,
    about = "Crawl a website and report every page found on its host",
    long_about = "crawl starts at SEED_URL, follows links that stay on the same host, and \
                  records each page's title, first paragraph, links and images. It stops when \
                  no unvisited pages remain or MAX_PAGES pages have been claimed, then prints \
                  how many times each page was linked."
)]
pub struct Cli {
    /// Website to start from (e.g., https://example.com)
    pub seed_url: String,

    /// Maximum number of distinct pages to crawl
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_pages: usize,

    /// Maximum number of pages fetched at the same time
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: usize,

    /// Write a CSV report of every page to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print the results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Give up on a single request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Show debug logs (every skipped and duplicate link)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter; RUST_LOG still wins when set
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

// src/main.rs
// =============================================================================
// This is the entry point of the crawler.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (operational messages go to stderr)
// 3. Build the crawl configuration and HTTP fetcher
// 4. Run the crawl and print each page with its visit count
// 5. Optionally write the CSV report
// 6. Exit with proper code (0 = crawl completed, 1 = error)
//
// Problems with individual pages (bad links, failed fetches) are only
// logged; they never change the exit code.
//
// Rust concepts used:
// - async/await: the crawl runs many fetches at the same time
// - anyhow::Context: adds a human-readable line on top of a lower-level error
// - Arc: the fetcher is shared by every crawl task
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - per-crawl settings
mod crawl;    // src/crawl/ - the crawl engine
mod error;    // src/error.rs - typed errors for crawl tasks
mod extract;  // src/extract/ - HTML to PageRecord
mod fetch;    // src/fetch/ - downloading pages
mod report;   // src/report/ - terminal, JSON and CSV output

use std::sync::Arc;
use std::time::Duration;

// anyhow::Result lets run() return any error with the ? operator
use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables Cli::parse()

use cli::Cli;
use config::CrawlConfig;
use fetch::HttpFetcher;

// #[tokio::main] builds a multi-threaded runtime and runs main() inside it
#[tokio::main]
async fn main() {
    // Bad or missing arguments make clap print usage and exit right here
    let cli = Cli::parse();

    // Log level comes from -v/-q unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed (even if some pages failed)
//   Err   = invalid seed URL, HTTP client setup or report writing failed
async fn run(cli: Cli) -> Result<i32> {
    // Validate the seed and the two ceilings
    let mut config = CrawlConfig::new(&cli.seed_url, cli.max_pages, cli.concurrency)
        .context("cannot start crawl")?;

    // Optional flags override the defaults
    if let Some(secs) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(agent) = cli.user_agent {
        config = config.with_user_agent(agent);
    }

    // One HTTP client for the whole crawl
    let fetcher = HttpFetcher::new(&config)?;

    println!("🔍 starting crawl of: {}", config.seed_url);

    // Returns once every task has finished
    let summary = crawl::crawl_site(config, Arc::new(fetcher)).await;

    // Print results as JSON or as a visit-count table
    if cli.json {
        println!("{}", report::render_json(&summary)?);
    } else {
        print!("{}", report::render_table(&summary));
    }

    // A report that cannot be written is a failed run
    if let Some(path) = cli.report {
        report::write_report_file(&summary, &path)
            .with_context(|| format!("could not write report to {}", path.display()))?;
        println!("📝 Report written to {}", path.display());
    }

    Ok(0)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is main() not returning Result?
//    - We want exact control over the exit code
//    - std::process::exit(1) for errors, 0 for success
//    - Returning Err from main would always exit with 1 and print Debug output
//
// 2. What is Arc::new(fetcher)?
//    - crawl_site wants an Arc<dyn Fetcher>
//    - Arc<HttpFetcher> turns into Arc<dyn Fetcher> automatically
//    - Tests pass an in-memory fetcher through the same parameter
//
// 3. Why `if let Some(path) = cli.report` without a &?
//    - cli is owned by run(), so we can move the PathBuf out of it
//    - The other fields (like cli.json) were already read above
//
// 4. Where do the log lines go?
//    - env_logger writes to stderr
//    - The results (table, JSON) go to stdout, so they can be piped
// -----------------------------------------------------------------------------

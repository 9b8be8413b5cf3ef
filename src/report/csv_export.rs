// src/report/csv_export.rs
// =============================================================================
// Writes a crawl summary as a CSV file that opens cleanly in a spreadsheet.
//
// Format:
// - starts with a UTF-8 byte-order mark (Excel needs it to detect UTF-8)
// - header: page_url, h1, first_paragraph, outgoing_link_urls, image_urls
// - one row per page, sorted by URL
// - lists (links, images) are joined with ';'
//
// Every I/O and CSV error is returned to the caller. A report that could not
// be fully written is a failure, never a silent success.
// =============================================================================

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::crawl::CrawlSummary;
use crate::error::CrawlResult;

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

const HEADER: [&str; 5] = [
    "page_url",
    "h1",
    "first_paragraph",
    "outgoing_link_urls",
    "image_urls",
];

const LIST_DELIMITER: &str = ";";

/// Writes the report to any writer (a file, or a Vec<u8> in tests)
pub fn write_report<W: Write>(summary: &CrawlSummary, mut out: W) -> CrawlResult<()> {
    out.write_all(BYTE_ORDER_MARK).map_err(csv::Error::from)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for page in summary.sorted() {
        let links = page.outgoing_links.join(LIST_DELIMITER);
        let images = page.image_urls.join(LIST_DELIMITER);
        writer.write_record([
            page.url.as_str(),
            page.title.as_str(),
            page.lead_paragraph.as_str(),
            links.as_str(),
            images.as_str(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report into it
pub fn write_report_file(summary: &CrawlSummary, path: &Path) -> CrawlResult<()> {
    let file = File::create(path).map_err(csv::Error::from)?;
    write_report(summary, file)
}

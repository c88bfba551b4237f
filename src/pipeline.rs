use std::io::Write;

use indicatif::ProgressBar;
use tracing::warn;

use crate::extract::Extractor;
use crate::fetcher::Fetch;
use crate::record::{Record, ResultSet};

/// Fetch and extract each URL in order. Every URL yields exactly one record;
/// a failed fetch becomes a "Request Error" record and the run moves on.
/// One `SUCCESS:`/`ERROR:` line per URL goes to `out`, whether or not the bar is drawn.
pub fn run<F: Fetch, W: Write>(
    fetcher: &F,
    extractor: &Extractor,
    urls: &[String],
    pb: &ProgressBar,
    out: &mut W,
) -> ResultSet {
    urls.iter().fold(ResultSet::default(), |acc, url| {
        let (record, line) = scrape_one(fetcher, extractor, url);
        pb.suspend(|| {
            if let Err(e) = writeln!(out, "{}", line) {
                warn!("Failed to write progress line: {}", e);
            }
        });
        pb.inc(1);
        acc.push(record)
    })
}

/// The record for `url` plus its progress line.
fn scrape_one<F: Fetch>(fetcher: &F, extractor: &Extractor, url: &str) -> (Record, String) {
    match fetcher.fetch(url) {
        Ok(html) => {
            let record = extractor.extract(url, &html);
            let line = format!(
                "SUCCESS: {} | {} | {} | {}",
                url, record.product_name, record.price, record.barcode
            );
            (record, line)
        }
        Err(e) => {
            warn!("Fetch failed for {}: {}", url, e);
            (Record::request_error(url), format!("ERROR: {} | {}", url, e))
        }
    }
}

//! Output module for crawl reports
//!
//! This module handles:
//! - Loading a read-only snapshot of the ledger
//! - Printing the report to stdout
//! - Exporting the report as markdown

mod markdown;
mod report;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use report::{format_report, print_report};

use crate::state::LongestPage;
use crate::storage::{BlobName, Storage};
use crate::LedgerError;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Snapshot of the ledger, ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Number of distinct visited keys
    pub unique_pages: usize,

    /// Pages per subdomain, ordered by subdomain name
    pub subdomains: Vec<(String, u64)>,

    /// The page with the most counted words
    pub longest_page: Option<LongestPage>,

    /// Most frequent words, count descending, ties in first-seen order
    pub top_words: Vec<(String, u64)>,

    /// Latest write to either store
    pub last_updated: Option<DateTime<Utc>>,
}

impl CrawlReport {
    /// Total pages recorded across all subdomains
    pub fn pages_recorded(&self) -> u64 {
        self.subdomains.iter().map(|(_, count)| count).sum()
    }
}

/// Builds a report from storage without modifying it
///
/// # Arguments
///
/// * `storage` - The storage backend holding the ledger
/// * `top_n` - How many of the most frequent words to include
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Successfully loaded snapshot
/// * `Err(LedgerError)` - A store could not be read or decoded
pub fn load_report(storage: &dyn Storage, top_n: usize) -> Result<CrawlReport, LedgerError> {
    let visited = storage.load_visited()?;
    let stats = storage.load_stats()?;

    let last_updated = storage
        .last_updated(BlobName::Visited)?
        .max(storage.last_updated(BlobName::Stats)?);

    // BTreeMap iteration is already ordered by subdomain
    let subdomains = stats
        .subdomain_counts
        .iter()
        .map(|(subdomain, count)| (subdomain.clone(), *count))
        .collect();

    let top_words = stats
        .word_frequency
        .top(top_n)
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();

    Ok(CrawlReport {
        unique_pages: visited.len(),
        subdomains,
        longest_page: stats.longest_page,
        top_words,
        last_updated,
    })
}

/// Loads a report and writes it as markdown
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The report that was written
/// * `Err(LedgerError)` - The ledger could not be read or the file not written
pub fn export_markdown_report(
    storage: &dyn Storage,
    top_n: usize,
    output_path: &Path,
) -> Result<CrawlReport, LedgerError> {
    let report = load_report(storage, top_n)?;
    generate_markdown_report(&report, output_path)?;
    Ok(report)
}

//! Per-page callbacks invoked by the host crawler
//!
//! This module contains the two halves of page processing:
//! - Link extraction: which outbound links are worth following
//! - Statistics recording: what to remember about the page
//!
//! Both halves are independently callable. [`process_page`] runs them in the
//! order the host crawler expects for a single fetched page.

mod aggregator;
mod extractor;
mod page;
mod parser;

pub use aggregator::{PageSummary, StatsAggregator};
pub use extractor::LinkExtractor;
pub use page::PageResponse;
pub use parser::extract_links;

use crate::storage::Storage;
use crate::LedgerError;

/// Result of processing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// Links proposed for the host's frontier
    pub links: Vec<String>,

    /// Statistics contribution, if the page was recorded
    pub summary: Option<PageSummary>,
}

/// Processes a fetched page end to end
///
/// 1. Extracts links (visited-gated, see [`LinkExtractor::extract_links`])
/// 2. Re-checks each link against the scope policy
/// 3. Records statistics for every 200 response with a non-empty body, whether or not
///    the page had been visited before
///
/// # Arguments
///
/// * `storage` - The ledger
/// * `extractor` - Link extractor carrying the scope policy
/// * `aggregator` - Statistics recorder
/// * `url` - The URL the host requested
/// * `response` - The fetch result
///
/// # Returns
///
/// * `Ok(PageOutcome)` - Links to enqueue and the statistics contribution
/// * `Err(LedgerError)` - Storage failed or the requested URL is malformed
pub fn process_page<S: Storage>(
    storage: &mut S,
    extractor: &LinkExtractor,
    aggregator: &StatsAggregator,
    url: &str,
    response: &PageResponse,
) -> Result<PageOutcome, LedgerError> {
    let links = extractor
        .extract_links(storage, url, response)?
        .into_iter()
        .filter(|link| extractor.policy().is_in_scope(link))
        .collect();

    let summary = aggregator.record_response(storage, url, response)?;

    Ok(PageOutcome { links, summary })
}

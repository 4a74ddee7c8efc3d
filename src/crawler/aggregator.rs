//! Page statistics recording
//!
//! Folds each fetched page into the cumulative statistics store: word
//! frequencies, pages per subdomain, and the longest page seen.

use crate::crawler::PageResponse;
use crate::storage::Storage;
use crate::text::{count_words, tokenize, visible_text};
use crate::url::{parse_url, subdomain_key};
use crate::{LedgerError, UrlError};

/// What recording a single page contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// URL the page was recorded under
    pub url: String,

    /// Subdomain key the page was counted toward
    pub subdomain: String,

    /// Counted words on the page
    pub word_count: u64,

    /// Distinct counted words on the page
    pub distinct_words: usize,

    /// Whether the page became the longest page
    pub new_longest: bool,
}

/// Accumulates page statistics into the ledger
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Records one fetched page
    ///
    /// Recording does not consult the visited set: a page whose links were
    /// already extracted is still counted again if the host records it again.
    ///
    /// # Arguments
    ///
    /// * `storage` - The ledger holding the statistics store
    /// * `url` - The URL the host requested
    /// * `body` - Raw page content
    ///
    /// # Returns
    ///
    /// * `Ok(PageSummary)` - The page was merged into the statistics
    /// * `Err(LedgerError)` - The URL has no host or storage failed
    pub fn record_page<S: Storage>(
        &self,
        storage: &mut S,
        url: &str,
        body: &[u8],
    ) -> Result<PageSummary, LedgerError> {
        let parsed = parse_url(url)?;
        let subdomain = subdomain_key(&parsed).ok_or(UrlError::MissingDomain)?;

        let text = visible_text(&String::from_utf8_lossy(body));
        let page = count_words(tokenize(&text));

        let new_longest = storage.update_stats(|stats| {
            stats.word_frequency.merge(&page.frequencies);
            stats.record_subdomain(&subdomain);
            stats.offer_longest_page(url, page.total)
        })?;

        if new_longest {
            tracing::info!("New longest page: {} ({} words)", url, page.total);
        }
        tracing::debug!(
            "Recorded {} under {}: {} words, {} distinct",
            url,
            subdomain,
            page.total,
            page.frequencies.len()
        );

        Ok(PageSummary {
            url: url.to_string(),
            subdomain,
            word_count: page.total,
            distinct_words: page.frequencies.len(),
            new_longest,
        })
    }

    /// Records a fetch result if it is a 200 response with a non-empty body
    ///
    /// Returns `Ok(None)` and leaves the statistics untouched otherwise.
    pub fn record_response<S: Storage>(
        &self,
        storage: &mut S,
        url: &str,
        response: &PageResponse,
    ) -> Result<Option<PageSummary>, LedgerError> {
        match response.body() {
            Some(body) if response.has_content() => {
                self.record_page(storage, url, body).map(Some)
            }
            _ => {
                tracing::debug!("Not recording {}: status {}", url, response.status());
                Ok(None)
            }
        }
    }
}

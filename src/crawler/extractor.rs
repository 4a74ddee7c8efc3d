//! Link extraction for fetched pages
//!
//! Turns a fetched page into the list of outbound links worth handing back to
//! the host's frontier, and records the page in the visited set.

use crate::config::{Config, ExtractionConfig};
use crate::crawler::parser::extract_links;
use crate::crawler::PageResponse;
use crate::scope::ScopePolicy;
use crate::state::VisitedSet;
use crate::storage::Storage;
use crate::url::{parse_url, path_depth, strip_query_and_fragment, visited_key};
use crate::LedgerError;
use url::Url;

/// Chooses which links of a page are eligible for crawling
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    policy: ScopePolicy,
    min_body_bytes: usize,
    max_path_segments: usize,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new(ScopePolicy::default(), &ExtractionConfig::default())
    }
}

impl LinkExtractor {
    /// Creates an extractor with the given scope policy and limits
    pub fn new(policy: ScopePolicy, limits: &ExtractionConfig) -> Self {
        Self {
            policy,
            min_body_bytes: limits.min_body_bytes,
            max_path_segments: limits.max_path_segments,
        }
    }

    /// Creates an extractor from a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(ScopePolicy::from_config(&config.scope), &config.extraction)
    }

    /// The scope policy candidates are checked against
    pub fn policy(&self) -> &ScopePolicy {
        &self.policy
    }

    /// Extracts crawlable links from a fetched page
    ///
    /// Returns an empty list without touching storage when the response is not
    /// a 200, has no body, or the body is shorter than the minimum size. When
    /// the page's visited key is already recorded, the result is also empty.
    ///
    /// Otherwise every anchor is resolved against the page URL, stripped of
    /// query and fragment, and kept if it is in scope, not yet visited, and
    /// shallower than the path segment limit. The page's visited key is then
    /// added to the visited set and the set is persisted, in one transaction.
    ///
    /// # Arguments
    ///
    /// * `storage` - The ledger holding the visited set
    /// * `url` - The URL the host requested
    /// * `response` - The fetch result for that URL
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Accepted candidates in document order; in-page duplicates are kept
    /// * `Err(LedgerError)` - The requested URL is malformed or storage failed
    pub fn extract_links<S: Storage>(
        &self,
        storage: &mut S,
        url: &str,
        response: &PageResponse,
    ) -> Result<Vec<String>, LedgerError> {
        if response.status() != 200 {
            tracing::debug!("Skipping {}: status {}", url, response.status());
            return Ok(Vec::new());
        }

        let Some(body) = response.body() else {
            tracing::debug!("Skipping {}: no body", url);
            return Ok(Vec::new());
        };

        if body.len() < self.min_body_bytes {
            tracing::debug!(
                "Skipping {}: body is {} bytes (minimum {})",
                url,
                body.len(),
                self.min_body_bytes
            );
            return Ok(Vec::new());
        }

        let key = visited_key(url)?;
        let base_url = parse_url(response.final_url()).or_else(|_| parse_url(url))?;
        let html = String::from_utf8_lossy(body);
        let links = extract_links(&html, &base_url);
        let found = links.len();

        let accepted = storage.update_visited(|visited| {
            if visited.contains(&key) {
                return None;
            }

            let accepted: Vec<String> = links
                .iter()
                .map(strip_query_and_fragment)
                .filter(|candidate| self.accept(candidate, visited))
                .map(String::from)
                .collect();

            visited.insert(key);
            Some(accepted)
        })?;

        match accepted {
            Some(accepted) => {
                tracing::debug!(
                    "Extracted {} of {} links from {}",
                    accepted.len(),
                    found,
                    url
                );
                Ok(accepted)
            }
            None => {
                tracing::debug!("Skipping {}: already visited", url);
                Ok(Vec::new())
            }
        }
    }

    /// Decides whether a stripped candidate should be returned
    fn accept(&self, candidate: &Url, visited: &VisitedSet) -> bool {
        match self.policy.check_url(candidate) {
            Ok(verdict) if verdict.is_in_scope() => {}
            Ok(verdict) => {
                tracing::trace!("Rejecting {}: {}", candidate, verdict);
                return false;
            }
            Err(e) => {
                tracing::trace!("Rejecting {}: {}", candidate, e);
                return false;
            }
        }

        if visited.contains(candidate.as_str()) {
            tracing::trace!("Rejecting {}: already visited", candidate);
            return false;
        }

        let depth = path_depth(candidate);
        if depth >= self.max_path_segments {
            tracing::trace!("Rejecting {}: path depth {}", candidate, depth);
            return false;
        }

        true
    }
}

//! URL handling module for Crawl-Ledger
//!
//! This module provides URL parsing, normalization into visited keys and link
//! candidates, host extraction, and domain suffix matching.

mod domain;
mod matcher;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, subdomain_key};
pub use matcher::matches_domain_suffix;
pub use normalize::{path_depth, strip_query_and_fragment, to_candidate, visited_key};

/// Parses an absolute URL string, mapping failures onto [`UrlError`]
///
/// # Examples
///
/// ```
/// use crawl_ledger::url::parse_url;
///
/// assert!(parse_url("https://www.ics.uci.edu/").is_ok());
/// assert!(parse_url("not a url").is_err());
/// ```
pub fn parse_url(url_str: &str) -> Result<Url, UrlError> {
    Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))
}

//! Crawl-Ledger: link scoping and page statistics for a hosted web crawler
//!
//! The host crawler owns scheduling, fetching and politeness. For every page it
//! fetches, it hands the response to this crate, which decides which outbound
//! links are worth following and accumulates word and subdomain statistics in a
//! persistent ledger.

pub mod config;
pub mod crawler;
pub mod output;
pub mod scope;
pub mod state;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Crawl-Ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
///
/// Raised while normalizing or scope-checking a URL. A malformed link candidate
/// is simply out of scope; only a malformed requested URL reaches the host.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Crawl-Ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{process_page, LinkExtractor, PageResponse, StatsAggregator};
pub use scope::{ScopePolicy, ScopeVerdict};
pub use state::{LongestPage, StatsStore, VisitedSet, WordFrequency};
pub use storage::{SqliteStorage, Storage};

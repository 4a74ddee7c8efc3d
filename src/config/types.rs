use crate::scope::tables;
use serde::Deserialize;

/// Main configuration structure for Crawl-Ledger
///
/// Every section and key is optional; missing values fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Persistent ledger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database holding the visited and stats blobs
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// How long a writer waits for another writer's lock (milliseconds)
    #[serde(rename = "busy-timeout-ms", default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// Link extraction limits
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Bodies shorter than this are not parsed for links
    #[serde(rename = "min-body-bytes", default = "default_min_body_bytes")]
    pub min_body_bytes: usize,

    /// Candidates with this many path segments or more are dropped
    #[serde(rename = "max-path-segments", default = "default_max_path_segments")]
    pub max_path_segments: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_body_bytes: default_min_body_bytes(),
            max_path_segments: default_max_path_segments(),
        }
    }
}

/// Crawl boundary configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Domain suffixes to crawl (each suffix and its subdomains)
    #[serde(rename = "allowed-domains", default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,

    /// Extensions excluded on top of the built-in table
    #[serde(rename = "extra-excluded-extensions", default)]
    pub extra_excluded_extensions: Vec<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
            extra_excluded_extensions: Vec::new(),
        }
    }
}

/// Report rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of most frequent words to list
    #[serde(rename = "top-words", default = "default_top_words")]
    pub top_words: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_words: default_top_words(),
        }
    }
}

fn default_database_path() -> String {
    "./crawl-ledger.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_min_body_bytes() -> usize {
    100
}

fn default_max_path_segments() -> usize {
    10
}

fn default_allowed_domains() -> Vec<String> {
    tables::ALLOWED_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_top_words() -> usize {
    50
}

//! Storage module for persisting the crawl ledger
//!
//! This module handles all durable state for the crate:
//! - SQLite database initialization and schema management
//! - Full-load / full-save of the visited set and stats store blobs
//! - Transactional read-modify-write so concurrent workers never lose updates

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::StorageConfig;
use std::path::Path;
use std::time::Duration;

/// Opens (creating if needed) the ledger database described by the configuration
///
/// # Arguments
///
/// * `config` - The `[storage]` configuration section
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully opened storage
/// * `Err(StorageError)` - Failed to open or initialize the database
pub fn open_storage(config: &StorageConfig) -> StorageResult<SqliteStorage> {
    SqliteStorage::with_busy_timeout(
        Path::new(&config.database_path),
        Duration::from_millis(config.busy_timeout_ms),
    )
}

/// Names of the persisted blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobName {
    /// The visited set
    Visited,
    /// The statistics store
    Stats,
}

impl BlobName {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::Stats => "stats",
        }
    }
}

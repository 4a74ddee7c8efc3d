//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::state::{StatsStore, VisitedSet};
use crate::storage::BlobName;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored blob exists but cannot be decoded
    ///
    /// Never mapped to an empty store: doing so would silently discard the
    /// crawl history on the next save.
    #[error("Corrupt state blob '{name}': {source}")]
    CorruptState {
        name: String,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Each store is loaded and saved whole. A store that was never written loads
/// as empty. The `update_*` methods run load, mutate and save as one atomic
/// step with respect to other writers of the same backend.
pub trait Storage {
    // ===== Visited Set =====

    /// Loads the full visited set (empty if never written)
    fn load_visited(&self) -> StorageResult<VisitedSet>;

    /// Replaces the persisted visited set
    fn save_visited(&mut self, visited: &VisitedSet) -> StorageResult<()>;

    /// Atomically loads, mutates and saves the visited set
    ///
    /// The set is only written back when `f` added keys.
    fn update_visited<T, F>(&mut self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut VisitedSet) -> T,
        Self: Sized;

    // ===== Statistics =====

    /// Loads the full statistics store (empty if never written)
    fn load_stats(&self) -> StorageResult<StatsStore>;

    /// Replaces the persisted statistics store
    fn save_stats(&mut self, stats: &StatsStore) -> StorageResult<()>;

    /// Atomically loads, mutates and saves the statistics store
    fn update_stats<T, F>(&mut self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut StatsStore) -> T,
        Self: Sized;

    // ===== Metadata =====

    /// When the given blob was last written, if ever
    fn last_updated(&self, name: BlobName) -> StorageResult<Option<DateTime<Utc>>>;
}

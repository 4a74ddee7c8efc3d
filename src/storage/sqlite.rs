//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.
//! Read-modify-write cycles run inside `BEGIN IMMEDIATE` transactions, so
//! several handles on the same file (threads or processes) queue behind the
//! busy timeout instead of overwriting each other.

use crate::state::{StatsStore, VisitedSet};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::BlobName;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Default time a writer waits for a competing writer's lock
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// The database file and schema are created if they do not exist yet.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens the database with a custom lock wait
    pub fn with_busy_timeout(path: &Path, busy_timeout: Duration) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;

        // WAL lets the reporter read while a worker writes
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        // Initialize schema
        initialize_schema(&conn)?;

        tracing::debug!("Opened ledger database at {}", path.display());
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    ///
    /// Useful for tests and for reporting on a ledger that does not exist yet.
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Writes a raw blob, bypassing serialization
    #[cfg(test)]
    fn put_raw(&self, name: BlobName, data: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO state_blobs (name, data, updated_at) VALUES (?1, ?2, ?3)",
            params![name.to_db_string(), data, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Loads a blob, treating a missing row as the empty store
fn load_blob<T>(conn: &Connection, name: BlobName) -> StorageResult<T>
where
    T: DeserializeOwned + Default,
{
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM state_blobs WHERE name = ?1",
            params![name.to_db_string()],
            |row| row.get(0),
        )
        .optional()?;

    match data {
        None => Ok(T::default()),
        Some(json) => serde_json::from_str(&json).map_err(|source| StorageError::CorruptState {
            name: name.to_db_string().to_string(),
            source,
        }),
    }
}

/// Replaces a blob with the serialized value
fn save_blob<T>(conn: &Connection, name: BlobName, value: &T) -> StorageResult<()>
where
    T: Serialize,
{
    let json =
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    let now = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT OR REPLACE INTO state_blobs (name, data, updated_at) VALUES (?1, ?2, ?3)",
        params![name.to_db_string(), json, now],
    )?;
    Ok(())
}

impl Storage for SqliteStorage {
    // ===== Visited Set =====

    fn load_visited(&self) -> StorageResult<VisitedSet> {
        load_blob(&self.conn, BlobName::Visited)
    }

    fn save_visited(&mut self, visited: &VisitedSet) -> StorageResult<()> {
        save_blob(&self.conn, BlobName::Visited, visited)
    }

    fn update_visited<T, F>(&mut self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut VisitedSet) -> T,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut visited: VisitedSet = load_blob(&tx, BlobName::Visited)?;
        let before = visited.len();
        let result = f(&mut visited);

        // The set only grows, so an unchanged length means nothing to write
        if visited.len() != before {
            save_blob(&tx, BlobName::Visited, &visited)?;
        }

        tx.commit()?;
        Ok(result)
    }

    // ===== Statistics =====

    fn load_stats(&self) -> StorageResult<StatsStore> {
        load_blob(&self.conn, BlobName::Stats)
    }

    fn save_stats(&mut self, stats: &StatsStore) -> StorageResult<()> {
        save_blob(&self.conn, BlobName::Stats, stats)
    }

    fn update_stats<T, F>(&mut self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut StatsStore) -> T,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut stats: StatsStore = load_blob(&tx, BlobName::Stats)?;
        let result = f(&mut stats);
        save_blob(&tx, BlobName::Stats, &stats)?;

        tx.commit()?;
        Ok(result)
    }

    // ===== Metadata =====

    fn last_updated(&self, name: BlobName) -> StorageResult<Option<DateTime<Utc>>> {
        let updated_at: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM state_blobs WHERE name = ?1",
                params![name.to_db_string()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(updated_at.and_then(|s| s.parse::<DateTime<Utc>>().ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WordFrequency;

    #[test]
    fn test_create_in_memory() {
        let storage = SqliteStorage::new_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_absent_stores_load_empty() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(storage.load_visited().unwrap().is_empty());
        assert_eq!(storage.load_stats().unwrap(), StatsStore::new());
        assert!(storage.last_updated(BlobName::Stats).unwrap().is_none());
    }

    #[test]
    fn test_visited_save_and_load() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let visited: VisitedSet = ["https://www.ics.uci.edu/", "https://www.cs.uci.edu/"]
            .into_iter()
            .collect();

        storage.save_visited(&visited).unwrap();
        assert_eq!(storage.load_visited().unwrap(), visited);
        assert!(storage.last_updated(BlobName::Visited).unwrap().is_some());
    }

    #[test]
    fn test_save_replaces_whole_blob() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let first: VisitedSet = ["https://www.ics.uci.edu/a"].into_iter().collect();
        let second: VisitedSet = ["https://www.ics.uci.edu/b"].into_iter().collect();

        storage.save_visited(&first).unwrap();
        storage.save_visited(&second).unwrap();

        let loaded = storage.load_visited().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains("https://www.ics.uci.edu/b"));
    }

    #[test]
    fn test_stats_save_and_load() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let mut stats = StatsStore::new();
        stats.record_subdomain("https://www.ics.uci.edu");
        stats
            .word_frequency
            .merge(&[("research", 3u64)].into_iter().collect::<WordFrequency>());
        stats.offer_longest_page("https://www.ics.uci.edu/", 3);

        storage.save_stats(&stats).unwrap();
        assert_eq!(storage.load_stats().unwrap(), stats);
    }

    #[test]
    fn test_stores_are_independent() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let visited: VisitedSet = ["https://www.ics.uci.edu/"].into_iter().collect();
        storage.save_visited(&visited).unwrap();

        assert_eq!(storage.load_stats().unwrap(), StatsStore::new());
        assert!(storage.last_updated(BlobName::Stats).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_is_surfaced() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        storage.put_raw(BlobName::Stats, "{not json").unwrap();

        let err = storage.load_stats().unwrap_err();
        assert!(matches!(err, StorageError::CorruptState { ref name, .. } if name == "stats"));
    }

    #[test]
    fn test_update_visited_persists_new_keys() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let inserted = storage
            .update_visited(|visited| visited.insert("https://www.ics.uci.edu/"))
            .unwrap();

        assert!(inserted);
        assert!(storage
            .load_visited()
            .unwrap()
            .contains("https://www.ics.uci.edu/"));
    }

    #[test]
    fn test_update_visited_skips_write_when_unchanged() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let seen = storage
            .update_visited(|visited| visited.contains("https://www.ics.uci.edu/"))
            .unwrap();

        assert!(!seen);
        assert!(storage.last_updated(BlobName::Visited).unwrap().is_none());
    }

    #[test]
    fn test_update_stats_accumulates() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        for _ in 0..3 {
            storage
                .update_stats(|stats| stats.record_subdomain("https://www.stat.uci.edu"))
                .unwrap();
        }

        let stats = storage.load_stats().unwrap();
        assert_eq!(stats.subdomain_counts["https://www.stat.uci.edu"], 3);
    }

    #[test]
    fn test_update_on_corrupt_blob_fails_without_overwriting() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.put_raw(BlobName::Visited, "[1, 2").unwrap();

        let result = storage.update_visited(|visited| visited.insert("https://www.ics.uci.edu/"));
        assert!(matches!(result, Err(StorageError::CorruptState { .. })));

        let raw: String = storage
            .conn
            .query_row(
                "SELECT data FROM state_blobs WHERE name = 'visited'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, "[1, 2");
    }

    #[test]
    fn test_reopen_file_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        {
            let mut storage = SqliteStorage::new(&path).unwrap();
            storage
                .update_visited(|visited| visited.insert("https://www.ics.uci.edu/"))
                .unwrap();
        }

        let storage = SqliteStorage::new(&path).unwrap();
        assert_eq!(storage.load_visited().unwrap().len(), 1);
    }
}

//! Raw key/value blob stores.
//!
//! # Responsibility
//! - Provide get/set of one serialized text value per logical key.
//! - Enforce an optional capacity quota before any write reaches the medium.
//!
//! # Invariants
//! - `set` is all-or-nothing: a rejected write leaves the previous value intact.
//! - Stores never interpret the stored text.

use super::schema::{
    open_connection, open_connection_in_memory, schema_version, KV_SCHEMA_VERSION,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Default quota, matching the common 5 MiB browser storage limit.
pub const DEFAULT_CAPACITY_BYTES: usize = 5 * 1024 * 1024;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by blob stores and the document layer above them.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Database was written by a newer binary.
    UnsupportedSchemaVersion {
        found: u32,
        supported: u32,
    },
    /// Value does not fit into the configured quota.
    QuotaExceeded {
        required: usize,
        capacity: usize,
    },
    Serialize(serde_json::Error),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "database schema version {found} is newer than supported {supported}"
            ),
            Self::QuotaExceeded { required, capacity } => write!(
                f,
                "storage quota exceeded: {required} bytes required, {capacity} bytes available"
            ),
            Self::Serialize(err) => write!(f, "failed to serialize document: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable keyed storage of opaque text values.
pub trait BlobStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the value under `key` in one atomic write.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Current write quota in bytes; `None` means unlimited.
    fn capacity(&self) -> Option<usize>;
    /// Replaces the write quota for later `set` calls.
    fn set_capacity(&mut self, capacity: Option<usize>);
}

fn check_capacity(capacity: Option<usize>, value: &str) -> StoreResult<()> {
    match capacity {
        Some(capacity) if value.len() > capacity => Err(StoreError::QuotaExceeded {
            required: value.len(),
            capacity,
        }),
        _ => Ok(()),
    }
}

/// SQLite-backed blob store using the `kv_store` table.
///
/// Owns its connection so a client holding it can be shared across threads
/// behind a lock.
pub struct SqliteBlobStore {
    conn: Connection,
    capacity: Option<usize>,
}

impl SqliteBlobStore {
    /// Wraps a bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the current schema.
    /// - `MissingRequiredTable` when `kv_store` does not exist.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn,
            capacity: Some(DEFAULT_CAPACITY_BYTES),
        })
    }

    /// Opens a database file, creating `kv_store` when missing.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_connection(path)?)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_connection_in_memory()?)
    }

    /// Sets the write quota in bytes; `None` disables it.
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        check_capacity(self.capacity, value)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = KV_SCHEMA_VERSION;
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_store'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(StoreError::MissingRequiredTable("kv_store"));
    }

    Ok(())
}

/// Process-local blob store.
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    values: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemoryBlobStore {
    /// Creates an empty store with the default quota.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            capacity: Some(DEFAULT_CAPACITY_BYTES),
        }
    }

    /// Sets the write quota in bytes; `None` disables it.
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Seeds a raw value, bypassing the quota.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        check_capacity(self.capacity, value)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, DEFAULT_CAPACITY_BYTES,
    };
    use rusqlite::Connection;

    #[test]
    fn sqlite_store_overwrites_value_under_same_key() {
        let mut store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn quota_rejection_keeps_previous_value() {
        let mut store = SqliteBlobStore::open_in_memory()
            .unwrap()
            .with_capacity(Some(4));
        store.set("k", "abcd").unwrap();

        let err = store.set("k", "abcde").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                required: 5,
                capacity: 4
            }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abcd"));
    }

    #[test]
    fn memory_store_respects_quota() {
        let mut store = MemoryBlobStore::new().with_capacity(Some(2));
        assert!(store.set("k", "xyz").is_err());
        assert_eq!(store.get("k").unwrap(), None);

        let mut unlimited = MemoryBlobStore::new().with_capacity(None);
        unlimited.set("k", "xyz").unwrap();
        assert_eq!(unlimited.get("k").unwrap().as_deref(), Some("xyz"));
    }

    #[test]
    fn unmigrated_connection_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let result = SqliteBlobStore::try_new(conn);
        assert!(matches!(
            result,
            Err(StoreError::UninitializedConnection {
                actual_version: 0,
                ..
            })
        ));
    }

    #[test]
    fn default_memory_store_carries_default_quota() {
        assert_eq!(
            MemoryBlobStore::default().capacity(),
            Some(DEFAULT_CAPACITY_BYTES)
        );

        let mut store = MemoryBlobStore::default();
        store.set_capacity(Some(3));
        assert!(matches!(
            store.set("k", "four"),
            Err(StoreError::QuotaExceeded { capacity: 3, .. })
        ));
    }
}

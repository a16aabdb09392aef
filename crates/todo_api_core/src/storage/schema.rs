//! SQLite bootstrap for the `kv_store` table.
//!
//! # Responsibility
//! - Open file or in-memory connections with the pragmas the blob store needs.
//! - Create `kv_store` on an empty database and stamp `PRAGMA user_version`.
//!
//! # Invariants
//! - A database stamped with a newer schema than this binary is never touched.
//! - Table creation and the version stamp commit together.

use super::blob::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version written to `PRAGMA user_version`.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_STORE_DDL: &str = include_str!("kv_store.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a database file and brings `kv_store` up to date.
///
/// Parent directories are not created; callers own the data location.
pub fn open_connection(path: impl AsRef<Path>) -> StoreResult<Connection> {
    open_with("file", move || Connection::open(path))
}

/// Opens a fresh in-memory database with `kv_store` in place.
pub fn open_connection_in_memory() -> StoreResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Reads the version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=storage status=start mode={mode}");

    let result = open()
        .map_err(StoreError::from)
        .and_then(|mut conn| bootstrap(&mut conn).map(|()| conn));
    match &result {
        Ok(_) => info!(
            "event=db_open module=storage status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=storage status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn bootstrap(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let found = schema_version(conn)?;
    if found > KV_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: KV_SCHEMA_VERSION,
        });
    }
    if found == KV_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_STORE_DDL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {KV_SCHEMA_VERSION};"))?;
    tx.commit()?;
    info!("event=schema_init module=storage status=ok version={KV_SCHEMA_VERSION}");
    Ok(())
}

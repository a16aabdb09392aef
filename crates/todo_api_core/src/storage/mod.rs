//! Durable storage of the single task-list document.
//!
//! # Responsibility
//! - Abstract the persistence medium behind a small key/value seam.
//! - Keep document encoding and corrupt-state recovery in one place.

pub mod blob;
pub mod document;
pub mod schema;

pub use blob::{
    BlobStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoreResult, DEFAULT_CAPACITY_BYTES,
};
pub use document::{DocumentStore, DEFAULT_STORAGE_KEY};
pub use schema::{open_connection, open_connection_in_memory, schema_version, KV_SCHEMA_VERSION};

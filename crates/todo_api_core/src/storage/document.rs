//! Whole-document persistence on top of a blob store.
//!
//! # Responsibility
//! - Load the storage document under a fixed key, substituting the default
//!   document for missing or corrupt content.
//! - Save the document as one JSON write, stamping `last_updated`.
//!
//! # Invariants
//! - `load` never returns a partially parsed document.
//! - A failed `save` leaves the previously persisted value authoritative.
//! - No locking here; callers serialize load/save cycles.

use super::blob::{BlobStore, StoreResult};
use crate::model::document::StorageData;
use crate::model::now_utc;
use log::{error, warn};

/// Logical key the original client used for its browser storage entry.
pub const DEFAULT_STORAGE_KEY: &str = "todo_app_data";

/// Document persistence bound to one storage key.
#[derive(Debug)]
pub struct DocumentStore<B: BlobStore> {
    blob: B,
    key: String,
}

impl<B: BlobStore> DocumentStore<B> {
    pub fn new(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the default document when the key has never been written.
    ///
    /// Existing content is left alone, even when it is corrupt; `load`
    /// recovers from that on read.
    pub fn initialize(&mut self) -> StoreResult<()> {
        if self.blob.get(&self.key)?.is_some() {
            return Ok(());
        }
        let mut data = StorageData::default();
        self.save(&mut data)
    }

    /// Loads the current document, falling back to the default one.
    pub fn load(&self) -> StorageData {
        let raw = match self.blob.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StorageData::default(),
            Err(err) => {
                error!(
                    "event=document_load module=storage status=error error_code=read_failed error={err}"
                );
                return StorageData::default();
            }
        };

        match serde_json::from_str::<StorageData>(&raw) {
            Ok(data) if data.is_consistent() => data,
            Ok(_) => {
                warn!(
                    "event=document_load module=storage status=recovered reason=inconsistent_ids bytes={}",
                    raw.len()
                );
                StorageData::default()
            }
            Err(err) => {
                warn!(
                    "event=document_load module=storage status=recovered reason=parse_failed bytes={} line={} column={}",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                StorageData::default()
            }
        }
    }

    /// Stamps `last_updated` and persists the document in one write.
    ///
    /// `data` keeps the new stamp even when the write fails; callers treat
    /// a failed save as discarding their working copy.
    pub fn save(&mut self, data: &mut StorageData) -> StoreResult<()> {
        data.last_updated = now_utc();
        let json = data.to_json()?;
        self.blob.set(&self.key, &json).inspect_err(|err| {
            error!(
                "event=document_save module=storage status=error bytes={} error={err}",
                json.len()
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentStore, DEFAULT_STORAGE_KEY};
    use crate::model::document::StorageData;
    use crate::model::todo::{CreateTodoData, Todo};
    use crate::storage::blob::{BlobStore, MemoryBlobStore};

    #[test]
    fn missing_key_loads_default_document() {
        let store = DocumentStore::new(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY);
        let data = store.load();
        assert!(data.todos.is_empty());
        assert_eq!(data.next_id, 1);
    }

    #[test]
    fn corrupt_content_loads_default_document() {
        let blob = MemoryBlobStore::new().with_value(DEFAULT_STORAGE_KEY, "{not json");
        let store = DocumentStore::new(blob, DEFAULT_STORAGE_KEY);
        assert_eq!(store.load().next_id, 1);
    }

    #[test]
    fn initialize_does_not_overwrite_existing_content() {
        let blob = MemoryBlobStore::new().with_value("k", "garbage");
        let mut store = DocumentStore::new(blob, "k");
        store.initialize().unwrap();
        assert_eq!(store.blob.get("k").unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn save_then_load_round_trips_document() {
        let mut store = DocumentStore::new(MemoryBlobStore::new(), "k");
        let mut data = StorageData::default();
        data.todos
            .push(Todo::from_create(1, &CreateTodoData::new("persisted")).unwrap());
        data.next_id = 2;

        store.save(&mut data).unwrap();
        assert_eq!(store.load(), data);
    }
}

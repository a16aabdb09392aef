//! Aggregate statistics over the storage document.

use crate::model::document::StorageData;
use crate::model::Timestamp;
use serde::{Deserialize, Serialize};

/// Derived counts and size of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_todos: usize,
    pub completed_todos: usize,
    pub incomplete_todos: usize,
    pub next_id: u64,
    #[serde(with = "crate::model::timestamp")]
    pub last_updated: Timestamp,
    /// Byte length of the document serialized as JSON.
    pub storage_size: usize,
}

impl StorageStats {
    /// Computes statistics for one loaded document.
    ///
    /// `completed_todos + incomplete_todos == total_todos` always holds.
    pub fn from_document(data: &StorageData) -> serde_json::Result<Self> {
        let total_todos = data.todos.len();
        let completed_todos = data.todos.iter().filter(|todo| todo.completed).count();
        Ok(Self {
            total_todos,
            completed_todos,
            incomplete_todos: total_todos - completed_todos,
            next_id: data.next_id,
            last_updated: data.last_updated,
            storage_size: data.to_json()?.len(),
        })
    }
}

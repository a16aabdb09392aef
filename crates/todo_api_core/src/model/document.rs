//! Persisted storage document.
//!
//! # Responsibility
//! - Define the single aggregate written under the storage key.
//! - Provide the default (empty) document used for first start and recovery.
//!
//! # Invariants
//! - Every `id` in `todos` is unique and strictly below `next_id`.
//! - `next_id` only grows, except when the whole list is cleared.

use super::todo::Todo;
use super::{now_utc, Timestamp};
use serde::{Deserialize, Serialize};

/// First id handed out by an empty document.
pub const FIRST_TODO_ID: u64 = 1;

/// The whole persisted state: records, id counter and last write time.
///
/// Serialized as `{todos, nextId, lastUpdated}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageData {
    /// Records in insertion (display) order.
    pub todos: Vec<Todo>,
    /// Next id to assign.
    pub next_id: u64,
    /// Time of the last successful write.
    #[serde(with = "super::timestamp")]
    pub last_updated: Timestamp,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            next_id: FIRST_TODO_ID,
            last_updated: now_utc(),
        }
    }
}

impl StorageData {
    /// Checks the identity invariants of a decoded document.
    ///
    /// Used by the load path to reject structurally valid JSON that would
    /// still break id uniqueness.
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.todos.len());
        self.next_id >= FIRST_TODO_ID
            && self
                .todos
                .iter()
                .all(|todo| todo.id < self.next_id && seen.insert(todo.id))
    }

    /// Returns the JSON text written to the blob store.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

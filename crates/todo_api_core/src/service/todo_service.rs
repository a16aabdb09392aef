//! Todo use-case service.
//!
//! # Responsibility
//! - Run every operation as one `load -> compute -> save` cycle.
//! - Compose record manager, query engine and stats over the loaded document.
//!
//! # Invariants
//! - One lock guards the whole cycle, so concurrent callers on one service
//!   never interleave between load and save.
//! - Mutations run on a working copy; it is persisted in exactly one write
//!   and discarded when that write fails.
//! - Read-only operations never write.

use crate::model::document::StorageData;
use crate::model::todo::{
    CreateTodoData, Todo, TodoFilters, TodoId, TodoValidationError, UpdateTodoData,
};
use crate::repo::todo_repo::{RepoError, RepoResult, TodoRecords};
use crate::search::{filter_todos, search_todos};
use crate::stats::StorageStats;
use crate::storage::{BlobStore, DocumentStore, StoreError, StoreResult};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input is blank where a value is required.
    Validation(TodoValidationError),
    /// No todo carries the requested id.
    NotFound(TodoId),
    /// The blob store rejected the write; persisted state is unchanged.
    Persistence(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Todo with ID {id} not found"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<TodoValidationError> for ServiceError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Persistence(StoreError::Serialize(value))
    }
}

/// Use-case service over one persisted document.
pub struct TodoService<B: BlobStore> {
    store: Mutex<DocumentStore<B>>,
}

impl<B: BlobStore> TodoService<B> {
    /// Creates a service and writes the default document if none exists yet.
    pub fn new(blob: B, storage_key: impl Into<String>) -> StoreResult<Self> {
        let mut store = DocumentStore::new(blob, storage_key);
        store.initialize()?;
        Ok(Self {
            store: Mutex::new(store),
        })
    }

    /// Returns every todo in storage order.
    pub fn list(&self) -> Vec<Todo> {
        self.read(|data| data.todos.clone())
    }

    /// Returns one todo by id.
    pub fn get(&self, id: TodoId) -> ServiceResult<Todo> {
        self.read(|data| {
            data.todos
                .iter()
                .find(|todo| todo.id == id)
                .cloned()
                .ok_or(ServiceError::NotFound(id))
        })
    }

    /// Creates one todo; id allocation and append commit in the same write.
    pub fn create(&self, input: &CreateTodoData) -> ServiceResult<Todo> {
        self.write(|records| records.create(input))
    }

    /// Applies a partial update to one todo.
    pub fn update(&self, id: TodoId, patch: &UpdateTodoData) -> ServiceResult<Todo> {
        self.write(|records| records.update(id, patch))
    }

    /// Deletes one todo and returns it.
    pub fn delete(&self, id: TodoId) -> ServiceResult<Todo> {
        self.write(|records| records.delete(id))
    }

    /// Flips completion state of one todo.
    pub fn toggle(&self, id: TodoId) -> ServiceResult<Todo> {
        self.write(|records| records.toggle(id))
    }

    /// Removes every todo and restarts ids at 1.
    pub fn clear(&self) -> ServiceResult<()> {
        self.write(|records| {
            records.clear();
            Ok(())
        })
    }

    /// Case-insensitive substring search over title and description.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<Todo>> {
        self.read(|data| search_todos(&data.todos, query).map_err(ServiceError::from))
    }

    /// Returns todos matching all supplied predicates.
    pub fn filter(&self, filters: &TodoFilters) -> Vec<Todo> {
        self.read(|data| filter_todos(&data.todos, filters))
    }

    /// Computes aggregate statistics of the current document.
    pub fn stats(&self) -> ServiceResult<StorageStats> {
        self.read(|data| StorageStats::from_document(data).map_err(ServiceError::from))
    }

    fn lock(&self) -> MutexGuard<'_, DocumentStore<B>> {
        // The document is only ever replaced whole, so a poisoned guard still
        // points at a valid persisted state.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, query: impl FnOnce(&StorageData) -> T) -> T {
        let store = self.lock();
        query(&store.load())
    }

    fn write<T>(
        &self,
        mutate: impl FnOnce(&mut TodoRecords<'_>) -> RepoResult<T>,
    ) -> ServiceResult<T> {
        let mut store = self.lock();
        let mut working = store.load();
        let output = mutate(&mut TodoRecords::new(&mut working))?;
        store.save(&mut working)?;
        Ok(output)
    }
}

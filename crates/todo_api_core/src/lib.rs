//! Core of the todo API emulator.
//! A REST-shaped task-list backend persisted as one JSON document.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod stats;
pub mod storage;

pub use api::{ApiResponse, TodoApiClient, STATUS_BAD_REQUEST, STATUS_OK};
pub use config::ClientConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::StorageData;
pub use model::todo::{
    CreateTodoData, Priority, Todo, TodoFilters, TodoId, TodoValidationError, UpdateTodoData,
};
pub use model::{now_utc, Timestamp};
pub use repo::todo_repo::{RepoError, RepoResult, TodoRecords};
pub use search::{filter_todos, search_todos};
pub use service::todo_service::{ServiceError, ServiceResult, TodoService};
pub use stats::StorageStats;
pub use storage::{
    BlobStore, DocumentStore, MemoryBlobStore, SqliteBlobStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

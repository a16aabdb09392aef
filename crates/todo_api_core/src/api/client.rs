//! REST-style client facade over the persisted task list.
//!
//! # Responsibility
//! - Expose the public task-list operations with simulated network latency.
//! - Translate service results into `ApiResponse` envelopes.
//!
//! # Invariants
//! - Operations never panic and never return an error; every outcome is an
//!   envelope, distinguished by `success`.
//! - Latency is waited out before the document lock is taken, so it never
//!   overlaps the save of the same operation.
//! - Log events carry ids, counts and durations only, never todo text.

use super::response::ApiResponse;
use crate::config::ClientConfig;
use crate::model::todo::{CreateTodoData, Todo, TodoFilters, TodoId, UpdateTodoData};
use crate::service::todo_service::{ServiceError, ServiceResult, TodoService};
use crate::stats::StorageStats;
use crate::storage::{BlobStore, MemoryBlobStore, SqliteBlobStore, StoreResult};
use log::{debug, error, info};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// Task-list client emulating a REST backend on top of a blob store.
pub struct TodoApiClient<B: BlobStore> {
    service: TodoService<B>,
    latency: Duration,
}

impl<B: BlobStore> TodoApiClient<B> {
    /// Creates a client over `blob`, writing the default document when the
    /// configured key is absent.
    ///
    /// `config.capacity_bytes` replaces whatever quota `blob` carried.
    pub fn new(mut blob: B, config: &ClientConfig) -> StoreResult<Self> {
        blob.set_capacity(config.capacity_bytes);
        let service = TodoService::new(blob, config.storage_key.clone())?;
        info!(
            "event=client_init module=api status=ok storage_key={} latency_ms={}",
            config.storage_key,
            config.latency.as_millis()
        );
        Ok(Self {
            service,
            latency: config.latency,
        })
    }

    /// GET /todos
    pub fn get_all_todos(&self) -> ApiResponse<Vec<Todo>> {
        let started_at = self.begin();
        let todos = self.service.list();
        finish_ok("todo_list", started_at, todos.len());
        let message = format!("Retrieved {} todos", todos.len());
        ApiResponse::ok(todos, message)
    }

    /// GET /todos/:id
    pub fn get_todo_by_id(&self, id: TodoId) -> ApiResponse<Option<Todo>> {
        let started_at = self.begin();
        respond(
            "todo_get",
            started_at,
            self.service.get(id),
            |todo| (Some(todo), "Todo retrieved successfully".to_string()),
            None,
            "Failed to retrieve todo",
        )
    }

    /// POST /todos
    pub fn create_todo(&self, data: &CreateTodoData) -> ApiResponse<Option<Todo>> {
        let started_at = self.begin();
        respond(
            "todo_create",
            started_at,
            self.service.create(data),
            |todo| (Some(todo), "Todo created successfully".to_string()),
            None,
            "Failed to save todo",
        )
    }

    /// PUT /todos/:id
    pub fn update_todo(&self, id: TodoId, patch: &UpdateTodoData) -> ApiResponse<Option<Todo>> {
        let started_at = self.begin();
        respond(
            "todo_update",
            started_at,
            self.service.update(id, patch),
            |todo| (Some(todo), "Todo updated successfully".to_string()),
            None,
            "Failed to update todo",
        )
    }

    /// DELETE /todos/:id
    pub fn delete_todo(&self, id: TodoId) -> ApiResponse<Option<Todo>> {
        let started_at = self.begin();
        respond(
            "todo_delete",
            started_at,
            self.service.delete(id),
            |todo| (Some(todo), "Todo deleted successfully".to_string()),
            None,
            "Failed to delete todo",
        )
    }

    /// PATCH /todos/:id/toggle
    pub fn toggle_todo_completion(&self, id: TodoId) -> ApiResponse<Option<Todo>> {
        let started_at = self.begin();
        respond(
            "todo_toggle",
            started_at,
            self.service.toggle(id),
            |todo| {
                let state = if todo.completed {
                    "completed"
                } else {
                    "incomplete"
                };
                (Some(todo), format!("Todo marked as {state}"))
            },
            None,
            "Failed to update todo",
        )
    }

    /// GET /todos/search?q=query
    pub fn search_todos(&self, query: &str) -> ApiResponse<Vec<Todo>> {
        let started_at = self.begin();
        respond(
            "todo_search",
            started_at,
            self.service.search(query),
            |todos| {
                let message = format!("Found {} todos matching \"{query}\"", todos.len());
                (todos, message)
            },
            Vec::new(),
            "Failed to search todos",
        )
    }

    /// GET /todos/filter
    pub fn filter_todos(&self, filters: &TodoFilters) -> ApiResponse<Vec<Todo>> {
        let started_at = self.begin();
        let todos = self.service.filter(filters);
        finish_ok("todo_filter", started_at, todos.len());
        let message = format!("Filtered {} todos", todos.len());
        ApiResponse::ok(todos, message)
    }

    /// Resets the document to its empty default under the same key.
    pub fn clear_all_todos(&self) -> ApiResponse<()> {
        let started_at = self.begin();
        respond(
            "todo_clear",
            started_at,
            self.service.clear(),
            |()| ((), "All todos cleared successfully".to_string()),
            (),
            "Failed to clear todos",
        )
    }

    /// Aggregate counts and storage size.
    pub fn get_storage_stats(&self) -> ApiResponse<Option<StorageStats>> {
        let started_at = self.begin();
        respond(
            "storage_stats",
            started_at,
            self.service.stats(),
            |stats| (Some(stats), "Storage statistics retrieved".to_string()),
            None,
            "Failed to retrieve storage statistics",
        )
    }

    fn begin(&self) -> Instant {
        let started_at = Instant::now();
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        started_at
    }
}

impl TodoApiClient<SqliteBlobStore> {
    /// Opens a client over a SQLite database file.
    pub fn open(path: impl AsRef<Path>, config: &ClientConfig) -> StoreResult<Self> {
        Self::new(SqliteBlobStore::open(path)?, config)
    }
}

impl TodoApiClient<MemoryBlobStore> {
    /// Creates a client over a fresh process-local store.
    pub fn in_memory(config: &ClientConfig) -> StoreResult<Self> {
        Self::new(MemoryBlobStore::new(), config)
    }
}

fn finish_ok(event: &'static str, started_at: Instant, count: usize) {
    debug!(
        "event={event} module=api status=ok count={count} duration_ms={}",
        started_at.elapsed().as_millis()
    );
}

fn respond<T, D>(
    event: &'static str,
    started_at: Instant,
    result: ServiceResult<T>,
    on_ok: impl FnOnce(T) -> (D, String),
    failure_data: D,
    persistence_message: &str,
) -> ApiResponse<D> {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => {
            debug!("event={event} module=api status=ok duration_ms={duration_ms}");
            let (data, message) = on_ok(value);
            ApiResponse::ok(data, message)
        }
        Err(ServiceError::Validation(err)) => {
            info!(
                "event={event} module=api status=rejected error_code=validation duration_ms={duration_ms}"
            );
            ApiResponse::fail(failure_data, err.to_string())
        }
        Err(ServiceError::NotFound(id)) => {
            info!(
                "event={event} module=api status=rejected error_code=not_found id={id} duration_ms={duration_ms}"
            );
            ApiResponse::fail(failure_data, format!("Todo with ID {id} not found"))
        }
        Err(ServiceError::Persistence(err)) => {
            error!(
                "event={event} module=api status=error error_code=persistence duration_ms={duration_ms} error={err}"
            );
            ApiResponse::fail(failure_data, persistence_message)
        }
    }
}

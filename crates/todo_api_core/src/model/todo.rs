//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted inside the storage document.
//! - Define create/patch/filter inputs accepted by the record manager.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another todo.
//! - `title` is non-empty after trimming and is stored trimmed.
//! - `updated_at >= created_at`; both are set by the store, never by callers.

use super::{now_utc, Timestamp};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned numeric identity of a todo.
pub type TodoId = u64;

/// Relative urgency of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unsupported priority `{other}`; expected low|medium|high"
            )),
        }
    }
}

/// Validation errors for caller-supplied todo input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Search query is empty or whitespace-only.
    EmptyQuery,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Todo title is required"),
            Self::EmptyQuery => write!(f, "Search query is required"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical task record.
///
/// Serialized with camelCase field names to match the persisted document
/// shape (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(with = "super::timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "super::timestamp")]
    pub updated_at: Timestamp,
}

impl Todo {
    /// Builds a fresh record from validated create input.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - `created_at == updated_at` at creation.
    pub fn from_create(id: TodoId, data: &CreateTodoData) -> Result<Self, TodoValidationError> {
        let title = normalize_title(&data.title)?;
        let now = now_utc();
        Ok(Self {
            id,
            title,
            description: data.description.clone().unwrap_or_default(),
            completed: false,
            priority: data.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges present patch fields over this record and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are never touched. The patch is validated before
    /// any field is written, so a rejected patch leaves the record unchanged.
    pub fn apply_patch(&mut self, patch: &UpdateTodoData) -> Result<(), TodoValidationError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description.as_ref() {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.touch();
        Ok(())
    }

    /// Flips completion state and refreshes `updated_at`.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    fn touch(&mut self) {
        // Clock skew must not break `updated_at >= created_at`.
        self.updated_at = now_utc().max(self.created_at);
    }
}

/// Input for creating a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl CreateTodoData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Partial update for an existing todo.
///
/// `None` means "keep the stored value"; there is no way to patch `id`,
/// `created_at` or `updated_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl UpdateTodoData {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Optional filter predicates, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFilters {
    /// Exact match on `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    /// Exact match on `priority`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Inclusive lower bound on `created_at`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::timestamp::option"
    )]
    pub created_after: Option<Timestamp>,
}

impl TodoFilters {
    pub fn with_status(mut self, completed: bool) -> Self {
        self.status = Some(completed);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_created_after(mut self, created_after: Timestamp) -> Self {
        self.created_after = Some(created_after);
        self
    }

    /// Returns `true` when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.created_after.is_none()
    }
}

/// Trims a title and rejects blank input.
pub fn normalize_title(title: &str) -> Result<String, TodoValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

//! Todo record manager over an in-memory storage document.
//!
//! # Responsibility
//! - Assign identities and apply create/update/delete/toggle/clear to the
//!   record list of one loaded document.
//! - Report semantic errors (`NotFound`, `Validation`) to the service layer.
//!
//! # Invariants
//! - `create` is the only path that consumes `next_id`; ids are never reused.
//! - Lookups are linear and return the first match by `id`.
//! - A failed operation leaves the document untouched.

use crate::model::document::{StorageData, FIRST_TODO_ID};
use crate::model::todo::{CreateTodoData, Todo, TodoId, TodoValidationError, UpdateTodoData};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Record-level error for todo operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(TodoValidationError),
    NotFound(TodoId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Todo with ID {id} not found"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Record manager borrowing one working copy of the document.
pub struct TodoRecords<'doc> {
    data: &'doc mut StorageData,
}

impl<'doc> TodoRecords<'doc> {
    pub fn new(data: &'doc mut StorageData) -> Self {
        Self { data }
    }

    /// Creates a todo with the next id and appends it.
    pub fn create(&mut self, input: &CreateTodoData) -> RepoResult<Todo> {
        let todo = Todo::from_create(self.data.next_id, input)?;
        self.data.next_id += 1;
        self.data.todos.push(todo.clone());
        Ok(todo)
    }

    /// Returns every todo in storage order.
    pub fn list(&self) -> &[Todo] {
        &self.data.todos
    }

    /// Returns one todo by id.
    pub fn get(&self, id: TodoId) -> RepoResult<&Todo> {
        self.data
            .todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    /// Merges present patch fields over the stored todo.
    pub fn update(&mut self, id: TodoId, patch: &UpdateTodoData) -> RepoResult<Todo> {
        let todo = self.get_mut(id)?;
        todo.apply_patch(patch)?;
        Ok(todo.clone())
    }

    /// Removes a todo and returns it as confirmation.
    pub fn delete(&mut self, id: TodoId) -> RepoResult<Todo> {
        let index = self.position(id)?;
        Ok(self.data.todos.remove(index))
    }

    /// Flips completion state of one todo.
    pub fn toggle(&mut self, id: TodoId) -> RepoResult<Todo> {
        let todo = self.get_mut(id)?;
        todo.toggle_completed();
        Ok(todo.clone())
    }

    /// Drops every todo and restarts the id counter.
    pub fn clear(&mut self) {
        self.data.todos.clear();
        self.data.next_id = FIRST_TODO_ID;
    }

    fn position(&self, id: TodoId) -> RepoResult<usize> {
        self.data
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    fn get_mut(&mut self, id: TodoId) -> RepoResult<&mut Todo> {
        let index = self.position(id)?;
        Ok(&mut self.data.todos[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoError, TodoRecords};
    use crate::model::document::StorageData;
    use crate::model::todo::{CreateTodoData, Priority, TodoValidationError, UpdateTodoData};

    #[test]
    fn create_assigns_sequential_ids() {
        let mut data = StorageData::default();
        let mut records = TodoRecords::new(&mut data);
        let first = records.create(&CreateTodoData::new("one")).unwrap();
        let second = records.create(&CreateTodoData::new("two")).unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(data.next_id, 3);
    }

    #[test]
    fn failed_create_does_not_consume_an_id() {
        let mut data = StorageData::default();
        let mut records = TodoRecords::new(&mut data);
        let err = records.create(&CreateTodoData::new("   ")).unwrap_err();

        assert_eq!(err, RepoError::Validation(TodoValidationError::EmptyTitle));
        assert_eq!(data.next_id, 1);
        assert!(data.todos.is_empty());
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let mut data = StorageData::default();
        let mut records = TodoRecords::new(&mut data);
        let created = records
            .create(
                &CreateTodoData::new("read")
                    .with_description("chapter 3")
                    .with_priority(Priority::Low),
            )
            .unwrap();

        let updated = records
            .update(created.id, &UpdateTodoData::default().with_completed(true))
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "read");
        assert_eq!(updated.description, "chapter 3");
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn delete_and_clear() {
        let mut data = StorageData::default();
        let mut records = TodoRecords::new(&mut data);
        let a = records.create(&CreateTodoData::new("a")).unwrap();
        records.create(&CreateTodoData::new("b")).unwrap();

        assert_eq!(records.delete(a.id).unwrap().title, "a");
        assert_eq!(records.delete(a.id).unwrap_err(), RepoError::NotFound(a.id));
        assert_eq!(records.list().len(), 1);

        records.clear();
        assert!(records.list().is_empty());
        assert_eq!(data.next_id, 1);
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut data = StorageData::default();
        let mut records = TodoRecords::new(&mut data);
        let todo = records.create(&CreateTodoData::new("flip")).unwrap();

        assert!(records.toggle(todo.id).unwrap().completed);
        assert!(!records.toggle(todo.id).unwrap().completed);
        assert!(matches!(records.toggle(99), Err(RepoError::NotFound(99))));
    }
}

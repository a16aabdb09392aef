//! Case-insensitive substring search.

use crate::model::todo::{Todo, TodoValidationError};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, TodoValidationError>;

/// Returns todos whose title or description contains `query`.
///
/// The query is trimmed and compared case-insensitively.
///
/// # Errors
/// - `EmptyQuery` when `query` is blank.
pub fn search_todos(todos: &[Todo], query: &str) -> SearchResult<Vec<Todo>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(TodoValidationError::EmptyQuery);
    }

    Ok(todos
        .iter()
        .filter(|todo| {
            todo.title.to_lowercase().contains(&needle)
                || todo.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::search_todos;
    use crate::model::todo::{CreateTodoData, Todo, TodoValidationError};

    fn todo(id: u64, title: &str, description: &str) -> Todo {
        Todo::from_create(id, &CreateTodoData::new(title).with_description(description)).unwrap()
    }

    #[test]
    fn matches_title_or_description_ignoring_case() {
        let todos = vec![
            todo(1, "shop for food", ""),
            todo(2, "call mom", "ask about FOOD plans"),
            todo(3, "gym", "legs"),
            todo(4, "weekly review", "update the todo list"),
        ];

        let ids: Vec<_> = search_todos(&todos, "  FoOd ")
            .unwrap()
            .into_iter()
            .map(|todo| todo.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let hits = search_todos(&todos, "OOD").unwrap();
        let ids: Vec<_> = hits.into_iter().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let description_only = search_todos(&todos, "ODO").unwrap();
        assert_eq!(description_only.len(), 1);
        assert_eq!(description_only[0].id, 4);
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_eq!(
            search_todos(&[], " \t").unwrap_err(),
            TodoValidationError::EmptyQuery
        );
    }
}

//! Predicate filtering.

use crate::model::todo::{Todo, TodoFilters};

/// Returns `true` when `todo` satisfies every supplied predicate.
pub fn matches_filters(todo: &Todo, filters: &TodoFilters) -> bool {
    filters.status.map_or(true, |status| todo.completed == status)
        && filters
            .priority
            .map_or(true, |priority| todo.priority == priority)
        && filters
            .created_after
            .map_or(true, |after| todo.created_at >= after)
}

/// Returns the todos matching all supplied predicates, in storage order.
///
/// An empty filter set returns every todo.
pub fn filter_todos(todos: &[Todo], filters: &TodoFilters) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| matches_filters(todo, filters))
        .cloned()
        .collect()
}

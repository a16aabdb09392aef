//! Query engine over the in-memory record list.
//!
//! # Responsibility
//! - Free-text search on title/description.
//! - Multi-predicate filtering on status, priority and creation time.
//!
//! # Invariants
//! - Results keep storage order; nothing is ranked or re-sorted.

pub mod filter;
pub mod text;

pub use filter::{filter_todos, matches_filters};
pub use text::{search_todos, SearchResult};

//! Domain model for the persisted task list.
//!
//! # Responsibility
//! - Define the todo record and the single document that stores all of them.
//! - Own timestamp conventions shared by every persisted field.
//!
//! # Invariants
//! - Every todo is identified by a store-assigned, never reused `TodoId`.
//! - Timestamps are UTC with millisecond precision, so they survive a JSON
//!   round trip unchanged.

use chrono::{DateTime, SubsecRound, Utc};

pub mod document;
pub mod timestamp;
pub mod todo;

/// UTC instant stored as RFC 3339 text in the persisted document.
///
/// Serialize fields of this type through [`timestamp`] to keep the fixed
/// millisecond width.
pub type Timestamp = DateTime<Utc>;

/// Returns the current instant truncated to milliseconds.
pub fn now_utc() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate document load/save around record, query and stats logic.
//! - Keep the envelope facade decoupled from storage details.

pub mod todo_service;

//! Record management over the loaded storage document.
//!
//! # Responsibility
//! - Own identity assignment and record mutations.
//! - Keep persistence out of record logic; the service layer saves.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Validation`).

pub mod todo_repo;

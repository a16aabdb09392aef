//! Public operation surface.
//!
//! # Responsibility
//! - Provide the REST-shaped client facade consumed by UI and CLI callers.
//! - Define the response envelope every operation returns.
//!
//! # Invariants
//! - Every public result passes through exactly one `ApiResponse` constructor.

pub mod client;
pub mod response;

pub use client::TodoApiClient;
pub use response::{ApiResponse, STATUS_BAD_REQUEST, STATUS_OK};

//! Client configuration.
//!
//! # Responsibility
//! - Hold the storage key, simulated latency and write quota of a client.
//! - Validate raw values coming from environment or command-line input.
//!
//! # Invariants
//! - `storage_key` is never blank.

use crate::storage::{DEFAULT_CAPACITY_BYTES, DEFAULT_STORAGE_KEY};
use std::time::Duration;

/// Latency the original client simulated before every call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(100);

/// Settings for one `TodoApiClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Logical key the document is stored under.
    pub storage_key: String,
    /// Artificial delay before each operation; zero disables it.
    pub latency: Duration,
    /// Maximum serialized document size; `None` means unlimited.
    pub capacity_bytes: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: DEFAULT_LATENCY,
            capacity_bytes: Some(DEFAULT_CAPACITY_BYTES),
        }
    }
}

impl ClientConfig {
    /// Sets the storage key.
    ///
    /// # Errors
    /// - Returns an error when `key` is blank.
    pub fn with_storage_key(mut self, key: &str) -> Result<Self, String> {
        self.storage_key = normalize_storage_key(key)?;
        Ok(self)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_capacity(mut self, capacity_bytes: Option<usize>) -> Self {
        self.capacity_bytes = capacity_bytes;
        self
    }

    /// Zero latency; used by tests and scripted callers.
    pub fn without_latency(self) -> Self {
        self.with_latency(Duration::ZERO)
    }
}

/// Trims a storage key and rejects blank input.
pub fn normalize_storage_key(key: &str) -> Result<String, String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err("storage key cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Parses a millisecond latency value.
pub fn parse_latency_ms(raw: &str) -> Result<Duration, String> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| format!("invalid latency `{}`: {err}", raw.trim()))
}

/// Parses a byte quota; `0` and `unlimited` disable the quota.
pub fn parse_capacity(raw: &str) -> Result<Option<usize>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "0" | "unlimited" | "none" => Ok(None),
        value => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| format!("invalid capacity `{value}`: {err}")),
    }
}

use crate::cli::Cli;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;
use todo_api_core::config::{parse_capacity, parse_latency_ms};
use todo_api_core::{default_log_level, ClientConfig};

const DEFAULT_DB_PATH: &str = "todo_api.sqlite3";

/// Runtime settings resolved from flags, environment and `.env`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub client: ClientConfig,
    pub log_level: String,
    /// Logging stays off unless an absolute directory is configured.
    pub log_dir: Option<String>,
}

impl Settings {
    pub fn from_env(cli: &Cli) -> Result<Self> {
        let db_path = cli
            .db
            .clone()
            .or_else(|| env::var("TODO_API_DB_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let mut client = ClientConfig::default();
        if let Ok(key) = env::var("TODO_API_STORAGE_KEY") {
            client = client
                .with_storage_key(&key)
                .map_err(|err| anyhow!(err))
                .context("TODO_API_STORAGE_KEY")?;
        }
        if let Ok(raw) = env::var("TODO_API_LATENCY_MS") {
            let latency = parse_latency_ms(&raw)
                .map_err(|err| anyhow!(err))
                .context("TODO_API_LATENCY_MS")?;
            client = client.with_latency(latency);
        }
        if let Ok(raw) = env::var("TODO_API_CAPACITY_BYTES") {
            let capacity = parse_capacity(&raw)
                .map_err(|err| anyhow!(err))
                .context("TODO_API_CAPACITY_BYTES")?;
            client = client.with_capacity(capacity);
        }

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| env::var("TODO_API_LOG_LEVEL").ok())
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = env::var("TODO_API_LOG_DIR").ok();

        Ok(Self {
            db_path,
            client,
            log_level,
            log_dir,
        })
    }
}

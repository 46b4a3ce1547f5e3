//! Logging setup.
//!
//! The terminal belongs to the UI, so log records go to a file in the
//! temporary directory.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// File name of the log inside the temporary directory.
const LOG_FILE_NAME: &str = "imec-hub.log";

/// Initialize the global tracing subscriber.
///
/// # Arguments
/// * `default_filter` - Filter directive used when `RUST_LOG` is unset
///
/// # Returns
/// * `Result<PathBuf>` - Path of the log file
///
/// # Details
/// The log file is truncated on every start.
pub fn init(default_filter: &str) -> Result<PathBuf> {
    let log_path = std::env::temp_dir().join(LOG_FILE_NAME);

    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(log_path)
}

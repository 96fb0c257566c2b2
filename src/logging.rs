//! Tracing subscriber setup.
//!
//! Command-line runs log to stderr. The TUI owns the terminal, so it logs to
//! a plain-text file instead.

use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Where log lines go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Append to `<dir>/sales.log`, without ANSI colours.
    File(PathBuf),
}

/// Install the global subscriber. Returns the log file path for file targets.
///
/// Calling this twice is an error from `tracing-subscriber`; we surface it as
/// a runtime error instead of panicking.
pub fn init(target: &LogTarget, filter: &str) -> Result<Option<PathBuf>, AppError> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::input(format!("Invalid log filter '{filter}': {e}")))?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))?;
            Ok(None)
        }
        LogTarget::File(dir) => {
            let path = log_file_path(dir);
            create_dir_all(dir).map_err(|e| {
                AppError::runtime(format!("Cannot create log directory '{}': {e}", dir.display()))
            })?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| AppError::runtime(format!("Cannot open log file '{}': {e}", path.display())))?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))?;
            Ok(Some(path))
        }
    }
}

pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join("sales.log")
}

//! Tracing setup.
//!
//! Headless runs log to stderr. The TUI owns the terminal, so interactive runs
//! log to a file under the user data directory instead.

use crate::cli::Cli;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the file writer flushing until dropped at the end of `main`.
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Directory for log files when no explicit path is given.
pub fn logs_dir() -> PathBuf {
    crate::storage::base_dir().join("logs")
}

fn env_filter(default_level: &str) -> EnvFilter {
    // Fall back to `default_level` if RUST_LOG is unset or invalid.
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

pub fn init(args: &Cli) -> Result<LogGuard> {
    if !args.is_interactive() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter("warn"))
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(LogGuard { _worker: None });
    }

    let path = args
        .log_file
        .clone()
        .unwrap_or_else(|| logs_dir().join("sortviz.log"));
    let dir = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "sortviz.log".into());

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, worker) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    tracing::info!(log = %path.display(), "sortviz started");
    Ok(LogGuard {
        _worker: Some(worker),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_live_under_the_data_dir() {
        assert!(logs_dir().ends_with("sortviz/logs"));
    }
}

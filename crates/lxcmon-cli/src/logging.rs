//! Diagnostic log initialization for `-o` and `-l`.
//!
//! Priorities use the runtime's names and map onto tracing levels.
//! `RUST_LOG`, when set, overrides the priority.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use lxcmon_common::error::{MonitorError, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Where diagnostic output ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// The file given with `-o`.
    File,
}

/// Maps a runtime log priority name to a tracing level.
///
/// # Errors
///
/// Returns [`MonitorError::LogInit`] for unknown priorities.
pub fn parse_priority(priority: &str) -> Result<LevelFilter> {
    let level = match priority.to_ascii_uppercase().as_str() {
        "TRACE" => LevelFilter::TRACE,
        "DEBUG" => LevelFilter::DEBUG,
        "INFO" | "NOTICE" => LevelFilter::INFO,
        "WARN" | "WARNING" => LevelFilter::WARN,
        "ERROR" | "CRIT" | "ALERT" | "FATAL" => LevelFilter::ERROR,
        _ => {
            return Err(MonitorError::LogInit {
                message: format!("invalid log priority '{priority}'"),
            });
        }
    };
    Ok(level)
}

/// Opens the log file for appending, creating it if needed.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] if the file cannot be opened.
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| MonitorError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the priority is unknown, the log file cannot be
/// opened, or a subscriber is already installed.
pub fn init(log_file: Option<&Path>, priority: &str, program: &str) -> Result<LogTarget> {
    let level = parse_priority(priority)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let (installed, target) = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            let installed = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            (installed, LogTarget::File)
        }
        None => (
            builder.with_writer(std::io::stderr).try_init(),
            LogTarget::Stderr,
        ),
    };
    installed.map_err(|e| MonitorError::LogInit {
        message: e.to_string(),
    })?;

    tracing::debug!(program, priority, ?target, "logging initialized");
    Ok(target)
}

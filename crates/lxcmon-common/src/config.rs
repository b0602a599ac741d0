//! Run configuration for a monitor session.

use std::path::PathBuf;

use crate::types::MonitorAddress;

/// Everything a monitor session needs, resolved from the command line
/// and environment before any work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Container name or extended regex, matched against the whole name.
    pub pattern: String,
    /// Destination of the diagnostic log; stderr when absent.
    pub log_file: Option<PathBuf>,
    /// Minimum log priority; [`DEFAULT_LOG_PRIORITY`](crate::constants::DEFAULT_LOG_PRIORITY) when absent.
    pub log_priority: Option<String>,
    /// Channel the runtime publishes events to.
    pub address: MonitorAddress,
}

impl MonitorConfig {
    /// Creates a configuration for `pattern` with default logging and
    /// the default channel address.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            log_file: None,
            log_priority: None,
            address: MonitorAddress::default(),
        }
    }

    /// Returns the effective log priority.
    #[must_use]
    pub fn log_priority(&self) -> &str {
        self.log_priority
            .as_deref()
            .unwrap_or(crate::constants::DEFAULT_LOG_PRIORITY)
    }
}

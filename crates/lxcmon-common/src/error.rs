//! Unified error types for the lxcmon workspace.
//!
//! Every variant is fatal for the monitor: the binary reports it once and
//! exits with status 1. Unrecognized events are not errors and never
//! surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Required command-line input is missing or malformed.
    #[error("usage error: {message}")]
    Usage {
        /// Description of the problem.
        message: String,
    },

    /// The container name pattern failed to compile.
    #[error("failed to compile the regex '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern exactly as supplied by the user.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },

    /// The notification channel could not be opened.
    #[error("failed to open monitor channel {address}: {source}")]
    ChannelOpen {
        /// Display form of the channel address.
        address: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading from an open notification channel failed.
    #[error("failed to read from monitor channel: {source}")]
    ChannelRead {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Sending an event to a monitor channel failed.
    #[error("failed to notify monitor channel {address}: {source}")]
    ChannelSend {
        /// Display form of the channel address.
        address: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing a line to the output stream failed.
    #[error("failed to write event output: {source}")]
    Output {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The diagnostic log could not be initialized.
    #[error("failed to initialize logging: {message}")]
    LogInit {
        /// Description of the failure.
        message: String,
    },

    /// A file operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MonitorError>;

//! Socket cleanup on SIGINT/SIGTERM.
//!
//! The blocked read never returns to run the subscription's destructor, so
//! the signal handler unlinks the socket file itself. It only knows about a
//! path once this process has bound it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Exit status after SIGINT/SIGTERM, as a shell reports an interrupt.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// The socket file owned by this process, shared with the signal handler.
#[derive(Debug, Clone, Default)]
pub struct BoundSocket(Arc<OnceLock<PathBuf>>);

impl BoundSocket {
    /// Records `path` as bound by this process.
    pub fn arm(&self, path: &Path) {
        let _ = self.0.set(path.to_path_buf());
    }

    /// Unlinks the recorded socket file, if any.
    pub fn remove(&self) {
        if let Some(path) = self.0.get() {
            if let Err(e) = std::fs::remove_file(path) {
                tracing::debug!(path = %path.display(), error = %e, "failed to remove socket file");
            }
        }
    }
}

/// Installs a SIGINT/SIGTERM handler that removes `socket` and exits.
///
/// # Errors
///
/// Returns an error if a handler is already installed.
pub fn install(socket: BoundSocket) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        tracing::info!("interrupted, shutting down");
        socket.remove();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .map_err(|e| anyhow::anyhow!("failed to install signal handler: {e}"))
}

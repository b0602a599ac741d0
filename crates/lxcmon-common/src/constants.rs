//! System-wide constants and defaults.

/// Binary name for the CLI.
pub const BIN_NAME: &str = "lxc-monitor";

/// Name of the abstract socket the runtime publishes events to.
pub const DEFAULT_MONITOR_NAME: &str = "lxc-monitor";

/// Environment variable overriding the monitor channel address.
pub const MONITOR_SOCKET_ENV: &str = "LXCMON_SOCKET";

/// Size of the container name field in a notification message,
/// including the terminating NUL.
pub const MAX_NAME_LEN: usize = 4096;

/// Log priority used when `-l` is not given.
pub const DEFAULT_LOG_PRIORITY: &str = "ERROR";

//! Domain primitive types carried on the monitor channel.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::MonitorError;

/// Lifecycle state of a container, as numbered by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerState {
    /// Container is not running.
    Stopped = 0,
    /// Container is being started.
    Starting = 1,
    /// Container is actively running.
    Running = 2,
    /// Container is being stopped.
    Stopping = 3,
    /// Container start failed and is being torn down.
    Aborting = 4,
    /// Container processes are being frozen.
    Freezing = 5,
    /// Container processes are frozen.
    Frozen = 6,
    /// Container processes were thawed.
    Thawed = 7,
}

impl ContainerState {
    /// Every state in wire-code order.
    pub const ALL: [Self; 8] = [
        Self::Stopped,
        Self::Starting,
        Self::Running,
        Self::Stopping,
        Self::Aborting,
        Self::Freezing,
        Self::Frozen,
        Self::Thawed,
    ];

    /// Maps a wire code to a state, or `None` for codes the runtime may
    /// add later.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Returns the wire code of this state.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the canonical upper-case name of this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "STOPPED",
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Aborting => "ABORTING",
            Self::Freezing => "FREEZING",
            Self::Frozen => "FROZEN",
            Self::Thawed => "THAWED",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translates a state code into its canonical description.
#[must_use]
pub fn describe(code: i32) -> Option<&'static str> {
    ContainerState::from_code(code).map(ContainerState::as_str)
}

/// Kind tag of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A container changed state; the value is a [`ContainerState`] code.
    StateChanged,
    /// A container's log priority changed.
    Priority,
    /// A tag this monitor does not know about.
    Unknown(i32),
}

impl EventKind {
    /// Maps a wire tag to an event kind.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::StateChanged,
            1 => Self::Priority,
            other => Self::Unknown(other),
        }
    }

    /// Returns the wire tag of this kind.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::StateChanged => 0,
            Self::Priority => 1,
            Self::Unknown(code) => code,
        }
    }
}

/// A single notification received from the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Name of the container the event concerns.
    pub name: String,
    /// What happened.
    pub kind: EventKind,
    /// Kind-dependent payload.
    pub value: i32,
}

impl Event {
    /// Creates a state-change event.
    #[must_use]
    pub fn state_changed(name: impl Into<String>, state: ContainerState) -> Self {
        Self {
            name: name.into(),
            kind: EventKind::StateChanged,
            value: state.code(),
        }
    }
}

/// Address of the monitor channel socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorAddress {
    /// A name in the Linux abstract socket namespace.
    Abstract(String),
    /// A socket file on the filesystem.
    Path(PathBuf),
}

impl Default for MonitorAddress {
    fn default() -> Self {
        Self::Abstract(crate::constants::DEFAULT_MONITOR_NAME.to_string())
    }
}

impl fmt::Display for MonitorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abstract(name) => write!(f, "@{name}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for MonitorAddress {
    type Err = MonitorError;

    /// A leading `@` selects the abstract namespace; anything else is a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('@') {
            Some("") => Err(MonitorError::Usage {
                message: "abstract socket name must not be empty".into(),
            }),
            Some(name) => Ok(Self::Abstract(name.to_string())),
            None if s.is_empty() => Err(MonitorError::Usage {
                message: "monitor socket path must not be empty".into(),
            }),
            None => Ok(Self::Path(PathBuf::from(s))),
        }
    }
}

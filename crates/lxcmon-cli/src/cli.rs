//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use lxcmon_common::config::MonitorConfig;
use lxcmon_common::constants::MONITOR_SOCKET_ENV;
use lxcmon_common::types::MonitorAddress;

/// Print state changes of the containers whose name matches a pattern.
#[derive(Parser, Debug)]
#[command(name = "lxc-monitor", version, about, long_about = None)]
pub struct Cli {
    /// Name of the container or regular expression, matched against the whole name.
    #[arg(short = 'n', value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Path of the log file.
    #[arg(short = 'o', value_name = "LOGFILE")]
    pub log_file: Option<PathBuf>,

    /// Log level priority.
    #[arg(short = 'l', value_name = "LOGPRIORITY")]
    pub log_priority: Option<String>,

    /// Monitor channel address; a leading '@' selects the abstract namespace.
    #[arg(short = 's', long = "socket", env = MONITOR_SOCKET_ENV, value_name = "ADDR")]
    pub socket: Option<MonitorAddress>,
}

impl Cli {
    /// Resolves the parsed arguments into a run configuration.
    #[must_use]
    pub fn into_config(self) -> MonitorConfig {
        let mut config = MonitorConfig::new(self.name);
        config.log_file = self.log_file;
        config.log_priority = self.log_priority;
        if let Some(address) = self.socket {
            config.address = address;
        }
        config
    }
}

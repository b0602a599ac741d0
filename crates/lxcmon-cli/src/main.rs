//! # lxc-monitor
//!
//! Attaches to the container runtime's monitor channel and prints one
//! line per state change of every container whose name matches `-n`.
//! Runs until killed or the channel fails.

mod cleanup;
mod cli;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use lxcmon_common::config::MonitorConfig;
use lxcmon_common::constants::BIN_NAME;
use lxcmon_monitor::channel::Subscription;
use lxcmon_monitor::consumer;
use lxcmon_monitor::pattern::Pattern;

use crate::cleanup::BoundSocket;
use crate::cli::Cli;
use crate::logging::LogTarget;

fn main() -> ExitCode {
    let program = program_name();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let config = cli.into_config();

    let target = match logging::init(config.log_file.as_deref(), config.log_priority(), &program)
    {
        Ok(target) => target,
        Err(e) => return report(&program, &e),
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if target == LogTarget::File {
                tracing::error!("{e}");
            }
            report(&program, &e)
        }
    }
}

/// Compiles the pattern, opens the channel, and consumes events until
/// the channel fails.
fn run(config: &MonitorConfig) -> anyhow::Result<()> {
    let pattern = Pattern::compile(&config.pattern)?;

    let bound = BoundSocket::default();
    cleanup::install(bound.clone())?;
    let mut subscription = Subscription::open(&config.address)?;
    if let Some(path) = subscription.socket_path() {
        bound.arm(path);
    }
    tracing::info!(address = %subscription.address(), "monitoring containers");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    consumer::run(&mut subscription, &pattern, &mut out)?;
    Ok(())
}

#[allow(clippy::print_stderr)]
fn report(program: &str, err: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("{program}: {err}");
    ExitCode::FAILURE
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map_or_else(
            || BIN_NAME.to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
}

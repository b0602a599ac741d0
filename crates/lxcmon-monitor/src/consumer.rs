//! The event consumer loop.
//!
//! Reads events one at a time from an [`EventSource`], drops those whose
//! container name does not match the [`Pattern`], and prints one line per
//! state change. Other event kinds and state codes this monitor does not
//! know are ignored, never treated as errors.

use std::io::Write;

use lxcmon_common::error::Result;
use lxcmon_common::types::{Event, EventKind, describe};

use crate::channel::EventSource;
use crate::pattern::Pattern;

/// Runs the consumer loop until the source ends or fails.
///
/// A live [`Subscription`](crate::channel::Subscription) never ends, so
/// against the real channel this only returns on error.
///
/// # Errors
///
/// Returns the source's read error, or [`MonitorError::Output`](lxcmon_common::error::MonitorError::Output)
/// if writing to `out` fails. Nothing is retried.
pub fn run<S, W>(source: &mut S, pattern: &Pattern, out: &mut W) -> Result<()>
where
    S: EventSource + ?Sized,
    W: Write + ?Sized,
{
    tracing::info!(pattern = pattern.as_str(), "waiting for events");
    while let Some(event) = source.next_event()? {
        let _ = handle_event(&event, pattern, out)?;
    }
    tracing::info!("event source exhausted");
    Ok(())
}

/// Filters and renders a single event.
///
/// Returns `true` if a line was written.
///
/// # Errors
///
/// Returns an error if writing or flushing `out` fails.
pub fn handle_event<W>(event: &Event, pattern: &Pattern, out: &mut W) -> Result<bool>
where
    W: Write + ?Sized,
{
    if !pattern.matches(&event.name) {
        tracing::trace!(name = %event.name, "name does not match");
        return Ok(false);
    }

    match event.kind {
        EventKind::StateChanged => {
            let Some(state) = describe(event.value) else {
                tracing::debug!(name = %event.name, code = event.value, "ignoring unknown state");
                return Ok(false);
            };
            writeln!(out, "'{}' changed state to [{state}]", event.name)?;
            out.flush()?;
            Ok(true)
        }
        EventKind::Priority | EventKind::Unknown(_) => {
            tracing::debug!(name = %event.name, kind = event.kind.code(), "ignoring event");
            Ok(false)
        }
    }
}

//! Container event consumption for the lxcmon monitor.
//!
//! - [`pattern`]: anchored container-name matching.
//! - [`message`]: the fixed-size notification datagram.
//! - [`channel`]: the monitor socket and the [`EventSource`](channel::EventSource) seam.
//! - [`consumer`]: the blocking filter-and-print loop.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod channel;
pub mod consumer;
pub mod message;
pub mod pattern;

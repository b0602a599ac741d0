//! # lxcmon-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the lxcmon workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and describes the vocabulary of the container runtime's
//! notification channel: container states, event kinds, and the address
//! a monitor listens on.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

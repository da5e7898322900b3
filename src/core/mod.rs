//! core
//!
//! Domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - Command invocation (positional arguments and flags)
//! - [`config`] - Persisted session and target configuration
//!
//! # Design
//!
//! Core has no knowledge of the engine, the terminal, or the network.

pub mod config;
pub mod types;

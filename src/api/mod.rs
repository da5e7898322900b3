//! api
//!
//! Remote operation gateway for the platform API.
//!
//! # Architecture
//!
//! The `Gateway` trait is the only point of contact with the remote system
//! and the only producer of warnings. Commands receive a `&dyn Gateway`
//! from the executor; the CLI builds the real one with [`create_gateway`].
//!
//! # Modules
//!
//! - `traits`: Core `Gateway` trait, `Response`, `RemoteOutcome`, `ApiError`
//! - [`cloud_controller`]: HTTP implementation using `reqwest`
//! - [`mock`]: Mock implementation for deterministic testing
//! - `factory`: Gateway creation from configuration

pub mod cloud_controller;
mod factory;
pub mod mock;
mod traits;

pub use factory::{create_gateway, UnconfiguredGateway};
pub use traits::*;

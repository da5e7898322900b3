//! cfkit - command execution core for the `cf` platform CLI
//!
//! Every `cf` subcommand validates its preconditions, resolves its inputs
//! (secrets included), calls the remote platform API, and renders a
//! success, warning, or failure outcome with a matching exit status.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Usage → Gate → Confirm → Resolve → Run → Render
//! - [`core`] - Configuration and invocation types
//! - [`api`] - Remote operation gateway (HTTP and mock)
//! - [`credentials`] - Secret resolution from argument, environment, or prompt
//! - [`ui`] - Output streams and user input
//!
//! # Correctness Invariants
//!
//! cfkit maintains the following invariants:
//!
//! 1. A failed requirement precedes any remote call
//! 2. Each secret is resolved once and is never echoed or logged
//! 3. Gateway warnings reach stderr before the terminal marker
//! 4. Destructive commands ask before acting unless forced

pub mod api;
pub mod cli;
pub mod core;
pub mod credentials;
pub mod engine;
pub mod ui;

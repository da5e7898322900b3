//! cli
//!
//! Command-line interface layer for cf.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. All gating, prompting, and rendering
//! flows through the engine's executor.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::engine;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CFKIT_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = engine::Context {
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };
    tracing::debug!(?ctx, "starting");

    let result = commands::dispatch(cli.command, &ctx)?;
    Ok(match u8::try_from(result.exit_code()) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    })
}

/// Install the stderr log subscriber.
///
/// `CFKIT_LOG` takes precedence; otherwise `--debug` selects `debug` and
/// logging stays at `error`.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

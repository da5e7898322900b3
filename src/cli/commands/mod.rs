//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler is a [`Command`] implementation. Dispatch:
//! 1. Checks the argument count
//! 2. Loads the configuration and scans capabilities from it
//! 3. Builds the gateway for the configured API endpoint
//! 4. Runs the command through the engine [`Executor`]
//!
//! Handlers do NOT gate, prompt for secrets, or print terminal markers
//! themselves.
//!
//! # Async Commands
//!
//! Gateway calls are async. Dispatch creates a tokio runtime and blocks on
//! the executor; calls within one invocation are awaited one at a time.

mod delete_user;
mod update_service_broker;

pub use delete_user::DeleteUser;
pub use update_service_broker::{UpdateServiceBroker, BROKER_PASSWORD_ENV};

use anyhow::Result;

use crate::api::create_gateway;
use crate::cli::args::Command as CliCommand;
use crate::core::config::Config;
use crate::core::types::{Flags, Invocation};
use crate::credentials::ProcessEnv;
use crate::engine::command::Command;
use crate::engine::{self, CommandError, Context, Executor, InvocationResult, FORCE_FLAG};
use crate::ui::Ui;

/// Dispatch a command to its handler.
///
/// Errors are only returned for failures outside the command protocol
/// (the async runtime cannot be created). Everything else is rendered and
/// reported through the returned [`InvocationResult`].
pub fn dispatch(command: CliCommand, ctx: &Context) -> Result<InvocationResult> {
    let mut ui = Ui::terminal(ctx.interactive, ctx.quiet);

    match command {
        CliCommand::DeleteUser { args, force } => {
            let inv = Invocation::new(args, Flags::new().with_bool(FORCE_FLAG, force));
            execute(&DeleteUser, &inv, &mut ui)
        }
        CliCommand::UpdateServiceBroker { args } => {
            let inv = Invocation::new(args, Flags::new());
            execute(&UpdateServiceBroker, &inv, &mut ui)
        }
    }
}

fn execute<C: Command>(command: &C, inv: &Invocation, ui: &mut Ui) -> Result<InvocationResult> {
    if let Err(err) = engine::check_usage(command, inv, ui) {
        return Ok(InvocationResult::Failed(err));
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => return Ok(fail(ui, err.into())),
    };
    let caps = engine::scan(&config);
    let gateway = match create_gateway(&config) {
        Ok(gateway) => gateway,
        Err(err) => return Ok(fail(ui, err.into())),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let mut executor = Executor::new(ui, gateway.as_ref(), &ProcessEnv, &caps);
    Ok(rt.block_on(executor.execute(command, inv)))
}

/// Render a failure that happened before the executor could start.
fn fail(ui: &mut Ui, err: CommandError) -> InvocationResult {
    tracing::warn!(error = %err, "setup failed");
    ui.failed(&err);
    InvocationResult::Failed(err)
}

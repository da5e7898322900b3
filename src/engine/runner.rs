//! engine::runner
//!
//! Engine runner - the single entry point for command execution.
//!
//! # Architecture
//!
//! Every invocation flows through [`Executor::execute`], which drives the
//! command through a fixed lifecycle:
//!
//! ```text
//! CheckUsage -> CheckTarget -> Requirements -> [Confirm] -> ResolveCredentials
//!     -> Run (gateway calls) -> Render
//! ```
//!
//! **Key principle:** commands cannot skip a stage. Gating, confirmation,
//! and credential resolution all happen before [`Command::run`] is called,
//! and rendering of the terminal outcome happens only here.
//!
//! # Invariants
//!
//! - A usage or requirement failure makes zero gateway calls
//! - A declined confirmation makes zero gateway calls and prints nothing more
//! - Accumulated warnings are flushed before the terminal marker
//! - Exactly one terminal outcome is rendered per invocation
//!
//! # Example
//!
//! ```ignore
//! use cfkit::engine::runner::Executor;
//!
//! let mut executor = Executor::new(&mut ui, gateway.as_ref(), &ProcessEnv, &caps);
//! let result = executor.execute(&DeleteUser, &invocation).await;
//! std::process::exit(result.exit_code());
//! ```

use super::capabilities::CapabilitySet;
use super::command::{Command, Completion, Credentials, RunContext};
use super::gate::check_target;
use super::outcome::WarningLog;
use super::{CommandError, InvocationResult};
use crate::api::Gateway;
use crate::core::types::Invocation;
use crate::credentials::{self, Environment};
use crate::ui::Ui;

/// Name of the flag that skips confirmation of destructive commands.
pub const FORCE_FLAG: &str = "f";

/// Check the argument count of `inv`, printing the usage text on failure.
///
/// Dispatch calls this before loading any session state so that a wrong
/// argument count is reported the same way whatever the configuration.
pub fn check_usage<C: Command>(
    command: &C,
    inv: &Invocation,
    ui: &mut Ui,
) -> Result<(), CommandError> {
    command.check_usage(inv).map_err(|err| {
        tracing::debug!(command = C::NAME, %err, "usage check failed");
        ui.fail_with_usage(command.usage());
        err.into()
    })
}

/// Drives commands through the lifecycle.
pub struct Executor<'a> {
    ui: &'a mut Ui,
    gateway: &'a dyn Gateway,
    env: &'a dyn Environment,
    caps: &'a CapabilitySet,
}

/// Where the lifecycle stopped before rendering.
enum Stop {
    Declined,
    Usage(CommandError),
    Failed(CommandError),
}

impl<'a> Executor<'a> {
    pub fn new(
        ui: &'a mut Ui,
        gateway: &'a dyn Gateway,
        env: &'a dyn Environment,
        caps: &'a CapabilitySet,
    ) -> Self {
        Self {
            ui,
            gateway,
            env,
            caps,
        }
    }

    /// Run `command` for `inv` and render its outcome.
    pub async fn execute<C: Command>(
        &mut self,
        command: &C,
        inv: &Invocation,
    ) -> InvocationResult {
        tracing::debug!(
            command = C::NAME,
            args = inv.len(),
            gateway = self.gateway.name(),
            "executing"
        );

        let mut warnings = WarningLog::new();
        let outcome = self.drive(command, inv, &mut warnings).await;
        self.render(C::NAME, outcome, &mut warnings)
    }

    async fn drive<C: Command>(
        &mut self,
        command: &C,
        inv: &Invocation,
        warnings: &mut WarningLog,
    ) -> Result<Completion, Stop> {
        // 1. Usage
        check_usage(command, inv, self.ui).map_err(Stop::Usage)?;

        // 2. Target
        check_target(self.caps, command.target()).map_err(|e| Stop::Failed(e.into()))?;

        // 3. Requirements
        command
            .requirements()
            .evaluate(self.caps)
            .map_err(|e| Stop::Failed(e.into()))?;

        // 4. Confirmation
        if let Some(question) = command.confirmation(inv) {
            if inv.flags().bool(FORCE_FLAG) {
                tracing::debug!(command = C::NAME, "confirmation skipped by force flag");
            } else {
                let confirmed = self
                    .ui
                    .confirm(question)
                    .map_err(|e| Stop::Failed(e.into()))?;
                if !confirmed {
                    tracing::debug!(command = C::NAME, "declined");
                    return Err(Stop::Declined);
                }
            }
        }

        // 5. Credentials
        let mut resolved = Vec::new();
        for input in command.secrets(inv) {
            let credential =
                credentials::resolve(&input.spec, input.positional.as_deref(), self.env, self.ui)
                    .map_err(|e| Stop::Failed(e.into()))?;
            resolved.push(credential);
        }

        // 6. Run
        let mut ctx = RunContext {
            ui: &mut *self.ui,
            gateway: self.gateway,
            warnings,
        };
        command
            .run(inv, Credentials::new(resolved), &mut ctx)
            .await
            .map_err(Stop::Failed)
    }

    fn render(
        &mut self,
        command: &'static str,
        outcome: Result<Completion, Stop>,
        warnings: &mut WarningLog,
    ) -> InvocationResult {
        warnings.flush(self.ui);

        match outcome {
            Ok(completion) => {
                self.ui.ok();
                if let Some(notice) = &completion.notice {
                    self.ui.warn(notice);
                }
                tracing::debug!(command, "completed");
                InvocationResult::Ok {
                    notice: completion.notice,
                }
            }
            Err(Stop::Declined) => InvocationResult::Declined,
            Err(Stop::Usage(err)) => InvocationResult::Failed(err),
            Err(Stop::Failed(err)) => {
                tracing::warn!(command, error = %err, "command failed");
                self.ui.failed(&err);
                InvocationResult::Failed(err)
            }
        }
    }
}

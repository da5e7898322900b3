//! engine::command
//!
//! Command trait for lifecycle integration.
//!
//! # Architecture
//!
//! Every command declares, statically or from its invocation:
//!
//! 1. Its usage text and accepted argument counts
//! 2. The target it needs and its ordered requirements
//! 3. Whether it is destructive (and the confirmation question)
//! 4. Which secrets it needs and where their positional slots are
//!
//! The executor drives those declarations through the lifecycle and only
//! then calls [`Command::run`] with the resolved credentials. A command
//! never gates, prompts for secrets, or renders its terminal outcome itself.
//!
//! # Example
//!
//! ```ignore
//! use cfkit::engine::command::{Command, Completion, RunContext, UsageError};
//!
//! struct Whoami;
//!
//! #[async_trait]
//! impl Command for Whoami {
//!     const NAME: &'static str = "whoami";
//!
//!     fn usage(&self) -> &'static str { "cf whoami" }
//!
//!     fn check_usage(&self, inv: &Invocation) -> Result<(), UsageError> {
//!         UsageError::expect(Self::NAME, inv, &[0])
//!     }
//!
//!     async fn run(
//!         &self,
//!         _inv: &Invocation,
//!         _credentials: Credentials,
//!         ctx: &mut RunContext<'_>,
//!     ) -> Result<Completion, CommandError> {
//!         let user = require(ctx.gateway.current_user().await, ctx.warnings, "user")?;
//!         ctx.ui.say(user.username);
//!         Ok(Completion::done())
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use super::gate::{requirements, RequirementSet, TargetScope};
use super::outcome::WarningLog;
use super::CommandError;
use crate::api::Gateway;
use crate::core::types::Invocation;
use crate::credentials::{Credential, SecretSpec};
use crate::ui::Ui;

/// Wrong number of positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incorrect Usage: '{command}' takes {expected} argument(s), got {got}")]
pub struct UsageError {
    pub command: &'static str,
    pub expected: String,
    pub got: usize,
}

impl UsageError {
    /// Check that the invocation has one of the `allowed` argument counts.
    pub fn expect(
        command: &'static str,
        inv: &Invocation,
        allowed: &[usize],
    ) -> Result<(), UsageError> {
        if allowed.contains(&inv.len()) {
            return Ok(());
        }
        Err(UsageError {
            command,
            expected: allowed
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" or "),
            got: inv.len(),
        })
    }
}

/// A secret a command needs, with its positional value if one was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretInput {
    pub spec: SecretSpec,
    pub positional: Option<String>,
}

/// Credentials resolved for one invocation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    resolved: Vec<Credential>,
}

impl Credentials {
    pub fn new(resolved: Vec<Credential>) -> Self {
        Self { resolved }
    }

    /// Take the credential named `name`.
    pub fn take(&mut self, name: &str) -> Option<Credential> {
        let index = self.resolved.iter().position(|c| c.name() == name)?;
        Some(self.resolved.remove(index))
    }
}

/// Successful end of a command run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Informational warning rendered after the `OK` marker.
    pub notice: Option<String>,
}

impl Completion {
    /// Finished without a notice.
    pub fn done() -> Self {
        Self { notice: None }
    }

    /// Finished with an informational notice (for example "does not exist").
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
        }
    }
}

/// What a command may touch while it runs.
pub struct RunContext<'a> {
    pub ui: &'a mut Ui,
    pub gateway: &'a dyn Gateway,
    pub warnings: &'a mut WarningLog,
}

/// A command that can be executed through the engine lifecycle.
#[async_trait]
pub trait Command: Send + Sync {
    /// Subcommand name as typed by the user.
    const NAME: &'static str;

    /// Usage text shown on a usage error.
    fn usage(&self) -> &'static str;

    /// Validate the positional argument count.
    fn check_usage(&self, inv: &Invocation) -> Result<(), UsageError>;

    /// Target the command needs. Defaults to a session only.
    fn target(&self) -> TargetScope {
        TargetScope::NONE
    }

    /// Requirements checked after the target, in order.
    fn requirements(&self) -> &'static RequirementSet {
        &requirements::NONE
    }

    /// Confirmation question for destructive commands.
    ///
    /// The executor skips the question when the `f` flag is set.
    fn confirmation(&self, _inv: &Invocation) -> Option<String> {
        None
    }

    /// Secrets to resolve before the command runs.
    fn secrets(&self, _inv: &Invocation) -> Vec<SecretInput> {
        Vec::new()
    }

    /// Perform the command's remote calls.
    async fn run(
        &self,
        inv: &Invocation,
        credentials: Credentials,
        ctx: &mut RunContext<'_>,
    ) -> Result<Completion, CommandError>;
}

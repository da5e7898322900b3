//! engine
//!
//! Orchestrates the command lifecycle: Usage -> Gate -> Confirm -> Resolve -> Run -> Render.
//!
//! # Architecture
//!
//! The engine is the central coordinator for every `cf` command:
//!
//! 1. **Usage**: Check the positional argument count
//! 2. **Gate**: Verify the target and the command's requirements
//! 3. **Confirm**: Ask before destructive commands unless forced
//! 4. **Resolve**: Resolve secrets from argument, environment, or prompt
//! 5. **Run**: Let the command make its gateway calls
//! 6. **Render**: Flush warnings, then print exactly one terminal outcome
//!
//! # Invariants
//!
//! - Gating never touches the network and always precedes remote calls
//! - Commands never render their own terminal outcome
//! - Warnings reach the secondary stream before `OK` or `FAILED`

pub mod capabilities;
pub mod command;
pub mod gate;
pub mod outcome;
pub mod runner;

pub use capabilities::{scan, Capability, CapabilitySet};
pub use command::{Command, Completion, Credentials, RunContext, SecretInput, UsageError};
pub use gate::{check_target, Requirement, RequirementError, RequirementSet, TargetScope};
pub use outcome::{classify_lookup, require, WarningLog};
pub use runner::{check_usage, Executor, FORCE_FLAG};

use thiserror::Error;

use crate::api::ApiError;
use crate::core::config::ConfigError;
use crate::ui::PromptError;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Quiet mode (no progress messages or `OK` marker).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            quiet: false,
            interactive: true,
        }
    }
}

/// Everything that can stop a command.
///
/// Messages pass through unmodified from the underlying error.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Requirement(#[from] RequirementError),

    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A declared secret was not handed to the command.
    #[error("missing credential '{0}'")]
    MissingCredential(&'static str),
}

/// Terminal outcome of one invocation.
#[derive(Debug)]
pub enum InvocationResult {
    /// Completed, with an optional informational notice.
    Ok { notice: Option<String> },
    /// The user declined the confirmation.
    Declined,
    /// Stopped by an error.
    Failed(CommandError),
}

impl InvocationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, InvocationResult::Ok { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, InvocationResult::Failed(_))
    }

    /// Process exit status: 0 unless the invocation failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            InvocationResult::Ok { .. } | InvocationResult::Declined => 0,
            InvocationResult::Failed(_) => 1,
        }
    }
}

//! delete-user command - Delete a user
//!
//! # Gating
//!
//! Uses `requirements::LOGIN`. Destructive: asks for confirmation unless
//! `-f` is given.
//!
//! # Flow
//!
//! 1. Print `Deleting user <name>...`
//! 2. Look the user up by name; a missing user finishes with a notice
//! 3. Delete the user

use async_trait::async_trait;

use crate::core::types::Invocation;
use crate::engine::command::{Command, Completion, Credentials, RunContext, UsageError};
use crate::engine::gate::{requirements, RequirementSet};
use crate::engine::outcome::{classify_lookup, require};
use crate::engine::CommandError;

/// The `delete-user` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteUser;

impl DeleteUser {
    fn username(inv: &Invocation) -> &str {
        inv.arg(0).unwrap_or_default()
    }
}

#[async_trait]
impl Command for DeleteUser {
    const NAME: &'static str = "delete-user";

    fn usage(&self) -> &'static str {
        "NAME:\n   delete-user - Delete a user\n\n\
         USAGE:\n   cf delete-user USERNAME [-f]\n\n\
         OPTIONS:\n   -f      Force deletion without confirmation"
    }

    fn check_usage(&self, inv: &Invocation) -> Result<(), UsageError> {
        UsageError::expect(Self::NAME, inv, &[1])
    }

    fn requirements(&self) -> &'static RequirementSet {
        &requirements::LOGIN
    }

    fn confirmation(&self, inv: &Invocation) -> Option<String> {
        Some(format!("Really delete user {}? >", Self::username(inv)))
    }

    async fn run(
        &self,
        inv: &Invocation,
        _credentials: Credentials,
        ctx: &mut RunContext<'_>,
    ) -> Result<Completion, CommandError> {
        let username = Self::username(inv);
        ctx.ui.say(format!("Deleting user {}...", username));

        let lookup = ctx.gateway.find_user_by_username(username).await;
        let Some(user) = classify_lookup(lookup, ctx.warnings)? else {
            return Ok(Completion::with_notice(format!(
                "User {} does not exist.",
                username
            )));
        };

        let deleted = ctx.gateway.delete_user(&user).await;
        require(deleted, ctx.warnings, &format!("User {}", username))?;

        Ok(Completion::done())
    }
}

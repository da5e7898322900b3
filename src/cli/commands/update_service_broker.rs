//! update-service-broker command - Update a service broker
//!
//! # Arguments
//!
//! ```text
//! SERVICE_BROKER USERNAME PASSWORD URL
//! SERVICE_BROKER USERNAME URL
//! ```
//!
//! In the three-argument form the password comes from `CF_BROKER_PASSWORD`
//! or, failing that, an interactive prompt with echo suppressed. Four
//! arguments with an empty last one are read as the three-argument form.
//!
//! # Gating
//!
//! Session only; no org or space needed.

use async_trait::async_trait;

use crate::api::ServiceBrokerUpdate;
use crate::core::types::Invocation;
use crate::credentials::SecretSpec;
use crate::engine::command::{
    Command, Completion, Credentials, RunContext, SecretInput, UsageError,
};
use crate::engine::outcome::{classify_lookup, require};
use crate::engine::CommandError;

/// Environment variable consulted when the password is omitted.
pub const BROKER_PASSWORD_ENV: &str = "CF_BROKER_PASSWORD";

const PASSWORD: SecretSpec =
    SecretSpec::new("password", BROKER_PASSWORD_ENV, "Service Broker Password");

/// The `update-service-broker` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateServiceBroker;

/// Positional arguments, with the password slot only in the long form.
struct BrokerArgs<'a> {
    name: &'a str,
    username: &'a str,
    password: Option<&'a str>,
    url: &'a str,
}

impl<'a> BrokerArgs<'a> {
    fn parse(inv: &'a Invocation) -> Self {
        let arg = move |i: usize| inv.arg(i).unwrap_or_default();
        if inv.len() == 4 && !arg(3).is_empty() {
            Self {
                name: arg(0),
                username: arg(1),
                password: inv.arg(2),
                url: arg(3),
            }
        } else {
            Self {
                name: arg(0),
                username: arg(1),
                password: None,
                url: arg(2),
            }
        }
    }
}

#[async_trait]
impl Command for UpdateServiceBroker {
    const NAME: &'static str = "update-service-broker";

    fn usage(&self) -> &'static str {
        "NAME:\n   update-service-broker - Update a service broker\n\n\
         USAGE:\n   cf update-service-broker SERVICE_BROKER USERNAME PASSWORD URL\n   \
         cf update-service-broker SERVICE_BROKER USERNAME URL \
         (omit password to specify interactively or via environment variable)\n\n\
         WARNING:\n   Providing your password as a command line option is highly discouraged\n   \
         Your password may be visible to others and may be recorded in your shell history"
    }

    fn check_usage(&self, inv: &Invocation) -> Result<(), UsageError> {
        UsageError::expect(Self::NAME, inv, &[3, 4])
    }

    fn secrets(&self, inv: &Invocation) -> Vec<SecretInput> {
        vec![SecretInput {
            spec: PASSWORD,
            positional: BrokerArgs::parse(inv).password.map(str::to_string),
        }]
    }

    async fn run(
        &self,
        inv: &Invocation,
        mut credentials: Credentials,
        ctx: &mut RunContext<'_>,
    ) -> Result<Completion, CommandError> {
        let args = BrokerArgs::parse(inv);
        let password = credentials
            .take(PASSWORD.name)
            .ok_or(CommandError::MissingCredential(PASSWORD.name))?;

        let user = require(ctx.gateway.current_user().await, ctx.warnings, "user")?;
        ctx.ui.say(format!(
            "Updating service broker {} as {}...",
            args.name, user.username
        ));

        let lookup = ctx.gateway.find_service_broker_by_name(args.name).await;
        let Some(broker) = classify_lookup(lookup, ctx.warnings)? else {
            return Ok(Completion::with_notice(format!(
                "Service broker {} does not exist.",
                args.name
            )));
        };

        let update = ServiceBrokerUpdate {
            username: args.username.to_string(),
            password: password.into_secret(),
            url: args.url.to_string(),
        };
        let updated = ctx
            .gateway
            .update_service_broker(&broker.guid, &update)
            .await;
        require(
            updated,
            ctx.warnings,
            &format!("Service broker {}", args.name),
        )?;

        Ok(Completion::done())
    }
}

//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt, even when stdin is piped
//! - `--quiet` / `-q`: No progress messages
//!
//! Subcommands take their positional arguments as a raw list. The argument
//! count is checked by each command so that a wrong count produces the
//! command's own usage text.

use clap::{Parser, Subcommand};

/// cf - manage users and service brokers on a platform API
#[derive(Parser, Debug)]
#[command(name = "cf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// No progress messages or OK marker; warnings and failures still print
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Prompts are allowed unless `--no-interactive` was given. A piped
    /// stdin answers them line by line.
    pub fn interactive(&self) -> bool {
        !self.no_interactive
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete a user
    #[command(
        name = "delete-user",
        after_help = "\
EXAMPLES:
    # Delete after confirming
    cf delete-user bob

    # Delete without confirmation
    cf delete-user bob -f"
    )]
    DeleteUser {
        /// USERNAME
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        /// Force deletion without confirmation
        #[arg(short = 'f')]
        force: bool,
    },

    /// Update a service broker
    #[command(
        name = "update-service-broker",
        after_help = "\
EXAMPLES:
    # Password as an argument (visible in shell history)
    cf update-service-broker my-broker admin s3cret https://broker.example.com

    # Password from CF_BROKER_PASSWORD or an interactive prompt
    cf update-service-broker my-broker admin https://broker.example.com"
    )]
    UpdateServiceBroker {
        /// SERVICE_BROKER USERNAME [PASSWORD] URL
        #[arg(value_name = "ARGS", allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

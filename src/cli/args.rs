//! CLI argument definitions and `DeployRequest` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::deploy::Operation;

use super::{resolve_instance, DeployRequest};

/// Top-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum DeployCommand {
    /// Start the server under forever, logging to <home>/pages.log.
    Start,
    /// Stop the server managed by forever.
    Stop,
    /// Restart the server managed by forever.
    Restart,
    /// Print the resolved environment and remote command lines without connecting.
    Show,
}

impl DeployCommand {
    /// Supervisor operation for this command; `None` for `show`.
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            DeployCommand::Start => Some(Operation::Start),
            DeployCommand::Stop => Some(Operation::Stop),
            DeployCommand::Restart => Some(Operation::Restart),
            DeployCommand::Show => None,
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Start, stop, or restart the Pages server through forever over SSH",
    long_about = None,
    after_help = "Hint: use `pages-deploy --dry-run start` to print the remote command without connecting."
)]
pub struct DeployArgs {
    /// Path to deploy.toml (overrides PAGES_DEPLOY_CONFIG).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    /// Environment to act on (overrides PAGES_DEPLOY_INSTANCE; default `internal`).
    #[arg(long = "instance", global = true)]
    pub instance_override: Option<String>,
    /// Log and print the remote invocation instead of running it.
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: DeployCommand,
}

impl DeployArgs {
    /// Build a `DeployRequest` from CLI args and environment variables.
    pub fn into_request(self) -> Result<DeployRequest> {
        let (instance, instance_source) = resolve_instance(self.instance_override)?;
        Ok(DeployRequest {
            config_override: self.config_override,
            instance,
            instance_source,
            dry_run: self.dry_run,
            command: self.command,
        })
    }
}

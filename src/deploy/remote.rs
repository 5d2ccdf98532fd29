//! Remote command execution over the operator's SSH client.

use std::process::Stdio;

use serde::Serialize;
use tokio::process::Command;
use tracing::{info, warn};

use crate::{config::SshSection, lib::errors::DeployError};

/// OpenSSH reserves this exit status for its own failures.
const SSH_TRANSPORT_FAILURE: i32 = 255;

/// One command line to run on one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteInvocation {
    pub host: String,
    pub working_dir: Option<String>,
    pub command: String,
}

impl RemoteInvocation {
    /// The line handed to the remote shell; the directory change only lasts for this line.
    pub fn remote_line(&self) -> String {
        match self.working_dir.as_deref() {
            Some(dir) => format!("cd {dir} && {}", self.command),
            None => self.command.clone(),
        }
    }
}

/// Exit information from a remote command that did run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteOutcome {
    /// `None` when the remote side was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl RemoteOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Transport used by the controller to run a single remote command.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run one invocation in a fresh session. Transport failures are
    /// [`DeployError::Connection`]; a non-zero exit is reported in the outcome.
    async fn run(&mut self, invocation: &RemoteInvocation) -> Result<RemoteOutcome, DeployError>;
}

/// Runs invocations through the local `ssh` client, streaming output to the terminal.
#[derive(Debug, Clone)]
pub struct SshSession {
    settings: SshSection,
}

impl SshSession {
    pub fn new(settings: SshSection) -> Self {
        Self { settings }
    }
}

impl RemoteShell for SshSession {
    async fn run(&mut self, invocation: &RemoteInvocation) -> Result<RemoteOutcome, DeployError> {
        let mut command = build_ssh_command(&self.settings, invocation);
        info!(
            target: "pages_deploy::remote",
            host = %invocation.host,
            working_dir = invocation.working_dir.as_deref().unwrap_or(""),
            command = %invocation.command,
            "Running remote command"
        );

        let status = command.status().await.map_err(|err| {
            warn!(
                target: "pages_deploy::remote",
                host = %invocation.host,
                reason = %err,
                "Failed to start ssh client"
            );
            DeployError::Connection {
                host: invocation.host.clone(),
                message: format!(
                    "failed to start {}: {err}",
                    self.settings.binary.display()
                ),
            }
        })?;

        if status.code() == Some(SSH_TRANSPORT_FAILURE) {
            return Err(DeployError::Connection {
                host: invocation.host.clone(),
                message: format!("ssh exited with status {SSH_TRANSPORT_FAILURE}"),
            });
        }

        Ok(RemoteOutcome {
            exit_code: status.code(),
        })
    }
}

/// Build the `ssh` command for an invocation.
pub fn build_ssh_command(settings: &SshSection, invocation: &RemoteInvocation) -> Command {
    let mut command = Command::new(&settings.binary);
    command.kill_on_drop(true);
    command.args(ssh_args(settings, invocation));
    command.stdin(Stdio::null());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());
    command
}

/// Arguments passed to the ssh client, exposed for logging and tests.
pub fn ssh_args(settings: &SshSection, invocation: &RemoteInvocation) -> Vec<String> {
    let mut args = Vec::new();
    if !settings.use_ssh_config {
        args.push("-F".to_string());
        args.push("/dev/null".to_string());
    } else if let Some(config_file) = settings.config_file.as_deref() {
        args.push("-F".to_string());
        args.push(config_file.display().to_string());
    }
    args.push("--".to_string());
    args.push(invocation.host.clone());
    args.push(invocation.remote_line());
    args
}

/// Records invocations without connecting anywhere.
#[derive(Debug, Default)]
pub struct DryRunShell {
    invocations: Vec<RemoteInvocation>,
}

impl DryRunShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> &[RemoteInvocation] {
        &self.invocations
    }
}

impl RemoteShell for DryRunShell {
    async fn run(&mut self, invocation: &RemoteInvocation) -> Result<RemoteOutcome, DeployError> {
        info!(
            target: "pages_deploy::remote",
            host = %invocation.host,
            remote_line = %invocation.remote_line(),
            "Dry run; skipping remote command"
        );
        self.invocations.push(invocation.clone());
        Ok(RemoteOutcome { exit_code: Some(0) })
    }
}

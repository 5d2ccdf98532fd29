//! Deployment controller: command construction, remote execution, and the start/stop/restart operations.
pub mod command;
pub mod controller;
pub mod remote;

pub use command::{CommandSpec, CommandSpecBuilder, DeploymentPlan, Operation};
pub use controller::DeploymentController;
pub use remote::{
    build_ssh_command, ssh_args, DryRunShell, RemoteInvocation, RemoteOutcome, RemoteShell,
    SshSession,
};

//! Typed construction of supervisor command lines.

use std::fmt;

use serde::Serialize;

use crate::{
    config::{EnvironmentProfile, SupervisorSection},
    lib::shell::join_remote_path,
};

use super::remote::RemoteInvocation;

/// Supervisor control operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Start,
    Stop,
    Restart,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Start, Operation::Stop, Operation::Restart];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Restart => "restart",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invocation of the supervised process. The supervisor matches running
/// processes on this exact string, so it is only ever built by
/// [`CommandSpecBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec(String);

impl CommandSpec {
    pub fn builder(executable: impl Into<String>) -> CommandSpecBuilder {
        CommandSpecBuilder {
            executable: executable.into(),
            port: None,
            home: None,
            rbenv: None,
        }
    }

    /// Build the spec for a profile, adding each flag the profile defines.
    pub fn for_profile(profile: &EnvironmentProfile) -> Self {
        let mut builder = Self::builder(profile.executable.as_str());
        if let Some(port) = profile.port {
            builder = builder.port(port);
        }
        if let Some(home) = profile.home.as_deref() {
            builder = builder.home(home);
        }
        if let Some(rbenv) = profile.rbenv.as_deref() {
            builder = builder.rbenv(rbenv);
        }
        builder.build()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct CommandSpecBuilder {
    executable: String,
    port: Option<u16>,
    home: Option<String>,
    rbenv: Option<String>,
}

impl CommandSpecBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn rbenv(mut self, rbenv: impl Into<String>) -> Self {
        self.rbenv = Some(rbenv.into());
        self
    }

    /// Flags are always emitted in `--port`, `--home`, `--rbenv` order.
    pub fn build(self) -> CommandSpec {
        let mut line = self.executable;
        if let Some(port) = self.port {
            line.push_str(&format!(" --port {port}"));
        }
        if let Some(home) = self.home {
            line.push_str(&format!(" --home {home}"));
        }
        if let Some(rbenv) = self.rbenv {
            line.push_str(&format!(" --rbenv {rbenv}"));
        }
        CommandSpec(line)
    }
}

/// Everything derived from the active profile before any connection is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentPlan {
    pub instance: String,
    pub host: String,
    pub working_dir: Option<String>,
    pub log_path: String,
    pub spec: CommandSpec,
    pub program: String,
}

impl DeploymentPlan {
    pub fn new(profile: &EnvironmentProfile, supervisor: &SupervisorSection) -> Self {
        let log_dir = profile.home.as_deref().unwrap_or("~");
        Self {
            instance: profile.name.clone(),
            host: profile.host.clone(),
            working_dir: profile.working_dir.clone(),
            log_path: join_remote_path(log_dir, &supervisor.log_file),
            spec: CommandSpec::for_profile(profile),
            program: supervisor.program.clone(),
        }
    }

    /// The supervisor command line for `operation`.
    pub fn command_line(&self, operation: Operation) -> String {
        match operation {
            Operation::Start => format!(
                "{} start -l {} -a {}",
                self.program, self.log_path, self.spec
            ),
            Operation::Stop => format!("{} stop {}", self.program, self.spec),
            Operation::Restart => format!("{} restart {}", self.program, self.spec),
        }
    }

    pub fn invocation(&self, operation: Operation) -> RemoteInvocation {
        RemoteInvocation {
            host: self.host.clone(),
            working_dir: self.working_dir.clone(),
            command: self.command_line(operation),
        }
    }
}

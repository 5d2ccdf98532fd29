use std::process::ExitCode;

use anyhow::Error;

use crate::lib::errors::DeployError;

/// Exit status for configuration problems (sysexits `EX_CONFIG`).
pub const CONFIGURATION_EXIT_CODE: u8 = 78;
/// Exit status when the host cannot be reached (sysexits `EX_UNAVAILABLE`).
pub const CONNECTION_EXIT_CODE: u8 = 69;

/// Bundles a failure message with the process exit code.
#[derive(Debug)]
pub struct CommandExit {
    message: String,
    code: u8,
}

impl CommandExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            code: 1,
        }
    }

    /// Map a deployment failure; remote exit statuses pass through unchanged.
    pub fn from_deploy_error(err: DeployError) -> Self {
        let code = match &err {
            DeployError::Configuration(_) => CONFIGURATION_EXIT_CODE,
            DeployError::Connection { .. } => CONNECTION_EXIT_CODE,
            DeployError::RemoteCommand { exit_code, .. } => (*exit_code)
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
        };
        Self {
            message: err.to_string(),
            code,
        }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        ExitCode::from(self.code)
    }
}

impl From<DeployError> for CommandExit {
    fn from(value: DeployError) -> Self {
        Self::from_deploy_error(value)
    }
}

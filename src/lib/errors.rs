use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading configuration or selecting an environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file {path} does not exist")]
    MissingFile { path: PathBuf },
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: String },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: String,
        message: String,
    },
    /// The selected environment is not in the environment table.
    #[error("Unknown environment `{name}` (available: {})", .available.join(", "))]
    UnknownEnvironment {
        name: String,
        available: Vec<String>,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures surfaced by a start/stop/restart operation.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Environment selection or configuration failed before any connection.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// The SSH transport could not reach or authenticate against the host.
    #[error("Failed to reach {host} over SSH: {message}")]
    Connection { host: String, message: String },
    /// The remote command ran and exited non-zero.
    #[error("Remote command on {host} exited abnormally (exit={exit_code:?}): {command}")]
    RemoteCommand {
        host: String,
        exit_code: Option<i32>,
        command: String,
    },
}

impl DeployError {
    /// Short machine-friendly name used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            DeployError::Configuration(_) => "configuration_error",
            DeployError::Connection { .. } => "connection_error",
            DeployError::RemoteCommand { .. } => "remote_command_error",
        }
    }
}

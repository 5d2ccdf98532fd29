//! Load and validate deployment configuration.
use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod environment;
pub mod ssh;
pub mod supervisor;
pub mod telemetry;

pub use environment::{
    builtin_environments, parse_environments_section, EnvironmentProfile, RawEnvironmentProfile,
    DEFAULT_EXECUTABLE, DEFAULT_INSTANCE,
};
pub use ssh::{parse_ssh_section, RawSshSection, SshSection, DEFAULT_SSH_BINARY};
pub use supervisor::{
    parse_supervisor_section, RawSupervisorSection, SupervisorSection, DEFAULT_LOG_FILE,
    DEFAULT_SUPERVISOR_PROGRAM,
};

pub const CONFIG_ENV_KEY: &str = "PAGES_DEPLOY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "deploy.toml";

/// Where the configuration file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Default,
}

/// Top-level configuration container, built once per invocation.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub environments: BTreeMap<String, EnvironmentProfile>,
    pub ssh: SshSection,
    pub supervisor: SupervisorSection,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDeployConfig {
    ssh: Option<RawSshSection>,
    supervisor: Option<RawSupervisorSection>,
    environments: Option<BTreeMap<String, RawEnvironmentProfile>>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DeployConfig {
    /// Configuration made of the built-in presets only.
    pub fn builtin() -> Self {
        Self {
            environments: builtin_environments(),
            ssh: SshSection::default(),
            supervisor: SupervisorSection::default(),
            source_path: None,
        }
    }

    /// Resolve the path in the order: CLI override → `PAGES_DEPLOY_CONFIG` → `deploy.toml`.
    pub fn locate(override_path: Option<PathBuf>) -> (PathBuf, ConfigSource) {
        if let Some(path) = override_path {
            return (path, ConfigSource::Cli);
        }
        match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => (PathBuf::from(value), ConfigSource::Env),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default),
        }
    }

    /// Load from a located path. A missing default file falls back to the presets;
    /// a missing file that was asked for explicitly is an error.
    pub fn load(path: PathBuf, source: ConfigSource) -> Result<Self, ConfigError> {
        telemetry::log_source(&path, source);
        if path.exists() {
            return Self::load_from_path(path);
        }
        if source == ConfigSource::Default {
            telemetry::log_builtin_fallback(&path);
            return Ok(Self::builtin());
        }

        let error = ConfigError::MissingFile { path: path.clone() };
        error!(
            target: "pages_deploy::config",
            path = %path.display(),
            reason = %error,
            "Configuration file not found"
        );
        Err(error)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "pages_deploy::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let source = config::File::from(path.clone()).format(config::FileFormat::Toml);
        let builder = config::Config::builder().add_source(source);
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "pages_deploy::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawDeployConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "pages_deploy::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, &path).map_err(|err| {
            error!(
                target: "pages_deploy::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawDeployConfig, path: &Path) -> Result<Self, ConfigError> {
        let ssh = parse_ssh_section(raw.ssh, path)?;
        let supervisor = parse_supervisor_section(raw.supervisor, path)?;
        let environments = parse_environments_section(raw.environments, path)?;

        Ok(Self {
            environments,
            ssh,
            supervisor,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// Select the active environment profile by name.
    pub fn resolve(&self, name: &str) -> Result<&EnvironmentProfile, ConfigError> {
        self.environments
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                name: name.to_string(),
                available: self.environments.keys().cloned().collect(),
            })
    }
}

use std::path::Path;

use tracing::{debug, info};

use super::{ConfigSource, DeployConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_source(path: &Path, source: ConfigSource) {
    match source {
        ConfigSource::Cli => info!(
            target: "pages_deploy::config",
            path = %path.display(),
            "Loading configuration from --config"
        ),
        ConfigSource::Env => info!(
            target: "pages_deploy::config",
            path = %path.display(),
            "Loading configuration using PAGES_DEPLOY_CONFIG environment variable"
        ),
        ConfigSource::Default => debug!(
            target: "pages_deploy::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "PAGES_DEPLOY_CONFIG not set; using default deploy.toml"
        ),
    }
}

pub fn log_builtin_fallback(path: &Path) {
    debug!(
        target: "pages_deploy::config",
        path = %path.display(),
        "No configuration file found; using built-in environments"
    );
}

pub fn log_loaded(config: &DeployConfig) {
    let path = config
        .source_path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    info!(
        target: "pages_deploy::config",
        path = %path,
        environments = config.environments.len(),
        ssh_binary = %config.ssh.binary.display(),
        use_ssh_config = config.ssh.use_ssh_config,
        supervisor = %config.supervisor.program,
        "Configuration file loaded successfully"
    );
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lib::errors::ConfigError;

pub const DEFAULT_SSH_BINARY: &str = "ssh";

/// Local SSH client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SshSection {
    pub binary: PathBuf,
    pub use_ssh_config: bool,
    pub config_file: Option<PathBuf>,
}

impl Default for SshSection {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_SSH_BINARY),
            use_ssh_config: true,
            config_file: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSshSection {
    pub binary: Option<PathBuf>,
    pub use_ssh_config: Option<bool>,
    pub config_file: Option<PathBuf>,
}

pub fn parse_ssh_section(
    raw: Option<RawSshSection>,
    path: &Path,
) -> Result<SshSection, ConfigError> {
    let ssh_raw = raw.unwrap_or_default();

    let binary = ssh_raw
        .binary
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SSH_BINARY));
    if binary.as_os_str().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "ssh.binary".into(),
            message: "Provide the ssh executable name or path".into(),
        });
    }

    let use_ssh_config = ssh_raw.use_ssh_config.unwrap_or(true);
    if let Some(config_file) = ssh_raw.config_file.as_deref() {
        if config_file.as_os_str().is_empty() || !config_file.is_absolute() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "ssh.config_file".into(),
                message: "Provide an absolute path to the ssh_config file".into(),
            });
        }
        if !use_ssh_config {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "ssh.config_file".into(),
                message: "Cannot set config_file while use_ssh_config = false".into(),
            });
        }
    }

    Ok(SshSection {
        binary,
        use_ssh_config,
        config_file: ssh_raw.config_file,
    })
}

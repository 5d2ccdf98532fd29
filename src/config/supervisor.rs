use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lib::{errors::ConfigError, shell::is_plain_shell_word};

pub const DEFAULT_SUPERVISOR_PROGRAM: &str = "forever";
pub const DEFAULT_LOG_FILE: &str = "pages.log";

/// Remote supervisor invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorSection {
    pub program: String,
    pub log_file: String,
}

impl Default for SupervisorSection {
    fn default() -> Self {
        Self {
            program: DEFAULT_SUPERVISOR_PROGRAM.into(),
            log_file: DEFAULT_LOG_FILE.into(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSupervisorSection {
    pub program: Option<String>,
    pub log_file: Option<String>,
}

pub fn parse_supervisor_section(
    raw: Option<RawSupervisorSection>,
    path: &Path,
) -> Result<SupervisorSection, ConfigError> {
    let supervisor_raw = raw.unwrap_or_default();

    let program = supervisor_raw
        .program
        .unwrap_or_else(|| DEFAULT_SUPERVISOR_PROGRAM.to_string());
    if !is_plain_shell_word(&program) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "supervisor.program".into(),
            message: "Provide the supervisor executable as a single plain word".into(),
        });
    }

    let log_file = supervisor_raw
        .log_file
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    if !is_plain_shell_word(&log_file) || log_file.contains('/') {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "supervisor.log_file".into(),
            message: "Provide a bare file name; it is placed under the profile home".into(),
        });
    }

    Ok(SupervisorSection { program, log_file })
}

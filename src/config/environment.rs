use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::lib::{
    errors::ConfigError,
    shell::{is_absolute_remote_path, is_plain_shell_word},
};

pub const DEFAULT_INSTANCE: &str = "internal";
pub const DEFAULT_EXECUTABLE: &str = "pages/hookshot.js";

/// Connection and path settings for one deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentProfile {
    pub name: String,
    pub host: String,
    pub port: Option<u16>,
    pub home: Option<String>,
    pub rbenv: Option<String>,
    pub executable: String,
    pub working_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawEnvironmentProfile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub home: Option<String>,
    pub rbenv: Option<String>,
    pub executable: Option<String>,
    pub working_dir: Option<String>,
}

/// Presets shipped with the binary: the multi-environment table entry plus
/// the two single-host layouts that `cd` into the checkout or not. The
/// webhook server refuses to start unless `--port`, `--home` and `--rbenv`
/// are all given, so every preset carries all three.
pub fn builtin_environments() -> BTreeMap<String, EnvironmentProfile> {
    let presets = [
        EnvironmentProfile {
            name: DEFAULT_INSTANCE.into(),
            host: "18f-hub".into(),
            port: Some(5000),
            home: Some("/home/ubuntu".into()),
            rbenv: Some("/usr/local/rbenv".into()),
            executable: DEFAULT_EXECUTABLE.into(),
            working_dir: None,
        },
        EnvironmentProfile {
            name: "hookshot".into(),
            host: "18f-pages".into(),
            port: Some(5000),
            home: Some("/home/ubuntu".into()),
            rbenv: Some("/usr/local/rbenv".into()),
            executable: "./hookshot.js".into(),
            working_dir: Some("pages".into()),
        },
        EnvironmentProfile {
            name: "pages".into(),
            host: "18f-pages".into(),
            port: Some(5000),
            home: Some("/home/ubuntu".into()),
            rbenv: Some("/usr/local/rbenv".into()),
            executable: "pages/pages.js".into(),
            working_dir: None,
        },
    ];

    presets
        .into_iter()
        .map(|profile| (profile.name.clone(), profile))
        .collect()
}

/// Merge the `[environments.*]` tables over the built-in presets.
pub fn parse_environments_section(
    raw: Option<BTreeMap<String, RawEnvironmentProfile>>,
    path: &Path,
) -> Result<BTreeMap<String, EnvironmentProfile>, ConfigError> {
    let mut environments = builtin_environments();
    for (name, raw_profile) in raw.unwrap_or_default() {
        let profile = parse_environment_profile(&name, raw_profile, path)?;
        environments.insert(name, profile);
    }
    Ok(environments)
}

fn parse_environment_profile(
    name: &str,
    raw: RawEnvironmentProfile,
    path: &Path,
) -> Result<EnvironmentProfile, ConfigError> {
    if !is_plain_shell_word(name) {
        return Err(invalid(
            path,
            format!("environments.{name}"),
            "Environment names must be plain words",
        ));
    }

    let host = raw.host.ok_or_else(|| ConfigError::MissingField {
        path: path.to_path_buf(),
        field: format!("environments.{name}.host"),
    })?;
    if !is_plain_shell_word(&host) {
        return Err(invalid(
            path,
            format!("environments.{name}.host"),
            "Provide an SSH host or alias without whitespace or shell metacharacters",
        ));
    }

    if raw.port == Some(0) {
        return Err(invalid(
            path,
            format!("environments.{name}.port"),
            "Use a port in the range 1-65535",
        ));
    }

    validate_absolute(path, name, "home", raw.home.as_deref())?;
    validate_absolute(path, name, "rbenv", raw.rbenv.as_deref())?;

    let executable = raw
        .executable
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string());
    if !is_plain_shell_word(&executable) {
        return Err(invalid(
            path,
            format!("environments.{name}.executable"),
            "Provide the script path as a single plain word",
        ));
    }

    if let Some(dir) = raw.working_dir.as_deref() {
        if !is_plain_shell_word(dir) {
            return Err(invalid(
                path,
                format!("environments.{name}.working_dir"),
                "Provide the directory as a single plain word",
            ));
        }
    }

    Ok(EnvironmentProfile {
        name: name.to_string(),
        host,
        port: raw.port,
        home: raw.home,
        rbenv: raw.rbenv,
        executable,
        working_dir: raw.working_dir,
    })
}

fn validate_absolute(
    path: &Path,
    name: &str,
    key: &str,
    value: Option<&str>,
) -> Result<(), ConfigError> {
    match value {
        Some(value) if !is_absolute_remote_path(value) => Err(invalid(
            path,
            format!("environments.{name}.{key}"),
            "Provide an absolute remote path without whitespace or shell metacharacters",
        )),
        _ => Ok(()),
    }
}

fn invalid(path: &Path, field: String, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: message.into(),
    }
}

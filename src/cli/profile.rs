//! `DeployRequest` and environment selection.
use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};

use crate::config::DEFAULT_INSTANCE;

use super::DeployCommand;

pub const INSTANCE_ENV_KEY: &str = "PAGES_DEPLOY_INSTANCE";

/// Source for the environment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSource {
    Cli,
    Env,
    Default,
}

/// Everything the operator asked for, before configuration is loaded.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub config_override: Option<PathBuf>,
    pub instance: String,
    pub instance_source: InstanceSource,
    pub dry_run: bool,
    pub command: DeployCommand,
}

/// Resolve the environment name in the order: CLI override → env var → `internal`.
pub fn resolve_instance(instance_override: Option<String>) -> Result<(String, InstanceSource)> {
    if let Some(instance) = instance_override {
        return Ok((normalize_instance(&instance)?, InstanceSource::Cli));
    }

    match env::var(INSTANCE_ENV_KEY) {
        Ok(value) if !value.trim().is_empty() => {
            Ok((normalize_instance(&value)?, InstanceSource::Env))
        }
        _ => Ok((DEFAULT_INSTANCE.to_string(), InstanceSource::Default)),
    }
}

fn normalize_instance(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("instance name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

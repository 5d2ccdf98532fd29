//! CLI entrypoint module structure.
use serde_json::{json, Value};
use tracing::info;

use crate::{
    config::DeployConfig,
    deploy::{ssh_args, DeploymentController, DeploymentPlan, DryRunShell, Operation, SshSession},
};

pub mod args;
pub mod exit;
pub mod profile;

pub use args::{DeployArgs, DeployCommand};
pub use exit::{CommandExit, CONFIGURATION_EXIT_CODE, CONNECTION_EXIT_CODE};
pub use profile::{resolve_instance, DeployRequest, InstanceSource, INSTANCE_ENV_KEY};

/// Execute a request. Returns a JSON payload to print for `show` and `--dry-run`;
/// real operations stream remote output and return `None`.
pub async fn execute(request: DeployRequest) -> Result<Option<String>, CommandExit> {
    let (path, source) = DeployConfig::locate(request.config_override.clone());
    let config = DeployConfig::load(path, source)
        .map_err(|err| CommandExit::from_deploy_error(err.into()))?;
    let profile = config
        .resolve(&request.instance)
        .map_err(|err| CommandExit::from_deploy_error(err.into()))?;
    let plan = DeploymentPlan::new(profile, &config.supervisor);
    info!(
        target: "pages_deploy::controller",
        instance = %plan.instance,
        instance_source = ?request.instance_source,
        host = %plan.host,
        dry_run = request.dry_run,
        "Resolved environment"
    );

    let Some(operation) = request.command.operation() else {
        return render(&show_payload(&plan, &config)).map(Some);
    };

    if request.dry_run {
        let mut controller = DeploymentController::new(plan, DryRunShell::new());
        controller.run(operation).await?;
        return render(&dry_run_payload(controller.plan(), &config, operation)).map(Some);
    }

    let mut controller = DeploymentController::new(plan, SshSession::new(config.ssh.clone()));
    controller.run(operation).await?;
    Ok(None)
}

/// Resolved profile and every remote command line, for `show`.
pub fn show_payload(plan: &DeploymentPlan, config: &DeployConfig) -> Value {
    let remote_lines: serde_json::Map<String, Value> = Operation::ALL
        .iter()
        .map(|operation| {
            (
                operation.as_str().to_string(),
                Value::String(plan.invocation(*operation).remote_line()),
            )
        })
        .collect();

    json!({
        "instance": plan.instance,
        "host": plan.host,
        "working_dir": plan.working_dir,
        "log_path": plan.log_path,
        "command_spec": plan.spec,
        "remote_lines": remote_lines,
        "config_path": config
            .source_path
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
    })
}

/// The invocation `--dry-run` would have sent, including the ssh argv.
pub fn dry_run_payload(plan: &DeploymentPlan, config: &DeployConfig, operation: Operation) -> Value {
    let invocation = plan.invocation(operation);
    json!({
        "status": "dry_run",
        "operation": operation,
        "host": invocation.host,
        "remote_line": invocation.remote_line(),
        "ssh_binary": config.ssh.binary.to_string_lossy(),
        "ssh_args": ssh_args(&config.ssh, &invocation),
    })
}

fn render(payload: &Value) -> Result<String, CommandExit> {
    serde_json::to_string_pretty(payload).map_err(CommandExit::from_error)
}

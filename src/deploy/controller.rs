use tracing::{warn, Instrument};

use crate::{
    config::DeployConfig,
    lib::{errors::DeployError, telemetry::OperationSpan},
};

use super::{
    command::{DeploymentPlan, Operation},
    remote::{RemoteOutcome, RemoteShell},
};

/// Issues start/stop/restart for one resolved environment.
pub struct DeploymentController<S> {
    plan: DeploymentPlan,
    shell: S,
}

impl<S: RemoteShell> DeploymentController<S> {
    pub fn new(plan: DeploymentPlan, shell: S) -> Self {
        Self { plan, shell }
    }

    /// Resolve `instance` and derive the plan. Fails before the shell is ever used.
    pub fn from_config(config: &DeployConfig, instance: &str, shell: S) -> Result<Self, DeployError> {
        let profile = config.resolve(instance)?;
        Ok(Self::new(
            DeploymentPlan::new(profile, &config.supervisor),
            shell,
        ))
    }

    pub fn plan(&self) -> &DeploymentPlan {
        &self.plan
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub async fn start(&mut self) -> Result<RemoteOutcome, DeployError> {
        self.run(Operation::Start).await
    }

    pub async fn stop(&mut self) -> Result<RemoteOutcome, DeployError> {
        self.run(Operation::Stop).await
    }

    pub async fn restart(&mut self) -> Result<RemoteOutcome, DeployError> {
        self.run(Operation::Restart).await
    }

    /// Run a single supervisor command in a fresh remote session. No retries.
    pub async fn run(&mut self, operation: Operation) -> Result<RemoteOutcome, DeployError> {
        let span = OperationSpan::start(operation.as_str(), &self.plan.instance, &self.plan.host);
        let invocation = self.plan.invocation(operation);
        let result = self
            .shell
            .run(&invocation)
            .instrument(span.span().clone())
            .await;

        match result {
            Ok(outcome) if outcome.success() => {
                span.finish("succeeded", outcome.exit_code);
                Ok(outcome)
            }
            Ok(outcome) => {
                span.finish("remote_command_error", outcome.exit_code);
                Err(DeployError::RemoteCommand {
                    host: invocation.host,
                    exit_code: outcome.exit_code,
                    command: invocation.command,
                })
            }
            Err(err) => {
                warn!(
                    target: "pages_deploy::controller",
                    operation = operation.as_str(),
                    reason = %err,
                    "Supervisor operation failed"
                );
                span.finish(err.kind(), None);
                Err(err)
            }
        }
    }
}

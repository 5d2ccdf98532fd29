//! Telemetry initialization and deployment operation span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format operator logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a supervisor control operation.
pub struct OperationSpan {
    span: Span,
    started_at: Instant,
    operation_id: Uuid,
}

impl OperationSpan {
    /// Start an operation span.
    pub fn start(operation: &'static str, instance: &str, host: &str) -> Self {
        let operation_id = Uuid::new_v4();
        let span = info_span!(
            target: "pages_deploy::controller",
            "operation",
            %operation_id,
            operation,
            instance,
            host
        );
        Self {
            span,
            started_at: Instant::now(),
            operation_id,
        }
    }

    /// Span to enter while the operation runs.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording status and completion info.
    pub fn finish(self, status: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "pages_deploy::controller",
            operation_id = %self.operation_id,
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Completed supervisor operation"
        );
    }
}

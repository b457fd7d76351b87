//! Application execution logic.
//!
//! Wires the production collaborators into a [`NotificationTask`] and runs
//! it once, cancelling the in-flight request on Ctrl+C.

use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use x_notify::config::ValidatedConfig;
use x_notify::dispatch::ReqwestConnector;
use x_notify::execution::{ExecutionError, StaticExecutionSource};
use x_notify::template::{HandlebarsRenderer, TemplateError};
use x_notify::{NotificationTask, TaskError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The template renderer could not be initialized.
    #[error("Failed to initialize templates: {0}")]
    Templates(#[source] TemplateError),

    /// Execution metadata could not be loaded.
    #[error("Failed to load executions: {0}")]
    Executions(#[source] ExecutionError),

    /// The notification task failed.
    #[error(transparent)]
    Task(#[from] TaskError),
}

type AppTask = NotificationTask<HandlebarsRenderer, StaticExecutionSource, ReqwestConnector>;

/// Builds the task from configuration.
fn create_task(config: &ValidatedConfig) -> Result<AppTask, RunError> {
    let renderer = HandlebarsRenderer::new().map_err(RunError::Templates)?;
    let executions =
        StaticExecutionSource::from_file(&config.execution_file).map_err(RunError::Executions)?;

    tracing::debug!(
        "Loaded {} execution(s) from {}",
        executions.len(),
        config.execution_file.display()
    );

    Ok(NotificationTask::new(renderer, executions, ReqwestConnector)
        .with_endpoint(config.endpoint.clone()))
}

/// Executes one notification.
///
/// In dry-run mode the message is composed and logged but not sent.
///
/// # Errors
///
/// Returns an error if the collaborators cannot be initialized or the
/// task fails at any stage.
///
/// # Coverage Note
///
/// Excluded from coverage because it performs real network I/O and
/// installs a signal handler.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let task = create_task(&config)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - the message will be logged but not sent");
        let prepared = task.prepare(&config.params).await?;
        log_dry_run(&prepared.message);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_shutdown(cancel.clone()));

    let result = task.run(&config.params, &cancel).await;
    watcher.abort();

    result.map_err(RunError::from)
}

fn log_dry_run(message: &str) {
    tracing::info!(
        "[DRY-RUN] Would post {} character(s):\n{message}",
        message.chars().count()
    );
}

/// Cancels `token` when a shutdown signal (Ctrl+C) arrives.
async fn cancel_on_shutdown(token: CancellationToken) {
    if signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received, cancelling...");
        token.cancel();
    }
}

//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use x_notify::TaskError;
use x_notify::config::{ConfigError, field};
use x_notify::dispatch::DispatchError;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - credential, network or API failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::EXECUTION_FILE => {
            eprintln!("\nRun 'x-notify init' to generate a configuration template.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'x-notify init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Returns a hint for runtime failures the user can fix.
pub fn task_hint(error: &RunError) -> Option<&'static str> {
    let RunError::Task(task) = error else {
        return None;
    };

    match task {
        TaskError::Credential(_) => Some(
            "Provide --bearer-token, or all of --consumer-key, --consumer-secret, \
             --access-token and --access-secret.",
        ),
        TaskError::Dispatch(DispatchError::Api { status, .. })
            if *status == http::StatusCode::UNAUTHORIZED || *status == http::StatusCode::FORBIDDEN =>
        {
            Some("The API rejected the credentials; check that the app has write access.")
        }
        _ => None,
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

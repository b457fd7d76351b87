//! Error type of a notification task invocation.

use thiserror::Error;

use crate::connection::ConfigRenderError;
use crate::dispatch::{CredentialError, DispatchError, HttpError};
use crate::execution::ExecutionError;
use crate::template::TemplateError;

/// Failure of a [`NotificationTask`](crate::task::NotificationTask) run.
///
/// Component errors are carried unchanged; each variant names the stage
/// that failed.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Credentials were missing, incomplete or ambiguous.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Execution metadata could not be obtained.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// The summary template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A connection option failed to resolve.
    #[error(transparent)]
    ConfigRender(#[from] ConfigRenderError),

    /// The composed message was empty.
    #[error("Composed message is empty; nothing to send")]
    EmptyMessage,

    /// The dispatch failed (transport, API or cancellation).
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl From<HttpError> for TaskError {
    fn from(e: HttpError) -> Self {
        Self::Dispatch(DispatchError::Transport(e))
    }
}

//! Notification task: renders an execution summary and posts it.

use indexmap::IndexMap;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::defaults;
use crate::connection::{ClientConfigBuilder, ClientConfiguration, ConnectionOptions};
use crate::dispatch::{AuthDispatcher, Connector, Credential, CredentialParams, DispatchError};
use crate::error::TaskError;
use crate::execution::{ExecutionMetadata, ExecutionSource, execution_variables};
use crate::message::MessageComposer;
use crate::template::{SUMMARY_TEMPLATE, TemplateRenderer};
use crate::time::{Clock, SystemClock};

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;

/// Builds template variables from execution metadata.
pub type VariablesFn = fn(&ExecutionMetadata) -> Value;

/// Parameters of one task invocation.
#[derive(Debug, Clone, Default)]
pub struct TaskParameters {
    /// Bearer token XOR the four OAuth 1.0a fields
    pub credentials: CredentialParams,
    /// Execution to summarize; the current execution when `None`
    pub execution_id: Option<String>,
    /// Extra `key: value` lines, in insertion order
    pub custom_fields: Option<IndexMap<String, String>>,
    /// Free text appended last
    pub custom_message: Option<String>,
    /// HTTP client options
    pub options: Option<ConnectionOptions>,
}

/// Everything needed to send, computed before any network I/O.
#[derive(Debug, Clone)]
pub struct PreparedDispatch {
    /// Resolved credential
    pub credential: Credential,
    /// The execution being reported
    pub execution: ExecutionMetadata,
    /// Composed, length-capped message
    pub message: String,
    /// Transport configuration
    pub client_config: ClientConfiguration,
}

/// Posts an execution summary to the status endpoint.
///
/// Collaborators are injected: the template renderer, the execution
/// metadata source, and the connector that builds a transport per run.
/// The variables passed to the template come from a swappable function
/// (see [`with_variables`](Self::with_variables)).
#[derive(Debug)]
pub struct NotificationTask<R, E, K, C = SystemClock> {
    renderer: R,
    executions: E,
    connector: K,
    clock: C,
    composer: MessageComposer,
    endpoint: url::Url,
    template: String,
    variables: VariablesFn,
}

impl<R, E, K> NotificationTask<R, E, K, SystemClock> {
    /// Creates a task with the bundled template and default endpoint.
    #[must_use]
    pub fn new(renderer: R, executions: E, connector: K) -> Self {
        Self {
            renderer,
            executions,
            connector,
            clock: SystemClock,
            composer: MessageComposer::default(),
            endpoint: defaults::endpoint(),
            template: SUMMARY_TEMPLATE.to_string(),
            variables: execution_variables,
        }
    }
}

impl<R, E, K, C> NotificationTask<R, E, K, C> {
    /// Sets a custom clock for OAuth timestamps.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> NotificationTask<R, E, K, C2> {
        NotificationTask {
            renderer: self.renderer,
            executions: self.executions,
            connector: self.connector,
            clock,
            composer: self.composer,
            endpoint: self.endpoint,
            template: self.template,
            variables: self.variables,
        }
    }

    /// Overrides the status endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: url::Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the message composer (e.g. to add a truncation marker).
    #[must_use]
    pub fn with_composer(mut self, composer: MessageComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Renders a different registered template.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    /// Replaces the function that builds template variables.
    #[must_use]
    pub fn with_variables(mut self, variables: VariablesFn) -> Self {
        self.variables = variables;
        self
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

impl<R, E, K, C> NotificationTask<R, E, K, C>
where
    R: TemplateRenderer,
    E: ExecutionSource,
    K: Connector,
    C: Clock + Clone,
{
    /// Runs every step up to, but excluding, the network send.
    ///
    /// Order: credential, execution metadata, template (rendered once),
    /// composition, client configuration.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error; [`TaskError::EmptyMessage`]
    /// if nothing is left to send.
    pub async fn prepare(&self, params: &TaskParameters) -> Result<PreparedDispatch, TaskError> {
        let credential = params.credentials.resolve()?;

        let execution = self
            .executions
            .execution(params.execution_id.as_deref())
            .await?;
        let variables = (self.variables)(&execution);

        let body = self.renderer.render(&self.template, &variables)?;
        let message = self.composer.compose(
            body.trim_end(),
            params.custom_fields.as_ref(),
            params.custom_message.as_deref(),
        );
        if message.is_empty() {
            return Err(TaskError::EmptyMessage);
        }

        let client_config =
            ClientConfigBuilder::build(params.options.as_ref(), &self.renderer, &variables)?;

        tracing::debug!(
            execution = %execution.id,
            scheme = credential.scheme(),
            chars = message.chars().count(),
            "Prepared notification"
        );

        Ok(PreparedDispatch {
            credential,
            execution,
            message,
            client_config,
        })
    }

    /// Prepares and sends the notification.
    ///
    /// # Errors
    ///
    /// Any stage failure, unchanged. Nothing is retried.
    pub async fn run(
        &self,
        params: &TaskParameters,
        cancel: &CancellationToken,
    ) -> Result<(), TaskError> {
        let prepared = self.prepare(params).await?;
        self.send(&prepared, cancel).await
    }

    /// Sends a prepared notification with a freshly connected transport.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Dispatch`] for transport, API or cancellation failures.
    pub async fn send(
        &self,
        prepared: &PreparedDispatch,
        cancel: &CancellationToken,
    ) -> Result<(), TaskError> {
        let client = self
            .connector
            .connect(&prepared.client_config)
            .map_err(DispatchError::Transport)?;

        let dispatcher = AuthDispatcher::new(client)
            .with_clock(self.clock.clone())
            .with_endpoint(self.endpoint.clone());

        let dispatched = dispatcher
            .send(
                &prepared.message,
                &prepared.credential,
                &prepared.client_config,
                cancel,
            )
            .await?;

        tracing::info!(
            execution = %prepared.execution.id,
            id = dispatched.id.as_deref().unwrap_or("-"),
            "Notification sent"
        );
        Ok(())
    }
}

//! Execution metadata supplied by the orchestration system.
//!
//! The notification only needs a handful of descriptive fields. Where they
//! come from is abstracted behind [`ExecutionSource`]; the binary reads them
//! from a JSON file with [`StaticExecutionSource::from_file`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Descriptive metadata of one workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Execution identifier
    pub id: String,
    /// Namespace of the flow
    pub namespace: String,
    /// Flow identifier, when known
    #[serde(default)]
    pub flow_id: Option<String>,
    /// Link to the execution in the orchestrator UI
    pub link: String,
    /// Current status (e.g. `SUCCESS`, `FAILED`)
    pub status: String,
    /// Start time as reported by the orchestrator
    pub start_date: String,
    /// Human-readable duration
    pub duration: String,
}

/// Error raised when execution metadata cannot be obtained.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// No execution with the given id is known.
    #[error("Execution '{id}' not found")]
    NotFound {
        /// The requested id
        id: String,
    },

    /// No execution id was given and there is no current execution.
    #[error("No current execution available")]
    NoCurrent,

    /// The metadata file could not be read.
    #[error("Failed to read execution file '{}': {source}", path.display())]
    FileRead {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The metadata file is not valid JSON of the expected shape.
    #[error("Failed to parse execution file '{}': {source}", path.display())]
    Parse {
        /// Path of the file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Source of execution metadata.
pub trait ExecutionSource: Send + Sync {
    /// Returns the execution with `id`, or the current execution when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] if the execution is unknown.
    fn execution(
        &self,
        id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ExecutionMetadata, ExecutionError>> + Send;
}

/// In-memory execution source.
///
/// The first record is the current execution unless another is selected
/// with [`with_current`](Self::with_current).
#[derive(Debug, Clone, Default)]
pub struct StaticExecutionSource {
    executions: Vec<ExecutionMetadata>,
    current: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExecutionDocument {
    Many(Vec<ExecutionMetadata>),
    One(ExecutionMetadata),
}

impl StaticExecutionSource {
    /// Creates a source over the given records.
    #[must_use]
    pub fn new(executions: Vec<ExecutionMetadata>) -> Self {
        Self {
            executions,
            current: None,
        }
    }

    /// Selects the current execution by id.
    #[must_use]
    pub fn with_current(mut self, id: impl Into<String>) -> Self {
        self.current = Some(id.into());
        self
    }

    /// Parses a JSON document holding one execution object or an array of them.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Parse`] if the JSON does not match.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ExecutionError> {
        let document: ExecutionDocument =
            serde_json::from_str(content).map_err(|source| ExecutionError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(match document {
            ExecutionDocument::Many(executions) => executions,
            ExecutionDocument::One(execution) => vec![execution],
        }))
    }

    /// Loads executions from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ExecutionError> {
        let content = std::fs::read_to_string(path).map_err(|source| ExecutionError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Number of known executions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// Returns true if no execution is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    fn lookup(&self, id: Option<&str>) -> Result<ExecutionMetadata, ExecutionError> {
        let wanted = id.or(self.current.as_deref());

        let found = match wanted {
            Some(id) => self.executions.iter().find(|e| e.id == id),
            None => self.executions.first(),
        };

        found.cloned().ok_or_else(|| match wanted {
            Some(id) => ExecutionError::NotFound { id: id.to_string() },
            None => ExecutionError::NoCurrent,
        })
    }
}

impl ExecutionSource for StaticExecutionSource {
    async fn execution(&self, id: Option<&str>) -> Result<ExecutionMetadata, ExecutionError> {
        self.lookup(id)
    }
}

/// Builds the template variables for an execution.
///
/// Every key is always present (`flow_id` may be null) so strict-mode
/// templates can test optional values with `#if`.
#[must_use]
pub fn execution_variables(execution: &ExecutionMetadata) -> Value {
    json!({
        "id": execution.id,
        "namespace": execution.namespace,
        "flow_id": execution.flow_id,
        "link": execution.link,
        "status": execution.status,
        "start_date": execution.start_date,
        "duration": execution.duration,
    })
}

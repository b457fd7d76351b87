//! Error type for template rendering.

use thiserror::Error;

/// A template could not be registered or rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No template is registered under this name.
    #[error("Template '{template}' is not registered")]
    NotFound {
        /// Requested template name
        template: String,
    },

    /// The template source has a syntax error.
    #[error("Template '{template}' is invalid: {reason}")]
    Invalid {
        /// Template name (or `inline`)
        template: String,
        /// Parser message
        reason: String,
    },

    /// Rendering failed, typically because a variable is missing.
    #[error("Failed to render template '{template}'{}: {reason}", variable.as_ref().map(|v| format!(" (variable '{v}')")).unwrap_or_default())]
    Render {
        /// Template name (or `inline`)
        template: String,
        /// Missing or invalid variable, when known
        variable: Option<String>,
        /// Renderer message
        reason: String,
    },
}

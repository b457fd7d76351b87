//! Errors raised while resolving connection options.

use thiserror::Error;

use crate::template::TemplateError;

/// A connection option could not be resolved into a client configuration.
///
/// Always raised before any network call.
#[derive(Debug, Error)]
pub enum ConfigRenderError {
    /// A header value template failed to render.
    #[error("Failed to render header '{header}': {source}")]
    Render {
        /// The header whose value failed
        header: String,
        /// Underlying template error
        #[source]
        source: TemplateError,
    },

    /// A header name is empty or not a valid HTTP token.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A rendered header value contains characters not allowed in HTTP.
    #[error("Invalid value for header '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The default charset is not a registered encoding label.
    #[error("Unknown charset '{label}'")]
    UnknownCharset {
        /// The unrecognized label
        label: String,
    },

    /// The response size ceiling is zero.
    #[error("max_content_length must be greater than 0")]
    InvalidContentLength,
}

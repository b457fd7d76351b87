//! Error types for credential resolution, HTTP transport and dispatch.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong on the wire without dictating recovery strategy.
/// Nothing in this crate retries; the caller decides.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out (connect, read-idle or total deadline).
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error returned when task parameters do not describe exactly one complete credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Neither a bearer token nor any OAuth 1.0a field was supplied.
    #[error("No credentials supplied: set bearer_token or all of consumer_key, consumer_secret, access_token, access_secret")]
    Missing,

    /// Some, but not all, OAuth 1.0a fields were supplied.
    #[error("Incomplete OAuth 1.0a credentials: missing {}", missing.join(", "))]
    IncompleteOAuth {
        /// Names of the missing fields
        missing: Vec<&'static str>,
    },

    /// A bearer token and OAuth 1.0a fields were both supplied.
    #[error("Ambiguous credentials: bearer_token cannot be combined with OAuth 1.0a fields")]
    Ambiguous,
}

/// Error returned by a single dispatch attempt.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The message to send was empty; no request was issued.
    #[error("Refusing to send an empty message")]
    EmptyMessage,

    /// The request could not be completed at the transport level.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The API answered with a non-success status.
    #[error("API returned HTTP {status}: {excerpt}")]
    Api {
        /// HTTP status code returned by the API
        status: http::StatusCode,
        /// Bounded excerpt of the response body
        excerpt: String,
    },

    /// The dispatch was cancelled while the request was in flight.
    #[error("Dispatch cancelled")]
    Cancelled,

    /// The request could not be assembled (bad endpoint or header value).
    #[error("Failed to build request: {0}")]
    Request(String),
}

impl DispatchError {
    /// Returns the HTTP status code for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

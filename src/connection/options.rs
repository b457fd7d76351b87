//! Connection options as supplied by the caller, and their resolved form.

use std::time::Duration;

use indexmap::IndexMap;

use crate::config::defaults;

/// Caller-supplied HTTP client options.
///
/// Every field is optional; unset fields fall back to their documented
/// default independently of each other (see [`apply_defaults`](Self::apply_defaults)).
/// Header values may contain Handlebars expressions that are rendered
/// against the execution variables when the client configuration is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Time allowed to establish a connection (transport default when unset)
    pub connect_timeout: Option<Duration>,
    /// Total time allowed for the request and response (default: 10s)
    pub read_timeout: Option<Duration>,
    /// How long a read may stay idle before failing (default: 5 min)
    pub read_idle_timeout: Option<Duration>,
    /// How long an idle pooled connection is kept (default: 0s)
    pub connection_pool_idle_timeout: Option<Duration>,
    /// Response body ceiling in bytes (default: 10 MiB)
    pub max_content_length: Option<u64>,
    /// Charset used when the response declares none (default: UTF-8)
    pub default_charset: Option<String>,
    /// Extra request headers; values may be templates
    pub headers: Option<IndexMap<String, String>>,
}

impl ConnectionOptions {
    /// Resolves every unset field to its default.
    ///
    /// Pure; header templates are carried through unrendered.
    #[must_use]
    pub fn apply_defaults(&self) -> ConnectionConfig {
        ConnectionConfig {
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout.unwrap_or(defaults::read_timeout()),
            read_idle_timeout: self
                .read_idle_timeout
                .unwrap_or(defaults::read_idle_timeout()),
            connection_pool_idle_timeout: self
                .connection_pool_idle_timeout
                .unwrap_or(defaults::connection_pool_idle_timeout()),
            max_content_length: self
                .max_content_length
                .unwrap_or(defaults::MAX_CONTENT_LENGTH),
            default_charset: self
                .default_charset
                .clone()
                .unwrap_or_else(|| defaults::DEFAULT_CHARSET.to_string()),
            headers: self.headers.clone().unwrap_or_default(),
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Connection options with every default applied.
///
/// Immutable once built; header values are still templates at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Connect timeout, or `None` for the transport default
    pub connect_timeout: Option<Duration>,
    /// Total request deadline
    pub read_timeout: Duration,
    /// Per-read idle timeout
    pub read_idle_timeout: Duration,
    /// Idle lifetime of pooled connections
    pub connection_pool_idle_timeout: Duration,
    /// Response body ceiling in bytes
    pub max_content_length: u64,
    /// Default charset label
    pub default_charset: String,
    /// Header templates in insertion order
    pub headers: IndexMap<String, String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionOptions::default().apply_defaults()
    }
}

//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default status-post endpoint (X API v2).
pub const ENDPOINT: &str = "https://api.twitter.com/2/tweets";

/// Maximum length of a posted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 280;

/// Default total request deadline in seconds.
pub const READ_TIMEOUT_SECS: u64 = 10;

/// Default read idle timeout in seconds (5 minutes).
pub const READ_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default connection pool idle timeout in seconds.
pub const CONNECTION_POOL_IDLE_TIMEOUT_SECS: u64 = 0;

/// Default response body ceiling (10 MiB).
pub const MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;

/// Default charset label.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Default read timeout as Duration.
#[must_use]
pub const fn read_timeout() -> Duration {
    Duration::from_secs(READ_TIMEOUT_SECS)
}

/// Default read idle timeout as Duration.
#[must_use]
pub const fn read_idle_timeout() -> Duration {
    Duration::from_secs(READ_IDLE_TIMEOUT_SECS)
}

/// Default connection pool idle timeout as Duration.
#[must_use]
pub const fn connection_pool_idle_timeout() -> Duration {
    Duration::from_secs(CONNECTION_POOL_IDLE_TIMEOUT_SECS)
}

/// Default endpoint as a parsed URL.
#[must_use]
pub fn endpoint() -> url::Url {
    url::Url::parse(ENDPOINT).expect("default endpoint is a valid URL")
}

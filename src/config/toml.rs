//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::dispatch::CredentialParams;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Credentials section (bearer token or OAuth 1.0a)
    #[serde(default)]
    pub credentials: CredentialParams,

    /// What to post
    #[serde(default)]
    pub notification: NotificationSection,

    /// Where execution metadata comes from
    #[serde(default)]
    pub execution: ExecutionSection,

    /// HTTP client options
    #[serde(default)]
    pub options: OptionsSection,
}

/// Notification content section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationSection {
    /// Execution to report (defaults to the current execution)
    pub execution_id: Option<String>,

    /// Free text appended after the summary
    pub custom_message: Option<String>,

    /// Status endpoint URL
    pub endpoint: Option<String>,

    /// Custom fields, posted in file order. Numbers, booleans and dates are
    /// written as they appear in the file.
    #[serde(default, deserialize_with = "scalar_fields")]
    pub custom_fields: IndexMap<String, String>,
}

fn scalar_fields<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    IndexMap::<String, toml::Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    return Err(serde::de::Error::custom(format!(
                        "custom field `{key}` must be a string, number, boolean or date"
                    )));
                }
            };
            Ok((key, text))
        })
        .collect()
}

/// Execution metadata section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionSection {
    /// JSON file holding the execution metadata
    pub file: Option<PathBuf>,
}

/// HTTP client options section. Durations are in seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsSection {
    /// Connect timeout
    pub connect_timeout: Option<u64>,

    /// Total request timeout
    pub read_timeout: Option<u64>,

    /// Read idle timeout
    pub read_idle_timeout: Option<u64>,

    /// Connection pool idle timeout
    pub connection_pool_idle_timeout: Option<u64>,

    /// Response body ceiling in bytes
    pub max_content_length: Option<u64>,

    /// Charset used when the response declares none
    pub default_charset: Option<String>,

    /// Extra headers; values may be Handlebars templates
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# x-notify configuration file

[credentials]
# Either a bearer token...
# bearer_token = "your-bearer-token"

# ...or all four OAuth 1.0a values (not both)
# consumer_key = ""
# consumer_secret = ""
# access_token = ""
# access_secret = ""

[execution]
# JSON file with execution metadata (required)
# Fields: id, namespace, link, status, start_date, duration, flow_id (optional)
# file = "execution.json"

[notification]
# Execution to report (default: the first/current execution in the file)
# execution_id = "abc123"

# Free text appended after the summary; keep the total within 280 characters
# custom_message = "Production workflow failed - immediate attention required!"

# Status endpoint (default: https://api.twitter.com/2/tweets)
# endpoint = "https://api.twitter.com/2/tweets"

# Custom fields, posted as "Key: Value" lines in this order
# [notification.custom_fields]
# Environment = "Production"
# Team = "DevOps"

[options]
# Connect timeout in seconds (default: transport default)
# connect_timeout = 5

# Total request timeout in seconds (default: 10)
# read_timeout = 10

# Read idle timeout in seconds (default: 300)
# read_idle_timeout = 300

# Connection pool idle timeout in seconds (default: 0, no idle pooling)
# connection_pool_idle_timeout = 0

# Maximum response size in bytes (default: 10485760)
# max_content_length = 10485760

# Charset for responses that declare none (default: UTF-8)
# default_charset = "UTF-8"

# Extra headers; values may use execution variables, e.g. {{namespace}}
# [options.headers]
# X-Datacenter = "eu-west-1"
"#
    .to_string()
}

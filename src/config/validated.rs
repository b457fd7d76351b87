//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use url::Url;

use crate::connection::ConnectionOptions;
use crate::dispatch::CredentialParams;
use crate::task::TaskParameters;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// Credentials are carried as raw parameters; their completeness is checked
/// by the task so the same rules apply to every caller.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Parameters for the notification task
    pub params: TaskParameters,

    /// JSON file with execution metadata (required)
    pub execution_file: PathBuf,

    /// Status endpoint
    pub endpoint: Url,

    /// Dry-run mode (compose and log without sending)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ endpoint: {}, auth: {}, execution_file: {}, execution_id: {}, \
             custom_fields: {}, custom_message: {}, options: {}, dry_run: {} }}",
            self.endpoint,
            self.params.credentials.scheme_hint(),
            self.execution_file.display(),
            self.params.execution_id.as_deref().unwrap_or("current"),
            self.params.custom_fields.as_ref().map_or(0, IndexMap::len),
            self.params.custom_message.is_some(),
            if self.params.options.is_some() {
                "custom"
            } else {
                "default"
            },
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The execution file is missing
    /// - The endpoint URL is invalid
    /// - A header or custom field argument is malformed
    /// - `max_content_length` is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let execution_file = Self::resolve_execution_file(cli, toml)?;
        let endpoint = Self::resolve_endpoint(cli, toml)?;
        let credentials = Self::resolve_credentials(cli, toml);
        let custom_fields = Self::resolve_custom_fields(cli, toml)?;
        let options = Self::resolve_options(cli, toml)?;

        let execution_id = cli
            .execution_id
            .clone()
            .or_else(|| toml.and_then(|t| t.notification.execution_id.clone()));

        let custom_message = cli
            .message
            .clone()
            .or_else(|| toml.and_then(|t| t.notification.custom_message.clone()));

        Ok(Self {
            params: TaskParameters {
                credentials,
                execution_id,
                custom_fields,
                custom_message,
                options,
            },
            execution_file,
            endpoint,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_execution_file(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<PathBuf, ConfigError> {
        cli.execution_file
            .clone()
            .or_else(|| toml.and_then(|t| t.execution.file.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::EXECUTION_FILE,
                    "Use --execution-file or set execution.file in config file",
                )
            })
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notification.endpoint.as_deref()))
            .unwrap_or(defaults::ENDPOINT);

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_credentials(cli: &Cli, toml: Option<&TomlConfig>) -> CredentialParams {
        // Each field independently: CLI explicit > TOML
        let file = toml.map(|t| t.credentials.clone()).unwrap_or_default();

        CredentialParams {
            bearer_token: cli.bearer_token.clone().or(file.bearer_token),
            consumer_key: cli.consumer_key.clone().or(file.consumer_key),
            consumer_secret: cli.consumer_secret.clone().or(file.consumer_secret),
            access_token: cli.access_token.clone().or(file.access_token),
            access_secret: cli.access_secret.clone().or(file.access_secret),
        }
    }

    fn resolve_custom_fields(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<IndexMap<String, String>>, ConfigError> {
        // TOML fields first (file order), then CLI fields (override or append)
        let mut fields = toml
            .map(|t| t.notification.custom_fields.clone())
            .unwrap_or_default();

        for raw in &cli.fields {
            let (key, value) = parse_pair("custom field", raw)?;
            fields.insert(key, value);
        }

        Ok((!fields.is_empty()).then_some(fields))
    }

    fn resolve_options(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<ConnectionOptions>, ConfigError> {
        let section = toml.map(|t| &t.options);
        let secs = |from_cli: Option<u64>, from_file: Option<u64>| {
            from_cli.or(from_file).map(Duration::from_secs)
        };

        let mut headers = section.map(|s| s.headers.clone()).unwrap_or_default();
        for raw in &cli.headers {
            let (name, value) = parse_pair("header", raw)?;
            headers.insert(name, value);
        }

        let max_content_length = section.and_then(|s| s.max_content_length);
        if max_content_length == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_content_length",
                reason: "must be greater than 0".to_string(),
            });
        }

        let options = ConnectionOptions {
            connect_timeout: secs(cli.connect_timeout, section.and_then(|s| s.connect_timeout)),
            read_timeout: secs(cli.read_timeout, section.and_then(|s| s.read_timeout)),
            read_idle_timeout: secs(None, section.and_then(|s| s.read_idle_timeout)),
            connection_pool_idle_timeout: secs(
                None,
                section.and_then(|s| s.connection_pool_idle_timeout),
            ),
            max_content_length,
            default_charset: section.and_then(|s| s.default_charset.clone()),
            headers: (!headers.is_empty()).then_some(headers),
        };

        Ok((!options.is_empty()).then_some(options))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_pair(kind: &'static str, s: &str) -> Result<(String, String), ConfigError> {
    // "Key=Value" or "Key: Value"; the first separator wins so values may contain the other
    let at = s.find(['=', ':']).ok_or_else(|| ConfigError::InvalidPair {
        kind,
        value: s.to_string(),
    })?;
    let (name, value) = (&s[..at], &s[at + 1..]);

    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidPair {
            kind,
            value: s.to_string(),
        });
    }

    Ok((name.to_string(), value.trim().to_string()))
}

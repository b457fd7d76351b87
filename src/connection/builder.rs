//! Translation of connection options into the transport configuration.

use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::{ConfigRenderError, ConnectionConfig, ConnectionOptions};
use crate::template::TemplateRenderer;

/// Configuration consumed by the HTTP transport and the dispatcher.
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    /// Connect timeout, or `None` for the transport default
    pub connect_timeout: Option<Duration>,
    /// Total request deadline (zero disables it)
    pub read_timeout: Duration,
    /// Per-read idle timeout (zero disables it)
    pub read_idle_timeout: Duration,
    /// Idle lifetime of pooled connections (zero disables idle pooling)
    pub pool_idle_timeout: Duration,
    /// Response body ceiling in bytes
    pub max_content_length: u64,
    /// Charset used to decode responses that declare none
    pub default_charset: &'static encoding_rs::Encoding,
    /// Rendered headers attached to every outbound request
    pub headers: HeaderMap,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        let config = ConnectionConfig::default();
        Self {
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
            read_idle_timeout: config.read_idle_timeout,
            pool_idle_timeout: config.connection_pool_idle_timeout,
            max_content_length: config.max_content_length,
            default_charset: encoding_rs::UTF_8,
            headers: HeaderMap::new(),
        }
    }
}

/// Builds a [`ClientConfiguration`] from optional caller options.
///
/// Pure transformation: renders header templates, validates names, values
/// and the charset, and performs no network I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientConfigBuilder;

impl ClientConfigBuilder {
    /// Resolves `options` (absent means all defaults) into a client configuration.
    ///
    /// Header values are rendered with `renderer` against `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigRenderError`] naming the offending header when a value
    /// fails to render or is not a valid header, or when the charset or the
    /// size ceiling is invalid.
    pub fn build<R: TemplateRenderer + ?Sized>(
        options: Option<&ConnectionOptions>,
        renderer: &R,
        variables: &Value,
    ) -> Result<ClientConfiguration, ConfigRenderError> {
        let config = options.map_or_else(ConnectionConfig::default, ConnectionOptions::apply_defaults);
        Self::from_config(&config, renderer, variables)
    }

    /// Resolves an already defaulted [`ConnectionConfig`].
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn from_config<R: TemplateRenderer + ?Sized>(
        config: &ConnectionConfig,
        renderer: &R,
        variables: &Value,
    ) -> Result<ClientConfiguration, ConfigRenderError> {
        if config.max_content_length == 0 {
            return Err(ConfigRenderError::InvalidContentLength);
        }

        let default_charset = encoding_rs::Encoding::for_label(config.default_charset.trim().as_bytes())
            .ok_or_else(|| ConfigRenderError::UnknownCharset {
                label: config.default_charset.clone(),
            })?;

        let headers = render_headers(config, renderer, variables)?;

        Ok(ClientConfiguration {
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
            read_idle_timeout: config.read_idle_timeout,
            pool_idle_timeout: config.connection_pool_idle_timeout,
            max_content_length: config.max_content_length,
            default_charset,
            headers,
        })
    }
}

fn render_headers<R: TemplateRenderer + ?Sized>(
    config: &ConnectionConfig,
    renderer: &R,
    variables: &Value,
) -> Result<HeaderMap, ConfigRenderError> {
    let mut headers = HeaderMap::with_capacity(config.headers.len());

    for (name, template) in &config.headers {
        let header_name = parse_header_name(name)?;
        let rendered = renderer
            .render_str(template, variables)
            .map_err(|source| ConfigRenderError::Render {
                header: name.clone(),
                source,
            })?;
        let header_value = HeaderValue::from_str(&rendered).map_err(|e| {
            ConfigRenderError::InvalidHeaderValue {
                name: name.clone(),
                reason: e.to_string(),
            }
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigRenderError> {
    if name.trim().is_empty() {
        return Err(ConfigRenderError::InvalidHeaderName {
            name: name.to_string(),
            reason: "header name must not be empty".to_string(),
        });
    }
    name.trim()
        .parse::<HeaderName>()
        .map_err(|e| ConfigRenderError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

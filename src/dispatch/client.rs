//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{Connector, HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::config::defaults;
use crate::connection::ClientConfiguration;

/// Production HTTP client using reqwest.
///
/// Wraps a configured `reqwest::Client` and enforces the response body-size
/// ceiling while streaming. Bytes past the ceiling are never read; the
/// response keeps its status and is marked as truncated.
///
/// # Example
///
/// ```no_run
/// use x_notify::dispatch::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.example.com/status")?;
/// let request = HttpRequest::post(url).with_body(b"{}".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    max_content_length: u64,
}

impl ReqwestClient {
    /// Creates a client with reqwest's defaults and the default body-size ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            max_content_length: defaults::MAX_CONTENT_LENGTH,
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client, max_content_length: u64) -> Self {
        Self {
            inner: client,
            max_content_length,
        }
    }

    /// Builds a client honoring the timeouts, pooling and size ceiling of `config`.
    ///
    /// Zero read and read-idle timeouts disable the respective deadline.
    /// A zero pool idle timeout disables keeping idle connections.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if reqwest rejects the configuration
    /// (for example when no TLS backend can be initialized).
    pub fn from_config(config: &ClientConfiguration) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();

        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if !config.read_timeout.is_zero() {
            builder = builder.timeout(config.read_timeout);
        }
        if !config.read_idle_timeout.is_zero() {
            builder = builder.read_timeout(config.read_idle_timeout);
        }
        builder = if config.pool_idle_timeout == Duration::ZERO {
            builder.pool_max_idle_per_host(0)
        } else {
            builder.pool_idle_timeout(config.pool_idle_timeout)
        };

        let inner = builder
            .build()
            .map_err(|e| HttpError::ClientBuild(Box::new(e)))?;

        Ok(Self::from_client(inner, config.max_content_length))
    }

    /// Returns the response body-size ceiling in bytes.
    #[must_use]
    pub const fn max_content_length(&self) -> u64 {
        self.max_content_length
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let mut response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let limit = usize::try_from(self.max_content_length).unwrap_or(usize::MAX);

        // Stop reading at the ceiling; the status is kept either way.
        let mut body = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
            let room = limit - body.len();
            if chunk.len() > room {
                body.extend_from_slice(&chunk[..room]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }

        if truncated {
            tracing::warn!(
                status = status.as_u16(),
                limit,
                "Response body exceeds the maximum content length; keeping the first bytes"
            );
        }

        Ok(HttpResponse::new(status, headers, body).with_truncated(truncated))
    }
}

/// Connects a fresh [`ReqwestClient`] per task invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Client = ReqwestClient;

    fn connect(&self, config: &ClientConfiguration) -> Result<ReqwestClient, HttpError> {
        ReqwestClient::from_config(config)
    }
}

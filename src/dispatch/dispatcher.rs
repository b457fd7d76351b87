//! Authenticated dispatch of a composed status message.

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::oauth::{OAuth1Signer, RequestNonce};
use super::{Credential, DispatchError, HttpClient, HttpRequest, HttpResponse};
use crate::config::defaults;
use crate::connection::ClientConfiguration;
use crate::time::{Clock, SystemClock};

/// Maximum number of characters of an error response kept in [`DispatchError::Api`].
pub const BODY_EXCERPT_CHARS: usize = 500;

/// Successful dispatch outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// Identifier of the created post, when the API returned one
    pub id: Option<String>,
}

/// JSON payload of the status-post endpoint.
#[derive(Serialize)]
struct StatusPayload<'a> {
    text: &'a str,
}

/// Sends a composed message to the status endpoint with the given credential.
///
/// Each [`send`](Self::send) issues exactly one request. Failures are
/// returned as-is; nothing is retried.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `C`: The clock used for OAuth timestamps (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use x_notify::dispatch::{AuthDispatcher, ReqwestClient};
///
/// let dispatcher = AuthDispatcher::new(ReqwestClient::new());
/// assert_eq!(dispatcher.endpoint().path(), "/2/tweets");
/// ```
#[derive(Debug)]
pub struct AuthDispatcher<H, C = SystemClock> {
    client: H,
    clock: C,
    endpoint: url::Url,
}

impl<H> AuthDispatcher<H, SystemClock> {
    /// Creates a dispatcher targeting the default status endpoint.
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            clock: SystemClock,
            endpoint: defaults::endpoint(),
        }
    }
}

impl<H, C> AuthDispatcher<H, C> {
    /// Sets a custom clock for OAuth timestamps.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> AuthDispatcher<H, C2> {
        AuthDispatcher {
            client: self.client,
            clock,
            endpoint: self.endpoint,
        }
    }

    /// Overrides the status endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: url::Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

impl<H: HttpClient, C: Clock> AuthDispatcher<H, C> {
    /// Builds the authenticated request without sending it.
    ///
    /// Caller headers from `config` are applied first; `Content-Type` and
    /// `Authorization` are then set by the protocol and replace any caller
    /// value with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::EmptyMessage`] for an empty message and
    /// [`DispatchError::Request`] if the credential cannot be encoded as a header.
    pub fn build_request(
        &self,
        message: &str,
        credential: &Credential,
        config: &ClientConfiguration,
    ) -> Result<HttpRequest, DispatchError> {
        if message.is_empty() {
            return Err(DispatchError::EmptyMessage);
        }

        let body = serde_json::to_vec(&StatusPayload { text: message })
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let mut request = HttpRequest::post(self.endpoint.clone()).with_body(body);
        for (name, value) in &config.headers {
            request.headers.append(name, value.clone());
        }

        for mandated in [&CONTENT_TYPE, &AUTHORIZATION] {
            if request.headers.contains_key(mandated) {
                tracing::debug!("Ignoring caller-supplied {mandated} header");
            }
        }

        let authorization = self.authorization(&request, credential)?;
        Ok(request
            .with_replaced_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_replaced_header(AUTHORIZATION, authorization))
    }

    fn authorization(
        &self,
        request: &HttpRequest,
        credential: &Credential,
    ) -> Result<HeaderValue, DispatchError> {
        let value = match credential {
            Credential::BearerToken { token } => format!("Bearer {token}"),
            Credential::OAuth1 {
                consumer_key,
                consumer_secret,
                access_token,
                access_secret,
            } => {
                let signer =
                    OAuth1Signer::new(consumer_key, consumer_secret, access_token, access_secret);
                let nonce = RequestNonce::fresh(self.clock.unix_timestamp());
                // JSON bodies are not part of the OAuth 1.0a signature.
                signer.authorization_header(&request.method, &request.url, &[], &nonce)
            }
        };

        let mut header = HeaderValue::from_str(&value).map_err(|_| {
            DispatchError::Request(format!(
                "{} credential contains characters not allowed in a header",
                credential.scheme()
            ))
        })?;
        header.set_sensitive(true);
        Ok(header)
    }

    /// Sends `message` once, authenticated with `credential`.
    ///
    /// If `cancel` fires while the request is in flight, the request future
    /// is dropped (closing its connection) and [`DispatchError::Cancelled`]
    /// is returned.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::EmptyMessage`] before any request for an empty message
    /// - [`DispatchError::Transport`] for timeouts, connection and TLS failures
    /// - [`DispatchError::Api`] for non-2xx responses
    /// - [`DispatchError::Cancelled`] when cancelled
    pub async fn send(
        &self,
        message: &str,
        credential: &Credential,
        config: &ClientConfiguration,
        cancel: &CancellationToken,
    ) -> Result<Dispatched, DispatchError> {
        let request = self.build_request(message, credential, config)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            scheme = credential.scheme(),
            chars = message.chars().count(),
            "Sending status update"
        );

        let response = tokio::select! {
            biased;

            () = cancel.cancelled() => {
                tracing::warn!("Dispatch cancelled while request was in flight");
                return Err(DispatchError::Cancelled);
            }

            result = self.client.request(request) => result?,
        };

        interpret(&response, config)
    }
}

/// Maps a response to the dispatch outcome.
fn interpret(
    response: &HttpResponse,
    config: &ClientConfiguration,
) -> Result<Dispatched, DispatchError> {
    if response.is_success() {
        let id = extract_id(&response.body);
        tracing::info!(
            status = response.status.as_u16(),
            id = id.as_deref().unwrap_or("-"),
            "Status posted"
        );
        return Ok(Dispatched { id });
    }

    let excerpt = excerpt(&response.body_text(config.default_charset));
    tracing::warn!(status = response.status.as_u16(), "Status endpoint rejected the request");
    Err(DispatchError::Api {
        status: response.status,
        excerpt,
    })
}

/// Reads `data.id` (X API v2) or a top-level `id` from a JSON body.
fn extract_id(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let id = value
        .pointer("/data/id")
        .or_else(|| value.get("id_str"))
        .or_else(|| value.get("id"))?;

    match id {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

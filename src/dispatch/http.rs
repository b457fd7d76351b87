//! HTTP request/response types and the client trait.

use super::HttpError;

/// An HTTP request to be sent.
///
/// This is a value type that can be constructed and passed to any
/// [`HttpClient`] implementation. It uses standard `http` crate types
/// for method and headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map and body is `None`.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header to the request.
    ///
    /// If the header name already exists, the value is appended.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets a header, replacing every existing value with that name.
    #[must_use]
    pub fn with_replaced_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// An HTTP response received from a server.
///
/// The body is buffered in memory, bounded by the client's size ceiling.
/// A body cut at the ceiling keeps its leading bytes and sets `truncated`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
    /// True when the body was cut at the size ceiling
    pub truncated: bool,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
            truncated: false,
        }
    }

    /// Marks whether the body was cut at the size ceiling.
    #[must_use]
    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the charset label declared in the `Content-Type` header, if any.
    #[must_use]
    pub fn declared_charset(&self) -> Option<&str> {
        let content_type = self.headers.get(http::header::CONTENT_TYPE)?.to_str().ok()?;
        content_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"'))
        })
    }

    /// Decodes the body as text.
    ///
    /// Uses the charset declared by the response, falling back to `default`
    /// when none is declared or the label is unknown. Malformed sequences
    /// are replaced rather than rejected.
    #[must_use]
    pub fn body_text(&self, default: &'static encoding_rs::Encoding) -> String {
        let encoding = self
            .declared_charset()
            .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
            .unwrap_or(default);
        let (text, _, _) = encoding.decode(&self.body);
        text.into_owned()
    }
}

/// Trait for making HTTP requests.
///
/// Abstracts the transport so the dispatcher can be tested with mock
/// clients and the HTTP library can be swapped without touching callers.
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    ///
    /// A response larger than the body-size ceiling is not an error: its
    /// status is returned with the body cut at the ceiling.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Builds an [`HttpClient`] from a resolved client configuration.
///
/// Each task invocation connects a fresh client so timeouts, pooling and
/// the body-size ceiling always reflect that invocation's options.
pub trait Connector: Send + Sync {
    /// The client type produced by this connector.
    type Client: HttpClient;

    /// Creates a client honoring the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the transport rejects the configuration.
    fn connect(
        &self,
        config: &crate::connection::ClientConfiguration,
    ) -> Result<Self::Client, HttpError>;
}

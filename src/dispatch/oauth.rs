//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Implements the signing contract only: parameter collection, the
//! signature base string, the signing key and the `Authorization` header.
//! Token acquisition flows are out of scope.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Characters left unescaped by RFC 3986: `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Length of generated nonces.
pub const NONCE_LEN: usize = 32;

/// Percent-encodes a value as required by OAuth 1.0a (RFC 3986, uppercase hex).
#[must_use]
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Generates a random alphanumeric nonce.
#[must_use]
pub fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Per-request values that make a signature unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestNonce {
    /// Single-use random token
    pub nonce: String,
    /// Request time in seconds since the Unix epoch
    pub timestamp: u64,
}

impl RequestNonce {
    /// Creates a fresh nonce for the given timestamp.
    #[must_use]
    pub fn fresh(timestamp: u64) -> Self {
        Self {
            nonce: generate_nonce(),
            timestamp,
        }
    }
}

/// Signs requests with a consumer key pair and an access token pair.
#[derive(Clone, Copy)]
pub struct OAuth1Signer<'a> {
    consumer_key: &'a str,
    consumer_secret: &'a str,
    access_token: &'a str,
    access_secret: &'a str,
}

impl std::fmt::Debug for OAuth1Signer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Signer")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

impl<'a> OAuth1Signer<'a> {
    /// Creates a signer from the four credential parts.
    #[must_use]
    pub const fn new(
        consumer_key: &'a str,
        consumer_secret: &'a str,
        access_token: &'a str,
        access_secret: &'a str,
    ) -> Self {
        Self {
            consumer_key,
            consumer_secret,
            access_token,
            access_secret,
        }
    }

    /// The `oauth_*` protocol parameters, excluding the signature.
    fn protocol_params(&self, nonce: &RequestNonce) -> [(&'static str, String); 6] {
        [
            ("oauth_consumer_key", self.consumer_key.to_string()),
            ("oauth_nonce", nonce.nonce.clone()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", nonce.timestamp.to_string()),
            ("oauth_token", self.access_token.to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    /// Builds the signature base string.
    ///
    /// Parameters are the protocol parameters, the URL query parameters and
    /// `form_params` (only form-encoded bodies are signed; JSON bodies are not).
    /// They are percent-encoded, sorted by key then value and joined with `&`.
    #[must_use]
    pub fn signature_base_string(
        &self,
        method: &http::Method,
        url: &url::Url,
        form_params: &[(&str, &str)],
        nonce: &RequestNonce,
    ) -> String {
        let mut params: Vec<(String, String)> = self
            .protocol_params(nonce)
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .chain(
                url.query_pairs()
                    .map(|(k, v)| (percent_encode(&k), percent_encode(&v))),
            )
            .chain(
                form_params
                    .iter()
                    .map(|(k, v)| (percent_encode(k), percent_encode(v))),
            )
            .collect();
        params.sort();

        let param_string = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        format!(
            "{}&{}&{}",
            method.as_str().to_ascii_uppercase(),
            percent_encode(base_url.as_str()),
            percent_encode(&param_string)
        )
    }

    /// Signing key: `enc(consumer_secret) & enc(access_secret)`.
    #[must_use]
    pub fn signing_key(&self) -> String {
        format!(
            "{}&{}",
            percent_encode(self.consumer_secret),
            percent_encode(self.access_secret)
        )
    }

    /// Computes the base64 HMAC-SHA1 signature of a base string.
    #[must_use]
    pub fn sign(&self, base_string: &str) -> String {
        let mut mac = HmacSha1::new_from_slice(self.signing_key().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(base_string.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Builds the complete `Authorization` header value for a request.
    #[must_use]
    pub fn authorization_header(
        &self,
        method: &http::Method,
        url: &url::Url,
        form_params: &[(&str, &str)],
        nonce: &RequestNonce,
    ) -> String {
        let base_string = self.signature_base_string(method, url, form_params, nonce);
        let signature = self.sign(&base_string);

        let mut params: Vec<(&str, String)> = self.protocol_params(nonce).into_iter().collect();
        params.push(("oauth_signature", signature));
        params.sort_by(|a, b| a.0.cmp(b.0));

        let fields = params
            .iter()
            .map(|(k, v)| format!("{k}=\"{}\"", percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {fields}")
    }
}

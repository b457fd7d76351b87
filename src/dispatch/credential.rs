//! Credentials accepted by the dispatcher.

use std::fmt;

use serde::Deserialize;

use super::CredentialError;

/// Authentication scheme used for a single dispatch.
///
/// Exactly one variant is active; the dispatcher matches on it exhaustively.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// App-only bearer token sent as `Authorization: Bearer <token>`.
    BearerToken {
        /// The token
        token: String,
    },
    /// OAuth 1.0a user-context credentials used to sign each request.
    OAuth1 {
        /// Consumer (API) key
        consumer_key: String,
        /// Consumer (API) secret
        consumer_secret: String,
        /// Access token
        access_token: String,
        /// Access token secret
        access_secret: String,
    },
}

impl Credential {
    /// Creates a bearer-token credential.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: token.into(),
        }
    }

    /// Creates an OAuth 1.0a credential.
    #[must_use]
    pub fn oauth1(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self::OAuth1 {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Short name of the scheme, safe to log.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::BearerToken { .. } => "bearer",
            Self::OAuth1 { .. } => "oauth1",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BearerToken { .. } => f
                .debug_struct("BearerToken")
                .field("token", &"<redacted>")
                .finish(),
            Self::OAuth1 {
                consumer_key,
                access_token,
                ..
            } => f
                .debug_struct("OAuth1")
                .field("consumer_key", consumer_key)
                .field("consumer_secret", &"<redacted>")
                .field("access_token", access_token)
                .field("access_secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Raw credential parameters as supplied by the caller.
///
/// Secrets are expected to be resolved already. Empty strings are treated
/// as absent.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialParams {
    /// Bearer token (mutually exclusive with the OAuth 1.0a fields)
    pub bearer_token: Option<String>,
    /// OAuth 1.0a consumer key
    pub consumer_key: Option<String>,
    /// OAuth 1.0a consumer secret
    pub consumer_secret: Option<String>,
    /// OAuth 1.0a access token
    pub access_token: Option<String>,
    /// OAuth 1.0a access token secret
    pub access_secret: Option<String>,
}

impl fmt::Debug for CredentialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialParams")
            .field("bearer_token", &mask(&self.bearer_token))
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &mask(&self.consumer_secret))
            .field("access_token", &self.access_token)
            .field("access_secret", &mask(&self.access_secret))
            .finish()
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl CredentialParams {
    /// Resolves the parameters into exactly one [`Credential`].
    ///
    /// # Errors
    ///
    /// - [`CredentialError::Missing`] if nothing was supplied
    /// - [`CredentialError::Ambiguous`] if a bearer token is combined with OAuth fields
    /// - [`CredentialError::IncompleteOAuth`] if any of the four OAuth fields is missing
    pub fn resolve(&self) -> Result<Credential, CredentialError> {
        let bearer = present(self.bearer_token.as_ref());
        let oauth = [
            ("consumer_key", present(self.consumer_key.as_ref())),
            ("consumer_secret", present(self.consumer_secret.as_ref())),
            ("access_token", present(self.access_token.as_ref())),
            ("access_secret", present(self.access_secret.as_ref())),
        ];
        let any_oauth = oauth.iter().any(|(_, v)| v.is_some());

        match (bearer, any_oauth) {
            (None, false) => Err(CredentialError::Missing),
            (Some(_), true) => Err(CredentialError::Ambiguous),
            (Some(token), false) => Ok(Credential::bearer(token)),
            (None, true) => {
                let missing: Vec<&'static str> = oauth
                    .iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| *name)
                    .collect();
                if !missing.is_empty() {
                    return Err(CredentialError::IncompleteOAuth { missing });
                }
                let [
                    (_, Some(consumer_key)),
                    (_, Some(consumer_secret)),
                    (_, Some(access_token)),
                    (_, Some(access_secret)),
                ] = oauth
                else {
                    return Err(CredentialError::Missing);
                };
                Ok(Credential::oauth1(
                    consumer_key,
                    consumer_secret,
                    access_token,
                    access_secret,
                ))
            }
        }
    }

    /// Returns the scheme these parameters would select, without validating completeness.
    #[must_use]
    pub fn scheme_hint(&self) -> &'static str {
        if present(self.bearer_token.as_ref()).is_some() {
            "bearer"
        } else if present(self.consumer_key.as_ref()).is_some()
            || present(self.access_token.as_ref()).is_some()
        {
            "oauth1"
        } else {
            "none"
        }
    }
}

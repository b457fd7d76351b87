//! Dispatch layer: authenticating and posting a composed message.
//!
//! This module provides:
//! - Credentials ([`Credential`], [`CredentialParams`])
//! - OAuth 1.0a signing ([`OAuth1Signer`])
//! - HTTP request/response types and transport traits ([`HttpRequest`],
//!   [`HttpResponse`], [`HttpClient`], [`Connector`])
//! - Production transport ([`ReqwestClient`], [`ReqwestConnector`])
//! - The dispatcher itself ([`AuthDispatcher`])

mod client;
mod credential;
mod dispatcher;
mod error;
mod http;
pub mod oauth;

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
mod credential_tests;

pub use client::{ReqwestClient, ReqwestConnector};
pub use credential::{Credential, CredentialParams};
pub use dispatcher::{AuthDispatcher, BODY_EXCERPT_CHARS, Dispatched};
pub use error::{CredentialError, DispatchError, HttpError};
pub use self::http::{Connector, HttpClient, HttpRequest, HttpResponse};
pub use oauth::OAuth1Signer;

//! HTTP client configuration model.
//!
//! Caller options ([`ConnectionOptions`]) are defaulted field by field into a
//! [`ConnectionConfig`], whose header templates are then rendered and
//! validated by [`ClientConfigBuilder`] into the [`ClientConfiguration`]
//! handed to the transport.

mod builder;
mod error;
mod options;


pub use builder::{ClientConfigBuilder, ClientConfiguration};
pub use error::ConfigRenderError;
pub use options::{ConnectionConfig, ConnectionOptions};

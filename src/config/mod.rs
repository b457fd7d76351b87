//! Configuration layer for x-notify.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file**
//! 3. **Built-in defaults**
//!
//! Credentials are merged field by field, so a file can hold the consumer
//! key pair while the access token pair comes from the command line.
//!
//! Custom fields and headers are merged as ordered maps: file entries keep
//! their file order, CLI entries with a new key are appended, and CLI
//! entries with an existing key replace the value in place.
//!
//! # CLI-Only vs TOML-Only Options
//!
//! Some connection options are TOML-only:
//! - `options.read_idle_timeout` (default: 300s)
//! - `options.connection_pool_idle_timeout` (default: 0s)
//! - `options.max_content_length` (default: 10 MiB)
//! - `options.default_charset` (default: UTF-8)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};

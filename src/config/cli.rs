//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// x-notify: post a workflow execution summary to X
///
/// Renders the bundled summary template for an execution, appends custom
/// fields and a custom message, caps the text at 280 characters and posts it
/// with a bearer token or OAuth 1.0a credentials.
#[derive(Debug, Parser)]
#[command(name = "x-notify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Bearer token (app-only authentication)
    #[arg(long = "bearer-token")]
    pub bearer_token: Option<String>,

    /// OAuth 1.0a consumer key
    #[arg(long = "consumer-key")]
    pub consumer_key: Option<String>,

    /// OAuth 1.0a consumer secret
    #[arg(long = "consumer-secret")]
    pub consumer_secret: Option<String>,

    /// OAuth 1.0a access token
    #[arg(long = "access-token")]
    pub access_token: Option<String>,

    /// OAuth 1.0a access token secret
    #[arg(long = "access-secret")]
    pub access_secret: Option<String>,

    /// JSON file with execution metadata (one object or an array)
    #[arg(long = "execution-file", value_name = "FILE")]
    pub execution_file: Option<PathBuf>,

    /// Execution to report (defaults to the current execution)
    #[arg(long = "execution-id")]
    pub execution_id: Option<String>,

    /// Custom field in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "field", value_name = "K=V")]
    pub fields: Vec<String>,

    /// Custom message appended after the summary
    #[arg(long)]
    pub message: Option<String>,

    /// Status endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Connect timeout in seconds
    #[arg(long = "connect-timeout")]
    pub connect_timeout: Option<u64>,

    /// Total request timeout in seconds
    #[arg(long = "read-timeout")]
    pub read_timeout: Option<u64>,

    /// HTTP header in 'Key=Value' or 'Key: Value' format; values may be templates
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Compose and log the message without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for x-notify
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "x-notify.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}

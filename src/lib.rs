//! x-notify: workflow execution summaries posted to X
//!
//! A library for rendering an execution summary, merging custom fields and
//! a custom message under the 280-character cap, and posting the result
//! with bearer-token or OAuth 1.0a authentication.

pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod execution;
pub mod message;
pub mod task;
pub mod template;
pub mod time;

pub use error::TaskError;
pub use task::{NotificationTask, TaskParameters};

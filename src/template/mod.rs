//! Template rendering.
//!
//! The summary posted for an execution comes from a bundled Handlebars
//! template ([`SUMMARY_TEMPLATE`]); header values in connection options are
//! rendered as inline templates against the same variables.

mod error;
mod renderer;

#[cfg(test)]
mod renderer_tests;

pub use error::TemplateError;
pub use renderer::{HandlebarsRenderer, SUMMARY_TEMPLATE, TemplateRenderer};

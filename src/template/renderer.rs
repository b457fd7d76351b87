//! Renderer trait and the Handlebars implementation.

use handlebars::{Handlebars, RenderError, RenderErrorReason};
use serde_json::Value;

use super::TemplateError;

/// Name under which the bundled execution summary template is registered.
pub const SUMMARY_TEMPLATE: &str = "x";

const SUMMARY_SOURCE: &str = include_str!("../../templates/x.hbs");

/// Name reported for inline templates in errors.
const INLINE: &str = "inline";

/// Renders named and inline templates against JSON variables.
pub trait TemplateRenderer: Send + Sync {
    /// Renders the template registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] naming the template and, when known, the
    /// missing or invalid variable.
    fn render(&self, name: &str, variables: &Value) -> Result<String, TemplateError>;

    /// Renders an inline template string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] on syntax errors or missing variables.
    fn render_str(&self, template: &str, variables: &Value) -> Result<String, TemplateError>;
}

/// Handlebars renderer in strict mode with HTML escaping disabled.
///
/// Strict mode turns a reference to an undefined variable into an error
/// instead of an empty string.
///
/// # Example
///
/// ```
/// use x_notify::template::{HandlebarsRenderer, TemplateRenderer};
///
/// let renderer = HandlebarsRenderer::new().unwrap();
/// let text = renderer
///     .render_str("Hello {{name}}", &serde_json::json!({"name": "X"}))
///     .unwrap();
/// assert_eq!(text, "Hello X");
/// ```
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsRenderer")
            .field("templates", &self.registry.get_templates().len())
            .finish()
    }
}

impl HandlebarsRenderer {
    /// Creates a renderer with the bundled summary template registered.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Invalid`] if the bundled template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        let mut renderer = Self { registry };
        renderer.register(SUMMARY_TEMPLATE, SUMMARY_SOURCE)?;
        Ok(renderer)
    }

    /// Registers (or replaces) a named template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Invalid`] on a syntax error.
    pub fn register(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Invalid {
                template: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns true if a template is registered under `name`.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

fn render_error(template: &str, error: &RenderError) -> TemplateError {
    match error.reason() {
        RenderErrorReason::TemplateNotFound(_) => TemplateError::NotFound {
            template: template.to_string(),
        },
        RenderErrorReason::TemplateError(e) => TemplateError::Invalid {
            template: template.to_string(),
            reason: e.to_string(),
        },
        reason => {
            let variable = match reason {
                RenderErrorReason::MissingVariable(path) => path.clone(),
                _ => None,
            };
            TemplateError::Render {
                template: template.to_string(),
                variable,
                reason: error.to_string(),
            }
        }
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, variables: &Value) -> Result<String, TemplateError> {
        if !self.registry.has_template(name) {
            return Err(TemplateError::NotFound {
                template: name.to_string(),
            });
        }
        self.registry
            .render(name, variables)
            .map_err(|e| render_error(name, &e))
    }

    fn render_str(&self, template: &str, variables: &Value) -> Result<String, TemplateError> {
        self.registry
            .render_template(template, variables)
            .map_err(|e| render_error(INLINE, &e))
    }
}

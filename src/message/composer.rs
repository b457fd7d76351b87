//! Assembly and truncation of the posted message.

use indexmap::IndexMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::defaults;

/// Merges the rendered template, custom fields and a custom message into
/// one string bounded by the platform limit.
///
/// Segments are joined with `\n`; empty or absent segments contribute
/// nothing. When the result exceeds the limit it is cut on the last grapheme
/// cluster boundary that fits, so no user-perceived character is split.
/// Truncation is silent unless a marker is configured.
///
/// # Example
///
/// ```
/// use indexmap::IndexMap;
/// use x_notify::message::MessageComposer;
///
/// let mut fields = IndexMap::new();
/// fields.insert("Team".to_string(), "DevOps".to_string());
///
/// let text = MessageComposer::default().compose("Execution abc123 succeeded", Some(&fields), Some("Deploy OK"));
/// assert_eq!(text, "Execution abc123 succeeded\nTeam: DevOps\nDeploy OK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageComposer {
    limit: usize,
    marker: Option<String>,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self {
            limit: defaults::MAX_MESSAGE_CHARS,
            marker: None,
        }
    }
}

impl MessageComposer {
    /// Sets a marker appended to truncated output (e.g. `"…"`).
    ///
    /// A marker that does not leave room for at least one character of
    /// text is itself cut to one character less than the limit.
    #[must_use]
    pub fn with_truncation_marker(mut self, marker: impl Into<String>) -> Self {
        let room = Self {
            limit: self.limit.saturating_sub(1),
            marker: None,
        };
        self.marker = Some(room.truncate(&marker.into()));
        self
    }

    /// Returns the character limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Assembles and truncates the message.
    #[must_use]
    pub fn compose(
        &self,
        template_body: &str,
        custom_fields: Option<&IndexMap<String, String>>,
        custom_message: Option<&str>,
    ) -> String {
        let mut segments: Vec<String> = Vec::new();

        if !template_body.trim().is_empty() {
            segments.push(template_body.to_string());
        }

        if let Some(fields) = custom_fields {
            segments.extend(
                fields
                    .iter()
                    .filter(|(key, _)| !key.trim().is_empty())
                    .map(|(key, value)| format!("{}: {}", key.trim(), value.trim())),
            );
        }

        if let Some(message) = custom_message.filter(|m| !m.trim().is_empty()) {
            segments.push(message.to_string());
        }

        self.truncate(&segments.join("\n"))
    }

    /// Cuts `text` to the character limit without splitting grapheme clusters.
    #[must_use]
    pub fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.limit {
            return text.to_string();
        }

        let marker = self.marker.as_deref().unwrap_or_default();
        let budget = self.limit - marker.chars().count();

        let mut used = 0;
        let mut end = 0;
        for (offset, grapheme) in text.grapheme_indices(true) {
            let width = grapheme.chars().count();
            if used + width > budget {
                break;
            }
            used += width;
            end = offset + grapheme.len();
        }

        let mut truncated = text[..end].to_string();
        truncated.push_str(marker);
        truncated
    }
}

/// Composes with the default (silent, 280-character) composer.
#[must_use]
pub fn compose(
    template_body: &str,
    custom_fields: Option<&IndexMap<String, String>>,
    custom_message: Option<&str>,
) -> String {
    MessageComposer::default().compose(template_body, custom_fields, custom_message)
}

//! Input types for AI requests.

use serde::{Deserialize, Serialize};

/// Supported input types to the AI service.
///
/// The studio currently sends only text to the model; the enum form keeps the
/// boundary open for media inputs without changing the message shape.
///
/// # Examples
///
/// ```
/// use cinestudio_core::Input;
///
/// let text = Input::Text("A lone astronaut on a distant moon.".to_string());
/// assert!(text.as_text().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),
}

impl Input {
    /// Borrow the text content, if this input is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
        }
    }
}

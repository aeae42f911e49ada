//! Output types from AI responses.

use serde::{Deserialize, Serialize};

/// Supported output types from the AI service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),

    /// Generated image output.
    Image {
        /// MIME type of the image
        mime: Option<String>,
        /// Binary image data
        data: Vec<u8>,
    },
}

impl Output {
    /// Borrow the text content, if this output is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            _ => None,
        }
    }
}

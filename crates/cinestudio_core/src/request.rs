//! Request and response types for AI generation.

use crate::{Message, Output};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// # Examples
///
/// ```
/// use cinestudio_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest {
///     messages: vec![
///         Message::system("You are a master storyteller."),
///         Message::user("A heist on a generation ship."),
///     ],
///     max_tokens: Some(2048),
///     temperature: Some(0.8),
///     model: None,
/// };
///
/// assert_eq!(request.messages.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use (client default when `None`)
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new builder for GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use cinestudio_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("INT. SPACESHIP COCKPIT - NIGHT".to_string())],
/// };
///
/// assert_eq!(response.outputs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text of all text outputs.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(Output::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}

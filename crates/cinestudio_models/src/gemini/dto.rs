//! Gemini `generateContent` data transfer objects.
//!
//! Field names follow the REST API's camelCase wire shape.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single part of a content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text payload
    pub text: String,
}

impl GeminiPart {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A content block with a role and its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"; absent on system instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered message parts
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Creates a user content block with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::text(text)],
        }
    }

    /// Creates a model content block with a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![GeminiPart::text(text)],
        }
    }

    /// Creates a role-less content block, as used for system instructions.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![GeminiPart::text(text)],
        }
    }
}

/// Generation parameters for a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Response MIME type; "application/json" turns on structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Schema the structured output must conform to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GeminiGenerationConfig {
    /// Creates a new builder for `GeminiGenerationConfig`.
    pub fn builder() -> GeminiGenerationConfigBuilder {
        GeminiGenerationConfigBuilder::default()
    }
}

/// A `generateContent` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateRequest {
    /// System instruction, sent outside the conversation turns
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    /// Conversation turns
    contents: Vec<GeminiContent>,
    /// Generation parameters
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiGenerateRequest {
    /// Creates a new builder for `GeminiGenerateRequest`.
    pub fn builder() -> GeminiGenerateRequestBuilder {
        GeminiGenerateRequestBuilder::default()
    }

    /// Switches this request into structured-output mode with the given schema.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        let mut config = self.generation_config.take().unwrap_or_default();
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self.generation_config = Some(config);
        self
    }
}

/// One candidate in a `generateContent` response.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content; absent when generation was cut off before any output
    #[serde(default)]
    content: Option<GeminiContent>,
    /// Why generation stopped, e.g. "STOP", "MAX_TOKENS", "SAFETY"
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Prompt-level feedback, present when the prompt itself was rejected.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    /// Why the prompt was blocked, e.g. "SAFETY"
    #[serde(default)]
    block_reason: Option<String>,
}

/// A `generateContent` response body.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateResponse {
    /// Generated candidates, usually exactly one
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    /// Present only when the prompt was rejected outright
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

impl GeminiGenerateResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        )
    }

    /// The block reason, whether prompt-level or candidate-level.
    pub fn block_reason(&self) -> Option<&str> {
        if let Some(feedback) = &self.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Some(reason);
            }
        }
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|reason| *reason == "SAFETY")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_camel_case() {
        let request = GeminiGenerateRequest::builder()
            .system_instruction(Some(GeminiContent::system("You are a storyteller.")))
            .contents(vec![GeminiContent::user("A ghost ship.")])
            .generation_config(Some(
                GeminiGenerationConfig::builder()
                    .temperature(0.8f32)
                    .max_output_tokens(2048u32)
                    .build()
                    .unwrap(),
            ))
            .build()
            .unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "You are a storyteller."
        );
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        // Unset fields are omitted, not serialized as null.
        assert!(value["generationConfig"]
            .as_object()
            .unwrap()
            .get("responseMimeType")
            .is_none());
    }

    #[test]
    fn json_schema_mode_sets_mime_type() {
        let request = GeminiGenerateRequest::builder()
            .contents(vec![GeminiContent::user("Break this down.")])
            .build()
            .unwrap()
            .with_json_schema(json!({"type": "array"}));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "array");
    }

    #[test]
    fn response_text_joins_parts() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Once upon "}, {"text": "a time."}]
                },
                "finishReason": "STOP"
            }]
        });
        let response: GeminiGenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.first_text().unwrap(), "Once upon a time.");
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn prompt_block_reason_surfaces() {
        let raw = json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        });
        let response: GeminiGenerateResponse = serde_json::from_value(raw).unwrap();
        assert!(response.first_text().is_none());
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn safety_finish_reason_counts_as_blocked() {
        let raw = json!({
            "candidates": [{"finishReason": "SAFETY"}]
        });
        let response: GeminiGenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }
}

//! Client for the Gemini and Imagen REST endpoints.

use crate::config::StudioConfig;
use crate::gemini::{
    GeminiContent, GeminiGenerateRequest, GeminiGenerateResponse, GeminiGenerationConfig,
    ImagenRequest, ImagenResponse,
};
use async_trait::async_trait;
use base64::Engine as _;
use cinestudio_core::{GenerateRequest, GenerateResponse, Output, Role};
use cinestudio_error::{GeminiError, GeminiErrorKind, ParseError, ParseErrorKind, StudioResult};
use cinestudio_interface::{AspectRatio, ImageData, ImageGeneration, JsonMode, StudioDriver};
use reqwest::Client;
use std::env;
use tracing::{debug, error, instrument};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini API client.
///
/// One client serves both modalities: `generateContent` on the configured
/// text model and `predict` on the configured Imagen model. Each call is a
/// single request/response exchange with no retry.
///
/// # Example
///
/// ```no_run
/// use cinestudio_models::GeminiClient;
/// use cinestudio_core::{GenerateRequest, Message};
/// use cinestudio_interface::StudioDriver;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new()?;
/// let request = GenerateRequest {
///     messages: vec![Message::user("A lighthouse keeper finds a door.")],
///     ..Default::default()
/// };
/// let response = client.generate(&request).await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    image_model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client with default configuration.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when the variable is unset.
    pub fn new() -> StudioResult<Self> {
        Self::from_config(&StudioConfig::default())
    }

    /// Creates a client from loaded configuration.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    pub fn from_config(config: &StudioConfig) -> StudioResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Ok(Self::with_api_key(api_key, config))
    }

    /// Creates a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: &StudioConfig) -> Self {
        debug!(model = %config.models.text, image_model = %config.models.image,
            "Creating new Gemini client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: config.models.text.clone(),
            image_model: config.models.image.clone(),
            temperature: config.generation.temperature,
            max_output_tokens: config.generation.max_output_tokens,
        }
    }

    /// Sends a `generateContent` request to the given model.
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GeminiGenerateRequest,
    ) -> StudioResult<GeminiGenerateResponse> {
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, model);
        debug!(model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                GeminiError::new(GeminiErrorKind::ApiRequest(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: body,
            })
            .into());
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Failed to decode response: {}",
                e
            )))
            .into()
        })
    }

    /// Sends an Imagen `predict` request.
    #[instrument(skip(self, request))]
    pub async fn predict(&self, request: &ImagenRequest) -> StudioResult<ImagenResponse> {
        let url = format!("{}/models/{}:predict", GEMINI_API_BASE, self.image_model);
        debug!(model = %self.image_model, "Sending predict request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Imagen API");
                GeminiError::new(GeminiErrorKind::ApiRequest(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Imagen API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: body,
            })
            .into());
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Imagen response");
            GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Failed to decode response: {}",
                e
            )))
            .into()
        })
    }

    /// Converts a generic request to the Gemini wire shape.
    ///
    /// System messages fold into the request's system instruction; user and
    /// model messages become conversation turns in order.
    fn convert_request(&self, request: &GenerateRequest) -> StudioResult<GeminiGenerateRequest> {
        let mut system_texts = Vec::new();
        let mut contents = Vec::new();

        for message in &request.messages {
            let text: String = message
                .content
                .iter()
                .filter_map(|input| input.as_text())
                .collect::<Vec<_>>()
                .join("\n");
            match message.role {
                Role::System => system_texts.push(text),
                Role::User => contents.push(GeminiContent::user(text)),
                Role::Model => contents.push(GeminiContent::model(text)),
            }
        }

        let system_instruction = if system_texts.is_empty() {
            None
        } else {
            Some(GeminiContent::system(system_texts.join("\n\n")))
        };

        let generation_config = GeminiGenerationConfig {
            temperature: Some(request.temperature.unwrap_or(self.temperature)),
            max_output_tokens: Some(request.max_tokens.unwrap_or(self.max_output_tokens)),
            response_mime_type: None,
            response_schema: None,
        };

        GeminiGenerateRequest::builder()
            .system_instruction(system_instruction)
            .contents(contents)
            .generation_config(Some(generation_config))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::Builder(e.to_string())).into())
    }

    /// Model to use for a request, honoring a per-request override.
    fn resolve_model<'a>(&'a self, request: &'a GenerateRequest) -> &'a str {
        request.model.as_deref().unwrap_or(&self.model)
    }

    /// Extracts the response text, surfacing safety blocks and empty output.
    fn extract_text(response: &GeminiGenerateResponse) -> StudioResult<String> {
        if let Some(reason) = response.block_reason() {
            return Err(GeminiError::new(GeminiErrorKind::SafetyBlocked(format!(
                "Blocked with reason {}",
                reason
            )))
            .into());
        }
        response.first_text().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::EmptyResponse(
                "No candidates with text parts".to_string(),
            ))
            .into()
        })
    }
}

#[async_trait]
impl StudioDriver for GeminiClient {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> StudioResult<GenerateResponse> {
        let wire_request = self.convert_request(req)?;
        let response = self
            .generate_content(self.resolve_model(req), &wire_request)
            .await?;
        let text = Self::extract_text(&response)?;
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl JsonMode for GeminiClient {
    #[instrument(skip(self, req, schema))]
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> StudioResult<serde_json::Value> {
        let wire_request = self.convert_request(req)?.with_json_schema(schema.clone());
        let response = self
            .generate_content(self.resolve_model(req), &wire_request)
            .await?;
        let text = Self::extract_text(&response)?;

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Structured output was not valid JSON");
            ParseError::new(ParseErrorKind::InvalidJson(e.to_string())).into()
        })
    }
}

#[async_trait]
impl ImageGeneration for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> StudioResult<ImageData> {
        let request = ImagenRequest::single(prompt, aspect_ratio.to_string());
        let response = self.predict(&request).await?;

        let prediction = response.predictions().first().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::EmptyResponse(
                "No image predictions returned".to_string(),
            ))
        })?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(prediction.bytes_base64_encoded())
            .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;

        Ok(ImageData {
            mime: prediction
                .mime_type()
                .clone()
                .unwrap_or_else(|| "image/png".to_string()),
            data,
        })
    }

    fn image_model_name(&self) -> &str {
        &self.image_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinestudio_core::Message;
    use serde_json::json;

    fn test_client() -> GeminiClient {
        GeminiClient::with_api_key("test-key", &StudioConfig::default())
    }

    #[test]
    fn system_messages_fold_into_system_instruction() {
        let client = test_client();
        let request = GenerateRequest {
            messages: vec![
                Message::system("You are a storyteller."),
                Message::user("A ghost ship."),
            ],
            ..Default::default()
        };

        let wire = client.convert_request(&request).unwrap();
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "You are a storyteller."
        );
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
        assert_eq!(value["contents"][0]["role"], "user");
    }

    #[test]
    fn request_overrides_beat_client_defaults() {
        let client = test_client();
        let request = GenerateRequest {
            messages: vec![Message::user("Hi")],
            temperature: Some(0.25),
            max_tokens: Some(128),
            model: Some("gemini-2.5-pro".to_string()),
        };

        let wire = client.convert_request(&request).unwrap();
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["generationConfig"]["temperature"], 0.25);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 128);
        assert_eq!(client.resolve_model(&request), "gemini-2.5-pro");

        let default_request = GenerateRequest::default();
        assert_eq!(client.resolve_model(&default_request), "gemini-2.5-flash");
    }

    #[test]
    fn blocked_response_is_a_safety_error() {
        let response: GeminiGenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        let err = GeminiClient::extract_text(&response).unwrap_err();
        assert!(format!("{}", err).contains("safety"));
    }

    #[test]
    fn empty_response_is_an_error() {
        let response: GeminiGenerateResponse = serde_json::from_value(json!({})).unwrap();
        let err = GeminiClient::extract_text(&response).unwrap_err();
        assert!(format!("{}", err).contains("empty response"));
    }
}

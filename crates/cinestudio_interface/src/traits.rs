//! Trait definitions for AI backends and their capabilities.

use crate::{AspectRatio, ImageData};
use async_trait::async_trait;
use cinestudio_core::{GenerateRequest, GenerateResponse};
use cinestudio_error::StudioResult;

/// Core trait that all AI backends must implement.
///
/// This provides the minimal interface for text generation. Additional
/// capabilities are exposed through optional traits.
#[async_trait]
pub trait StudioDriver: Send + Sync {
    /// Generate model output for a request.
    ///
    /// A single request/response exchange; implementations do not retry.
    async fn generate(&self, req: &GenerateRequest) -> StudioResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// Trait for backends that support structured JSON output.
#[async_trait]
pub trait JsonMode: StudioDriver {
    /// Generate output conforming to a JSON schema.
    ///
    /// The returned value has already been parsed from the response text;
    /// a response that is not valid JSON surfaces as a parse error.
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> StudioResult<serde_json::Value>;
}

/// Trait for backends that can generate images from a text prompt.
#[async_trait]
pub trait ImageGeneration: StudioDriver {
    /// Generate a single image from a prompt.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> StudioResult<ImageData>;

    /// Image model identifier.
    fn image_model_name(&self) -> &str;
}

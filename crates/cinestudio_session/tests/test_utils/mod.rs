//! Scripted mock driver for orchestrator tests.

use async_trait::async_trait;
use cinestudio_core::{GenerateRequest, GenerateResponse, Output};
use cinestudio_error::{GeminiError, GeminiErrorKind, StudioResult};
use cinestudio_interface::{AspectRatio, ImageData, ImageGeneration, JsonMode, StudioDriver};
use std::collections::VecDeque;
use std::sync::Mutex;

type Scripted<T> = Mutex<VecDeque<Result<T, GeminiErrorKind>>>;

/// Driver that replays scripted responses instead of calling a backend.
///
/// Each modality has its own queue; running a queue dry is a test bug and
/// surfaces as an `EmptyResponse` error.
#[derive(Debug, Default)]
pub struct MockDriver {
    texts: Scripted<String>,
    jsons: Scripted<serde_json::Value>,
    images: Scripted<()>,
    /// Full prompts received by `generate_image`, in call order.
    pub image_prompts: Mutex<Vec<String>>,
    /// Aspect ratios received by `generate_image`, in call order.
    pub image_ratios: Mutex<Vec<AspectRatio>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: &str) {
        self.texts.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_text_error(&self, kind: GeminiErrorKind) {
        self.texts.lock().unwrap().push_back(Err(kind));
    }

    pub fn push_json(&self, value: serde_json::Value) {
        self.jsons.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_json_error(&self, kind: GeminiErrorKind) {
        self.jsons.lock().unwrap().push_back(Err(kind));
    }

    pub fn push_image(&self) {
        self.images.lock().unwrap().push_back(Ok(()));
    }

    pub fn push_image_error(&self, kind: GeminiErrorKind) {
        self.images.lock().unwrap().push_back(Err(kind));
    }

    pub fn image_call_count(&self) -> usize {
        self.image_prompts.lock().unwrap().len()
    }

    fn pop<T>(queue: &Scripted<T>) -> StudioResult<T> {
        match queue.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(kind)) => Err(GeminiError::new(kind).into()),
            None => Err(GeminiError::new(GeminiErrorKind::EmptyResponse(
                "mock queue exhausted".to_string(),
            ))
            .into()),
        }
    }
}

#[async_trait]
impl StudioDriver for MockDriver {
    async fn generate(&self, _req: &GenerateRequest) -> StudioResult<GenerateResponse> {
        let text = Self::pop(&self.texts)?;
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl JsonMode for MockDriver {
    async fn generate_json(
        &self,
        _req: &GenerateRequest,
        _schema: &serde_json::Value,
    ) -> StudioResult<serde_json::Value> {
        Self::pop(&self.jsons)
    }
}

#[async_trait]
impl ImageGeneration for MockDriver {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> StudioResult<ImageData> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        self.image_ratios.lock().unwrap().push(aspect_ratio);
        Self::pop(&self.images)?;
        Ok(ImageData {
            mime: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4e, 0x47],
        })
    }

    fn image_model_name(&self) -> &str {
        "mock-image"
    }
}

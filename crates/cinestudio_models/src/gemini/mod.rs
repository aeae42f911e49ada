//! Google Gemini API implementation.
//!
//! Wire types and a client for two REST endpoints:
//! - `models/{model}:generateContent` for text and structured JSON output
//! - `models/{model}:predict` for Imagen image generation

mod client;
mod dto;
mod imagen;

pub use client::GeminiClient;
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiGenerateRequest, GeminiGenerateResponse,
    GeminiGenerationConfig, GeminiPart, GeminiPromptFeedback,
};
pub use imagen::{ImagenPrediction, ImagenRequest, ImagenResponse};

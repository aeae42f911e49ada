//! Gemini API client for Cinestudio.
//!
//! This crate provides the concrete AI backend behind the
//! [`cinestudio_interface`] driver traits:
//!
//! - [`GeminiClient`] - text generation via `generateContent`, structured
//!   JSON output via response schemas, and image generation via the Imagen
//!   `predict` endpoint
//! - [`StudioConfig`] - layered TOML/environment configuration for model
//!   selection and generation defaults
//!
//! The client performs a single request per call and does not retry;
//! failures surface immediately so the caller can classify and report them.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gemini;

pub use config::{GenerationConfig, LibraryConfig, ModelConfig, StudioConfig};
pub use gemini::{
    GeminiCandidate, GeminiClient, GeminiContent, GeminiGenerateRequest, GeminiGenerateResponse,
    GeminiGenerationConfig, GeminiPart, GeminiPromptFeedback, ImagenPrediction, ImagenRequest,
    ImagenResponse,
};

//! Cinestudio - AI-assisted cinematic story development.
//!
//! Cinestudio turns a story concept into production-ready creative
//! material through the Gemini API: styled storylines, structured scene
//! breakdowns, character profiles with portraits, cinematic images with
//! character-tag substitution, and four-facet mood boards. Generated work
//! is kept in a durable local library.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cinestudio::{GeminiClient, Library, FileStore, Studio, StorylineStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new()?;
//!     let library = Library::new(FileStore::new("/tmp/studio")?);
//!     let mut studio = Studio::new(client, library);
//!
//!     let storyline = studio
//!         .generate_storyline("a heist on a generation ship", StorylineStyle::Drama)
//!         .await?;
//!     println!("{storyline}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Cinestudio is organized as a workspace with focused crates:
//!
//! - `cinestudio_core` - Conversation and artifact data types
//! - `cinestudio_interface` - Driver traits for AI backends
//! - `cinestudio_error` - Error types and the user-facing classifier
//! - `cinestudio_prompt` - System instructions, styles, tag substitution
//! - `cinestudio_models` - Gemini client and configuration
//! - `cinestudio_library` - Durable key-value persistence of saved work
//! - `cinestudio_session` - Session state and generation orchestration
//!
//! This crate (`cinestudio`) re-exports everything for convenience and
//! ships the `cinestudio` CLI binary.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use cinestudio_core::{
    CharacterProfile, GenerateRequest, GenerateResponse, GeneratedImage, Input, Message,
    MoodBoardCategory, MoodBoardContent, MoodBoardImage, Output, Role, SavedImageSet, SavedItem,
    SavedMoodBoard, SavedProfile, SavedStoryline, Scene,
};
pub use cinestudio_error::{
    ErrorCategory, FriendlyError, StudioError, StudioErrorKind, StudioResult,
};
pub use cinestudio_interface::{
    AspectRatio, ImageData, ImageGeneration, JsonMode, StudioDriver,
};
pub use cinestudio_library::{
    FileStore, KeyValueStore, Library, MemoryStore, Namespace, SortDirection, SortKey,
};
pub use cinestudio_models::{GeminiClient, StudioConfig};
pub use cinestudio_prompt::{
    extract_appearance, image_prompt, storyline_instruction, substitute_character_tags,
    StorylineStyle,
};
pub use cinestudio_session::{
    storyline_excerpt, PendingAction, Section, SessionEvent, SessionSnapshot, SessionState, Studio,
};

//! Core data types for the Cinestudio creative studio library.
//!
//! This crate provides the foundation data types used across all Cinestudio
//! interfaces: the conversation/request types spoken at the AI service
//! boundary, and the generated artifacts the studio produces and saves.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod input;
mod message;
mod output;
mod request;
mod role;
mod saved;

pub use artifact::{CharacterProfile, GeneratedImage, MoodBoardCategory, MoodBoardImage, Scene};
pub use input::Input;
pub use message::Message;
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use saved::{
    MoodBoardContent, SavedImageSet, SavedItem, SavedMoodBoard, SavedProfile, SavedStoryline,
};

//! Generated artifact types.
//!
//! These are the transient products of AI generation. They live in session
//! state until the user names and saves them, at which point they become
//! [`crate::SavedItem`] payloads.

use serde::{Deserialize, Serialize};

/// A single generated image.
///
/// Immutable once created; the `prompt` field records the user's original
/// prompt, not the substituted one sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Unique identifier
    pub id: String,
    /// Image location, a `data:` URL for self-contained persistence
    pub url: String,
    /// The prompt that produced this image
    pub prompt: String,
}

impl GeneratedImage {
    /// Create a new image artifact with a fresh id.
    pub fn new(url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            prompt: prompt.into(),
        }
    }
}

/// One scene from a scene breakdown.
///
/// Scenes are produced as a batch from a single structured-output call and
/// never partially updated. Field names follow the wire shape the model is
/// instructed to emit.
///
/// # Examples
///
/// ```
/// use cinestudio_core::Scene;
///
/// let json = r#"{
///     "sceneNumber": 1,
///     "location": "INT. SPACESHIP COCKPIT - NIGHT",
///     "characters": ["Pilot", "Creature"],
///     "summary": "The pilot hears something in the vents."
/// }"#;
/// let scene: Scene = serde_json::from_str(json).unwrap();
/// assert_eq!(scene.scene_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scene {
    /// Sequential integer starting from 1
    pub scene_number: u32,
    /// Screenplay location heading, e.g. "EXT. ALIEN PLANET - DAY"
    pub location: String,
    /// Characters present, or descriptive placeholders
    pub characters: Vec<String>,
    /// One or two sentence summary of the scene
    pub summary: String,
}

/// A generated character profile with its portrait.
///
/// An atomic unit: the text and image are generated together and saved
/// together; a failure in either discards both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Markdown-formatted profile with Appearance/Backstory/Motivations/Fears sections
    pub text: String,
    /// Portrait image location (`data:` URL)
    pub image_url: String,
}

/// The four visual facets of a mood board, in fixed order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum MoodBoardCategory {
    /// The most important or atmospheric setting
    #[display("Key Location")]
    KeyLocation,
    /// A key character's mood and appearance within a scene
    #[display("Character Focus")]
    CharacterFocus,
    /// Color palette, lighting, and overall mood
    #[display("Abstract Tone")]
    AbstractTone,
    /// A crucial object or symbolic moment
    #[display("Symbolic Object/Action")]
    SymbolicObject,
}

impl MoodBoardCategory {
    /// All categories in prompt order.
    pub const ALL: [MoodBoardCategory; 4] = [
        MoodBoardCategory::KeyLocation,
        MoodBoardCategory::CharacterFocus,
        MoodBoardCategory::AbstractTone,
        MoodBoardCategory::SymbolicObject,
    ];
}

/// A single image within a mood board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBoardImage {
    /// Unique identifier
    pub id: String,
    /// Image location (`data:` URL)
    pub url: String,
    /// The descriptive prompt for this facet
    pub prompt: String,
}

impl MoodBoardImage {
    /// Create a new mood-board image with a fresh id.
    pub fn new(url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            prompt: prompt.into(),
        }
    }
}

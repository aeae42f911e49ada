//! Saved library item types.

use crate::{CharacterProfile, GeneratedImage, MoodBoardImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped library entry wrapping a generated artifact.
///
/// `created_at` records save time, not content-generation time. Ids are
/// unique within a collection.
///
/// # Examples
///
/// ```
/// use cinestudio_core::SavedStoryline;
///
/// let item = SavedStoryline::new("Opening act", "FADE IN...".to_string());
/// assert_eq!(item.name, "Opening act");
/// assert!(!item.id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem<T> {
    /// Unique identifier within the collection
    pub id: String,
    /// User-provided name
    pub name: String,
    /// Save timestamp (UTC)
    pub created_at: DateTime<Utc>,
    /// The saved artifact
    pub content: T,
}

impl<T> SavedItem<T> {
    /// Wrap content as a named library entry, stamped now.
    pub fn new(name: impl Into<String>, content: T) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
            content,
        }
    }
}

/// A saved storyline: plain narrative text.
pub type SavedStoryline = SavedItem<String>;

/// A saved set of generated images.
pub type SavedImageSet = SavedItem<Vec<GeneratedImage>>;

/// A saved character profile.
pub type SavedProfile = SavedItem<CharacterProfile>;

/// A saved mood board.
pub type SavedMoodBoard = SavedItem<MoodBoardContent>;

/// Mood board payload: the four images plus a storyline excerpt recording
/// where the board came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBoardContent {
    /// The four mood-board images, in category order
    pub images: Vec<MoodBoardImage>,
    /// Truncated excerpt of the source storyline
    pub source_storyline: String,
}

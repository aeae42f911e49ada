//! Session events and pending destructive actions.

use crate::state::Section;
use cinestudio_core::{CharacterProfile, GeneratedImage, MoodBoardContent, Scene};
use cinestudio_error::FriendlyError;
use cinestudio_library::Namespace;
use cinestudio_prompt::StorylineStyle;

/// A destructive action awaiting user confirmation.
///
/// Requested and committed as two separate events; the commit must name the
/// same action or it is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PendingAction {
    /// Delete one saved item
    #[display("delete {} from {}", id, namespace)]
    DeleteItem {
        /// Collection holding the item
        namespace: Namespace,
        /// Item identifier
        id: String,
    },
    /// Clear every saved collection
    #[display("clear all saved work")]
    ClearAll,
    /// Load a saved item over the corresponding working state
    #[display("load {} from {} over unsaved work", id, namespace)]
    LoadItem {
        /// Collection holding the item
        namespace: Namespace,
        /// Item identifier
        id: String,
    },
}

/// State transitions applied through [`crate::SessionState::apply`].
///
/// Completion events carry the token of the request that produced them;
/// stale tokens are discarded on apply.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A generation request started for a section.
    ///
    /// Issues a fresh token (readable via [`crate::SessionState::latest_token`]),
    /// marks the section busy, and clears its previous error.
    Started {
        /// Section the request belongs to
        section: Section,
    },
    /// A storyline generation completed.
    StorylineReady {
        /// Token of the originating request
        token: u64,
        /// Generated narrative text
        text: String,
        /// Style the storyline was generated with
        style: StorylineStyle,
    },
    /// A scene breakdown completed.
    ScenesReady {
        /// Token of the originating request
        token: u64,
        /// Validated scenes, in order
        scenes: Vec<Scene>,
    },
    /// A character profile (text and portrait together) completed.
    CharacterReady {
        /// Token of the originating request
        token: u64,
        /// The complete profile
        profile: CharacterProfile,
    },
    /// A single image generation completed.
    ImageReady {
        /// Token of the originating request
        token: u64,
        /// The generated image, carrying the user's original prompt
        image: GeneratedImage,
    },
    /// A mood board (all four images) completed.
    MoodBoardReady {
        /// Token of the originating request
        token: u64,
        /// The four images plus the source-storyline excerpt
        board: MoodBoardContent,
    },
    /// A generation request failed after reaching the gateway.
    Failed {
        /// Section the request belongs to
        section: Section,
        /// Token of the originating request
        token: u64,
        /// Classified, user-facing error
        error: FriendlyError,
    },
    /// Input validation rejected a request before any gateway call.
    InputRejected {
        /// Section the input belongs to
        section: Section,
        /// Inline validation error
        error: FriendlyError,
    },
    /// A saved storyline was adopted as the working storyline.
    StorylineAdopted {
        /// The loaded narrative text
        text: String,
    },
    /// A saved image set was adopted as the working image list.
    ImagesAdopted {
        /// The loaded images, most recent first
        images: Vec<GeneratedImage>,
    },
    /// A saved character profile was adopted as the working profile.
    ProfileAdopted {
        /// The loaded profile
        profile: CharacterProfile,
    },
    /// A saved mood board was adopted as the working mood board.
    MoodBoardAdopted {
        /// The loaded board
        board: MoodBoardContent,
    },
    /// A destructive action was requested and now awaits confirmation.
    ConfirmationRequested(PendingAction),
    /// The pending confirmation was committed (effects run elsewhere).
    ConfirmationCommitted,
    /// The pending confirmation was abandoned.
    ConfirmationCancelled,
}

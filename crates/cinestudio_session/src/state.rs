//! Explicit session state and its reducer.

use crate::event::{PendingAction, SessionEvent};
use cinestudio_core::{CharacterProfile, GeneratedImage, MoodBoardContent, Scene};
use cinestudio_error::FriendlyError;
use cinestudio_prompt::StorylineStyle;
use std::collections::HashMap;
use tracing::debug;

/// Maximum images kept in the working session, most recent first.
pub const SESSION_IMAGE_CAP: usize = 5;

/// The independently-tracked generation sections.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum Section {
    /// Storyline generation
    #[display("storyline")]
    Storyline,
    /// Scene breakdown
    #[display("scene breakdown")]
    Breakdown,
    /// Character profile
    #[display("character profile")]
    Character,
    /// Single-image generation
    #[display("image")]
    Image,
    /// Mood board
    #[display("mood board")]
    MoodBoard,
}

/// Per-section request bookkeeping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionStatus {
    /// A request is in flight
    pub busy: bool,
    /// Last failure for this section, cleared when a new request starts
    pub error: Option<FriendlyError>,
    /// Token of the most recently started request
    pub latest_token: u64,
}

/// The complete working state of a studio session.
///
/// Content fields hold the current (possibly unsaved) artifacts; the
/// per-section status tracks in-flight requests and displayed errors.
/// All mutation goes through [`SessionState::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Current working storyline text
    pub storyline: Option<String>,
    /// Style the current storyline was generated with
    pub style: StorylineStyle,
    /// Scene breakdown of the current storyline
    pub scenes: Vec<Scene>,
    /// Current character profile
    pub character: Option<CharacterProfile>,
    /// Generated images, most recent first, capped at [`SESSION_IMAGE_CAP`]
    pub images: Vec<GeneratedImage>,
    /// Current mood board
    pub mood_board: Option<MoodBoardContent>,
    pub(crate) status: HashMap<Section, SectionStatus>,
    pub(crate) pending: Option<PendingAction>,
}

impl SessionState {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookkeeping for a section.
    pub fn status(&self, section: Section) -> SectionStatus {
        self.status.get(&section).cloned().unwrap_or_default()
    }

    /// Whether a request is in flight for a section.
    pub fn busy(&self, section: Section) -> bool {
        self.status.get(&section).map(|s| s.busy).unwrap_or(false)
    }

    /// The displayed error for a section, if any.
    pub fn error(&self, section: Section) -> Option<&FriendlyError> {
        self.status.get(&section).and_then(|s| s.error.as_ref())
    }

    /// Token of the most recently started request for a section.
    ///
    /// Completions must carry this token to be accepted.
    pub fn latest_token(&self, section: Section) -> u64 {
        self.status
            .get(&section)
            .map(|s| s.latest_token)
            .unwrap_or(0)
    }

    /// The destructive action awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Applies one event, advancing the session.
    ///
    /// Completion events whose token is not the latest for their section are
    /// discarded without touching content.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started { section } => {
                let status = self.status.entry(section).or_default();
                status.latest_token += 1;
                status.busy = true;
                status.error = None;
            }
            SessionEvent::StorylineReady { token, text, style } => {
                if self.accept(Section::Storyline, token) {
                    self.adopt_storyline(text);
                    self.style = style;
                }
            }
            SessionEvent::ScenesReady { token, scenes } => {
                if self.accept(Section::Breakdown, token) {
                    self.scenes = scenes;
                }
            }
            SessionEvent::CharacterReady { token, profile } => {
                if self.accept(Section::Character, token) {
                    self.character = Some(profile);
                }
            }
            SessionEvent::ImageReady { token, image } => {
                if self.accept(Section::Image, token) {
                    self.images.insert(0, image);
                    self.images.truncate(SESSION_IMAGE_CAP);
                }
            }
            SessionEvent::MoodBoardReady { token, board } => {
                if self.accept(Section::MoodBoard, token) {
                    self.mood_board = Some(board);
                }
            }
            SessionEvent::Failed {
                section,
                token,
                error,
            } => {
                if self.accept(section, token) {
                    self.status.entry(section).or_default().error = Some(error);
                }
            }
            SessionEvent::InputRejected { section, error } => {
                let status = self.status.entry(section).or_default();
                status.busy = false;
                status.error = Some(error);
            }
            SessionEvent::StorylineAdopted { text } => {
                self.adopt_storyline(text);
            }
            SessionEvent::ImagesAdopted { mut images } => {
                images.truncate(SESSION_IMAGE_CAP);
                self.images = images;
            }
            SessionEvent::ProfileAdopted { profile } => {
                self.character = Some(profile);
            }
            SessionEvent::MoodBoardAdopted { board } => {
                self.mood_board = Some(board);
            }
            SessionEvent::ConfirmationRequested(action) => {
                self.pending = Some(action);
            }
            SessionEvent::ConfirmationCommitted | SessionEvent::ConfirmationCancelled => {
                self.pending = None;
            }
        }
    }

    /// Accepts a completion if its token is current; clears the busy flag.
    fn accept(&mut self, section: Section, token: u64) -> bool {
        let status = self.status.entry(section).or_default();
        if token != status.latest_token {
            debug!(
                %section,
                token,
                latest = status.latest_token,
                "Discarding stale completion"
            );
            return false;
        }
        status.busy = false;
        true
    }

    /// A new storyline invalidates everything derived from the old one.
    fn adopt_storyline(&mut self, text: String) {
        self.storyline = Some(text);
        self.scenes.clear();
        self.mood_board = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinestudio_error::ErrorCategory;

    fn image(prompt: &str) -> GeneratedImage {
        GeneratedImage::new(format!("data:{prompt}"), prompt)
    }

    #[test]
    fn started_issues_monotonic_tokens_and_clears_errors() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::InputRejected {
            section: Section::Storyline,
            error: FriendlyError::input_required("Enter a concept."),
        });
        assert!(state.error(Section::Storyline).is_some());

        state.apply(SessionEvent::Started {
            section: Section::Storyline,
        });
        assert_eq!(state.latest_token(Section::Storyline), 1);
        assert!(state.busy(Section::Storyline));
        assert!(state.error(Section::Storyline).is_none());

        state.apply(SessionEvent::Started {
            section: Section::Storyline,
        });
        assert_eq!(state.latest_token(Section::Storyline), 2);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Started {
            section: Section::Storyline,
        });
        let first = state.latest_token(Section::Storyline);

        // A second request supersedes the first.
        state.apply(SessionEvent::Started {
            section: Section::Storyline,
        });
        let second = state.latest_token(Section::Storyline);

        state.apply(SessionEvent::StorylineReady {
            token: first,
            text: "stale".to_string(),
            style: StorylineStyle::Cinematic,
        });
        assert!(state.storyline.is_none());
        assert!(state.busy(Section::Storyline));

        state.apply(SessionEvent::StorylineReady {
            token: second,
            text: "fresh".to_string(),
            style: StorylineStyle::Drama,
        });
        assert_eq!(state.storyline.as_deref(), Some("fresh"));
        assert!(!state.busy(Section::Storyline));
    }

    #[test]
    fn stale_failure_does_not_surface() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Started {
            section: Section::Image,
        });
        let first = state.latest_token(Section::Image);
        state.apply(SessionEvent::Started {
            section: Section::Image,
        });

        state.apply(SessionEvent::Failed {
            section: Section::Image,
            token: first,
            error: FriendlyError::classify("HTTP 500 error"),
        });
        assert!(state.error(Section::Image).is_none());
    }

    #[test]
    fn new_storyline_clears_dependent_sections() {
        let mut state = SessionState::new();
        state.scenes = vec![Scene {
            scene_number: 1,
            location: "INT. LAB - NIGHT".to_string(),
            characters: vec!["Researcher".to_string()],
            summary: "Something stirs.".to_string(),
        }];
        state.mood_board = Some(MoodBoardContent {
            images: Vec::new(),
            source_storyline: "old".to_string(),
        });

        state.apply(SessionEvent::Started {
            section: Section::Storyline,
        });
        state.apply(SessionEvent::StorylineReady {
            token: state.latest_token(Section::Storyline),
            text: "A new tale.".to_string(),
            style: StorylineStyle::Cinematic,
        });

        assert!(state.scenes.is_empty());
        assert!(state.mood_board.is_none());
        assert_eq!(state.storyline.as_deref(), Some("A new tale."));
    }

    #[test]
    fn image_list_caps_at_five_most_recent_first() {
        let mut state = SessionState::new();
        for n in 0..6 {
            state.apply(SessionEvent::Started {
                section: Section::Image,
            });
            state.apply(SessionEvent::ImageReady {
                token: state.latest_token(Section::Image),
                image: image(&format!("prompt {n}")),
            });
        }

        assert_eq!(state.images.len(), SESSION_IMAGE_CAP);
        assert_eq!(state.images[0].prompt, "prompt 5");
        assert_eq!(state.images[4].prompt, "prompt 1");
        // The oldest was evicted.
        assert!(state.images.iter().all(|i| i.prompt != "prompt 0"));
    }

    #[test]
    fn failure_surfaces_classified_error() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::Started {
            section: Section::Breakdown,
        });
        state.apply(SessionEvent::Failed {
            section: Section::Breakdown,
            token: state.latest_token(Section::Breakdown),
            error: FriendlyError::classify("HTTP 429 error: quota exceeded"),
        });

        let error = state.error(Section::Breakdown).unwrap();
        assert_eq!(error.category, ErrorCategory::RateLimited);
        assert!(!state.busy(Section::Breakdown));
    }

    #[test]
    fn confirmation_lifecycle() {
        let mut state = SessionState::new();
        assert!(state.pending().is_none());

        state.apply(SessionEvent::ConfirmationRequested(PendingAction::ClearAll));
        assert_eq!(state.pending(), Some(&PendingAction::ClearAll));

        state.apply(SessionEvent::ConfirmationCancelled);
        assert!(state.pending().is_none());
    }
}

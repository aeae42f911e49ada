//! Durable snapshot of the working session.
//!
//! Only content survives between invocations; in-flight bookkeeping
//! (busy flags, tokens, errors, pending confirmations) is deliberately
//! transient.

use crate::state::SessionState;
use cinestudio_core::{CharacterProfile, GeneratedImage, MoodBoardContent, Scene};
use cinestudio_error::{SessionError, SessionErrorKind, StudioResult};
use cinestudio_prompt::StorylineStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Serialized form of the session's content fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSnapshot {
    /// Current working storyline
    pub storyline: Option<String>,
    /// Style of the current storyline
    #[serde(default)]
    pub style: StorylineStyle,
    /// Scene breakdown
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Current character profile
    pub character: Option<CharacterProfile>,
    /// Session images, most recent first
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
    /// Current mood board
    pub mood_board: Option<MoodBoardContent>,
}

impl SessionSnapshot {
    /// Captures the content of a session.
    pub fn capture(state: &SessionState) -> Self {
        Self {
            storyline: state.storyline.clone(),
            style: state.style,
            scenes: state.scenes.clone(),
            character: state.character.clone(),
            images: state.images.clone(),
            mood_board: state.mood_board.clone(),
        }
    }

    /// Rebuilds a session from captured content.
    pub fn restore(self) -> SessionState {
        SessionState {
            storyline: self.storyline,
            style: self.style,
            scenes: self.scenes,
            character: self.character,
            images: self.images,
            mood_board: self.mood_board,
            ..SessionState::default()
        }
    }

    /// Writes the snapshot as JSON, atomically.
    pub fn persist_to(&self, path: impl AsRef<Path>) -> StudioResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)
            .map_err(|e| SessionError::new(SessionErrorKind::Snapshot(e.to_string())))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| SessionError::new(SessionErrorKind::Snapshot(e.to_string())))?;
        std::fs::rename(&tmp, path)
            .map_err(|e| SessionError::new(SessionErrorKind::Snapshot(e.to_string())))?;
        debug!(path = %path.display(), "Persisted session snapshot");
        Ok(())
    }

    /// Loads a snapshot, returning an empty one when the file is missing
    /// or unreadable.
    ///
    /// A corrupt snapshot is logged and discarded rather than blocking the
    /// session.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read session snapshot");
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding corrupt session snapshot");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_content_only() {
        let mut state = SessionState::new();
        state.storyline = Some("FADE IN.".to_string());
        state.style = StorylineStyle::Intense;
        state.images = vec![GeneratedImage::new("data:x", "a prompt")];
        // In-flight bookkeeping must not survive the round trip.
        state.apply(crate::SessionEvent::Started {
            section: crate::Section::Breakdown,
        });

        let restored = SessionSnapshot::capture(&state).restore();
        assert_eq!(restored.storyline.as_deref(), Some("FADE IN."));
        assert_eq!(restored.style, StorylineStyle::Intense);
        assert_eq!(restored.images.len(), 1);
        assert!(!restored.busy(crate::Section::Breakdown));
        assert_eq!(restored.latest_token(crate::Section::Breakdown), 0);
    }

    #[test]
    fn missing_snapshot_file_is_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SessionSnapshot::load_from(dir.path().join("absent.json"));
        assert_eq!(snapshot, SessionSnapshot::default());
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let snapshot = SessionSnapshot::load_from(&path);
        assert_eq!(snapshot, SessionSnapshot::default());
    }

    #[test]
    fn persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut state = SessionState::new();
        state.storyline = Some("A door opens.".to_string());
        let snapshot = SessionSnapshot::capture(&state);
        snapshot.persist_to(&path).unwrap();

        assert_eq!(SessionSnapshot::load_from(&path), snapshot);
    }
}

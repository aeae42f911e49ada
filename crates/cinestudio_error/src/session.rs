//! Session orchestration error types.

/// Specific error conditions for session operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// A required user input was empty
    #[display("Input required for {}", _0)]
    EmptyInput(String),
    /// An operation needs a generated storyline that does not exist yet
    #[display("No storyline available: generate or load one first")]
    MissingStoryline,
    /// An operation needs generated content that does not exist yet
    #[display("Nothing to save for {}", _0)]
    NothingToSave(String),
    /// A confirmation commit arrived without a matching pending request
    #[display("No pending confirmation for {}", _0)]
    NoPendingConfirmation(String),
    /// Failed to persist or restore the session snapshot
    #[display("Session snapshot error: {}", _0)]
    Snapshot(String),
}

/// Session error with location tracking.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::MissingStoryline);
/// assert!(format!("{}", err).contains("No storyline"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, LibraryError, ParseError, SessionError};

/// This is the foundation error enum for the Cinestudio workspace.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{StudioError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: StudioError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StudioErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Library persistence error
    #[from(LibraryError)]
    Library(LibraryError),
    /// Structured-response parse error
    #[from(ParseError)]
    Parse(ParseError),
    /// Session orchestration error
    #[from(SessionError)]
    Session(SessionError),
}

/// Cinestudio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{StudioResult, ConfigError};
///
/// fn might_fail() -> StudioResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cinestudio Error: {}", _0)]
pub struct StudioError(Box<StudioErrorKind>);

impl StudioError {
    /// Create a new error from a kind.
    pub fn new(kind: StudioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StudioErrorKind {
        &self.0
    }

    /// The failure description without the source-location suffix.
    ///
    /// Classification matches substrings against this text, so the file
    /// path and line number of the construction site must not appear in it.
    pub fn message(&self) -> String {
        match self.kind() {
            StudioErrorKind::Config(e) => e.message.clone(),
            StudioErrorKind::Gemini(e) => e.kind.to_string(),
            StudioErrorKind::Library(e) => e.kind.to_string(),
            StudioErrorKind::Parse(e) => e.kind.to_string(),
            StudioErrorKind::Session(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to StudioErrorKind
impl<T> From<T> for StudioError
where
    T: Into<StudioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cinestudio operations.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{StudioResult, ConfigError};
///
/// fn fetch_settings() -> StudioResult<String> {
///     Err(ConfigError::new("cinestudio.toml not found"))?
/// }
/// ```
pub type StudioResult<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeminiError, GeminiErrorKind};

    #[test]
    fn message_omits_the_construction_site() {
        let err: StudioError =
            GeminiError::new(GeminiErrorKind::EmptyResponse("no candidates".to_string())).into();
        assert!(err.to_string().contains(" at line "));
        assert!(!err.message().contains(" at line "));
        assert!(!err.message().contains(".rs"));
        assert!(err.message().contains("no candidates"));
    }
}

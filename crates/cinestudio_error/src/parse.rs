//! Structured-response parse error types.
//!
//! The AI service returns structured output as JSON text. These errors cover
//! the gap between "the request succeeded" and "the response has the shape
//! we asked for".

/// Kinds of structured-response parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// Response text was not valid JSON
    #[display("Response is not valid JSON: {}", _0)]
    InvalidJson(String),
    /// JSON parsed but did not match the expected record shape
    #[display("Response JSON does not match expected shape: {}", _0)]
    SchemaMismatch(String),
    /// A fixed-cardinality response had the wrong number of elements
    #[display("Expected {} elements, got {}", expected, actual)]
    WrongCount {
        /// Number of elements required
        expected: usize,
        /// Number of elements received
        actual: usize,
    },
}

/// Parse error with source location tracking.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::InvalidJson("trailing comma".to_string()));
/// assert!(format!("{}", err).contains("not valid JSON"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ParseError {
    /// Create a new parse error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Library persistence error types.

/// Kinds of library persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LibraryErrorKind {
    /// Failed to create the library directory
    #[display("Failed to create library directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a namespace document
    #[display("Failed to write namespace: {}", _0)]
    NamespaceWrite(String),
    /// Failed to read a namespace document
    #[display("Failed to read namespace: {}", _0)]
    NamespaceRead(String),
    /// A stored namespace document failed to deserialize
    #[display("Corrupt namespace '{}': {}", namespace, message)]
    CorruptNamespace {
        /// The namespace key that failed to parse
        namespace: String,
        /// Deserialization error message
        message: String,
    },
    /// No item with the requested id exists in the collection
    #[display("Item '{}' not found in {}", id, namespace)]
    ItemNotFound {
        /// Namespace key of the collection
        namespace: String,
        /// Requested item id
        id: String,
    },
    /// Save was requested without a usable name
    #[display("Save aborted: item name is empty")]
    EmptyName,
    /// Failed to serialize a collection for storage
    #[display("Failed to serialize collection: {}", _0)]
    Serialization(String),
}

/// Library error with location tracking.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{LibraryError, LibraryErrorKind};
///
/// let err = LibraryError::new(LibraryErrorKind::EmptyName);
/// assert!(format!("{}", err).contains("name is empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Library Error: {} at line {} in {}", kind, line, file)]
pub struct LibraryError {
    /// The kind of error that occurred
    pub kind: LibraryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LibraryError {
    /// Create a new library error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LibraryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

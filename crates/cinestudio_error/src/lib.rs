//! Error types for the Cinestudio library.
//!
//! This crate provides the foundation error types used throughout the
//! Cinestudio workspace, plus the user-facing error classifier.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use cinestudio_error::{StudioResult, ConfigError};
//!
//! fn load_settings() -> StudioResult<String> {
//!     Err(ConfigError::new("Missing data directory"))?
//! }
//!
//! match load_settings() {
//!     Ok(settings) => println!("Got: {}", settings),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod friendly;
mod gemini;
mod library;
mod parse;
mod session;

pub use config::ConfigError;
pub use error::{StudioError, StudioErrorKind, StudioResult};
pub use friendly::{ErrorCategory, FriendlyError};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use library::{LibraryError, LibraryErrorKind};
pub use parse::{ParseError, ParseErrorKind};
pub use session::{SessionError, SessionErrorKind};

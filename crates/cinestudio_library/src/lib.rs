//! Durable key-value library of saved Cinestudio artifacts.
//!
//! This crate provides the persistence boundary for the studio: a pluggable
//! [`KeyValueStore`] (get/set/remove over string keys) and the [`Library`]
//! built on top of it, holding four independent named collections plus the
//! onboarding flag.
//!
//! # Example
//!
//! ```
//! use cinestudio_library::{Library, MemoryStore, Namespace, SortDirection, SortKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = Library::new(MemoryStore::default());
//!
//! let saved = library
//!     .save(Namespace::Storylines, "Opening act", "FADE IN...".to_string())
//!     .await?;
//!
//! let items = library
//!     .list(Namespace::Storylines, "", SortKey::Name, SortDirection::Asc)
//!     .await;
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].id, saved.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod file_store;
mod library;
mod namespace;
mod store;

pub use cinestudio_error::{LibraryError, LibraryErrorKind};
pub use file_store::FileStore;
pub use library::{Library, SortDirection, SortKey};
pub use namespace::Namespace;
pub use store::{KeyValueStore, MemoryStore};

//! Driver traits for Cinestudio AI backends.
//!
//! The studio talks to the generative service through three narrow seams:
//! free-text generation, schema-constrained JSON generation, and image
//! generation. Backends implement whichever capabilities they support.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ImageGeneration, JsonMode, StudioDriver};
pub use types::{AspectRatio, ImageData};

//! Session state and generation orchestration.
//!
//! The session layer sits between the user surface and the AI gateway:
//!
//! - [`SessionState`] is an explicit state value mutated only through
//!   [`SessionState::apply`] with [`SessionEvent`]s, so every transition is
//!   inspectable and testable without a backend.
//! - [`Studio`] drives the generation flows: it validates input, builds
//!   prompts, calls the gateway, and folds results (or classified failures)
//!   back into the state. Save, load, delete, and clear delegate to the
//!   library, with destructive actions gated behind a two-step
//!   request/commit confirmation.
//!
//! Completions carry the request token they were issued with; a completion
//! whose token is no longer the latest for its section is discarded, so a
//! slow response can never overwrite a newer one.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod event;
mod schema;
mod snapshot;
mod state;
mod studio;

pub use event::{PendingAction, SessionEvent};
pub use schema::{mood_board_prompts_schema, scene_breakdown_schema};
pub use snapshot::SessionSnapshot;
pub use state::{Section, SectionStatus, SessionState, SESSION_IMAGE_CAP};
pub use studio::{storyline_excerpt, Studio, EXCERPT_LEN, ONBOARDING_HINT, SOURCE_EXCERPT_LEN};

//! Fixed namespace keys for the persistent store.

/// The four saved-item collections, each addressed by a fixed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Namespace {
    /// Saved storylines
    #[display("storylines")]
    Storylines,
    /// Saved image sets
    #[display("image sets")]
    ImageSets,
    /// Saved character profiles
    #[display("profiles")]
    Profiles,
    /// Saved mood boards
    #[display("mood boards")]
    MoodBoards,
}

impl Namespace {
    /// All collections, in clear-all order.
    pub const ALL: [Namespace; 4] = [
        Namespace::Storylines,
        Namespace::ImageSets,
        Namespace::Profiles,
        Namespace::MoodBoards,
    ];

    /// The fixed store key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Namespace::Storylines => "cinestudio_storylines",
            Namespace::ImageSets => "cinestudio_image_sets",
            Namespace::Profiles => "cinestudio_profiles",
            Namespace::MoodBoards => "cinestudio_mood_boards",
        }
    }
}

/// Store key for the onboarding-guidance flag.
pub(crate) const TUTORIAL_SEEN_KEY: &str = "cinestudio_tutorial_seen";

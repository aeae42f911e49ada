//! CLI command definitions.

use cinestudio_library::{Namespace, SortKey};
use clap::{Parser, Subcommand, ValueEnum};

/// Cinestudio - AI-assisted cinematic story development
#[derive(Parser, Debug)]
#[command(name = "cinestudio")]
#[command(about = "Generate storylines, scene breakdowns, characters, images, and mood boards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a storyline from a concept
    Storyline {
        /// The story concept
        concept: String,

        /// Storyline style (unknown keys fall back to cinematic)
        #[arg(long, default_value = "cinematic")]
        style: String,
    },

    /// Break the current storyline into cinematic scenes
    Scenes,

    /// Generate a four-image mood board for the current storyline
    Moodboard,

    /// Generate a character profile with portrait
    Character {
        /// The character concept
        concept: String,
    },

    /// Generate a cinematic image from a prompt
    ///
    /// `[CHARACTER: name]` tags are replaced with the appearance of the
    /// matching saved profile before generation.
    Image {
        /// The image prompt; omit with --from-storyline to seed from the
        /// current storyline
        prompt: Option<String>,

        /// Seed the prompt from an excerpt of the current storyline
        #[arg(long)]
        from_storyline: bool,
    },

    /// Save the current artifact of a collection under a name
    Save {
        /// Which current artifact to save
        collection: Collection,

        /// Name for the saved item
        name: String,
    },

    /// Saved-work library commands
    #[command(subcommand)]
    Library(LibraryCommands),
}

/// Library subcommands
#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// List saved items in a collection
    List {
        /// Collection to list
        collection: Collection,

        /// Case-insensitive name filter
        #[arg(long)]
        filter: Option<String>,

        /// Sort field
        #[arg(long, default_value = "created")]
        sort: SortField,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Show one saved item in full
    Show {
        /// Collection holding the item
        collection: Collection,

        /// Item id
        id: String,
    },

    /// Load a saved item as the corresponding working state
    ///
    /// Replaces the matching part of the session; loading a storyline also
    /// clears its scene breakdown and mood board. Requires --yes to confirm.
    Load {
        /// Collection holding the item
        collection: Collection,

        /// Item id
        id: String,

        /// Confirm replacing the working state
        #[arg(long)]
        yes: bool,
    },

    /// Delete a saved item
    Delete {
        /// Collection holding the item
        collection: Collection,

        /// Item id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Delete everything in all collections
    Clear {
        /// Confirm clearing all saved work
        #[arg(long)]
        yes: bool,
    },
}

/// The four saved-work collections
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Collection {
    /// Saved storylines
    Storylines,
    /// Saved image sets
    Images,
    /// Saved character profiles
    Profiles,
    /// Saved mood boards
    Moodboards,
}

impl Collection {
    /// The storage namespace backing this collection.
    pub fn namespace(self) -> Namespace {
        match self {
            Collection::Storylines => Namespace::Storylines,
            Collection::Images => Namespace::ImageSets,
            Collection::Profiles => Namespace::Profiles,
            Collection::Moodboards => Namespace::MoodBoards,
        }
    }
}

/// Sort field options for listing
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortField {
    /// Sort by item name
    Name,
    /// Sort by save time
    Created,
}

impl SortField {
    /// The library sort key for this field.
    pub fn sort_key(self) -> SortKey {
        match self {
            SortField::Name => SortKey::Name,
            SortField::Created => SortKey::CreatedAt,
        }
    }
}

//! Command handlers.

use super::commands::{Cli, Collection, Commands, LibraryCommands, SortField};
use cinestudio_core::MoodBoardCategory;
use cinestudio_error::{SessionError, SessionErrorKind, StudioError, StudioResult};
use cinestudio_library::{FileStore, Library, Namespace, SortDirection};
use cinestudio_models::{GeminiClient, StudioConfig};
use cinestudio_prompt::StorylineStyle;
use cinestudio_session::{PendingAction, Section, SessionSnapshot, Studio};
use std::path::PathBuf;

type CliStudio = Studio<GeminiClient, FileStore>;

/// The studio plus the snapshot location it was restored from.
struct Workspace {
    studio: CliStudio,
    snapshot_path: PathBuf,
}

/// Opens the studio over the configured data directory.
///
/// Generation commands need a usable API key up front (`online`); library
/// commands work without one.
async fn open(online: bool) -> StudioResult<Workspace> {
    let config = StudioConfig::load()?;
    let dir = config.library_dir()?;
    let library = Library::new(FileStore::new(&dir)?);
    let snapshot_path = dir.join("session.json");
    let state = SessionSnapshot::load_from(&snapshot_path).restore();

    let driver = if online {
        GeminiClient::from_config(&config)?
    } else {
        GeminiClient::with_api_key(
            std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            &config,
        )
    };

    let mut studio = Studio::with_state(driver, library, state);
    if let Some(hint) = studio.onboarding_hint().await? {
        println!("{hint}");
        println!();
    }

    Ok(Workspace {
        studio,
        snapshot_path,
    })
}

impl Workspace {
    /// Writes the session snapshot back for the next invocation.
    fn persist(&self) -> StudioResult<()> {
        SessionSnapshot::capture(self.studio.state()).persist_to(&self.snapshot_path)
    }

    /// Prints the classified error for a section, then passes the error on.
    fn report(&self, section: Section, error: StudioError) -> StudioError {
        if let Some(friendly) = self.studio.state().error(section) {
            eprintln!("{}", friendly.title);
            eprintln!("{}", friendly.remedy);
        }
        error
    }
}

/// Dispatches a parsed command.
pub async fn handle_command(cli: Cli) -> StudioResult<()> {
    match cli.command {
        Commands::Storyline { concept, style } => {
            let mut ws = open(true).await?;
            let style = StorylineStyle::from_key(&style);
            match ws.studio.generate_storyline(&concept, style).await {
                Ok(text) => {
                    println!("{text}");
                    ws.persist()
                }
                Err(e) => Err(ws.report(Section::Storyline, e)),
            }
        }

        Commands::Scenes => {
            let mut ws = open(true).await?;
            match ws.studio.scene_breakdown().await {
                Ok(scenes) => {
                    for scene in &scenes {
                        println!("Scene {}: {}", scene.scene_number, scene.location);
                        if !scene.characters.is_empty() {
                            println!("  Cast: {}", scene.characters.join(", "));
                        }
                        println!("  {}", scene.summary);
                        println!();
                    }
                    ws.persist()
                }
                Err(e) => Err(ws.report(Section::Breakdown, e)),
            }
        }

        Commands::Moodboard => {
            let mut ws = open(true).await?;
            match ws.studio.mood_board().await {
                Ok(board) => {
                    for (category, image) in MoodBoardCategory::ALL.iter().zip(&board.images) {
                        println!("{category}: {}", image.prompt);
                        println!("  image: {} ({} chars)", image.id, image.url.len());
                    }
                    ws.persist()
                }
                Err(e) => Err(ws.report(Section::MoodBoard, e)),
            }
        }

        Commands::Character { concept } => {
            let mut ws = open(true).await?;
            match ws.studio.character_profile(&concept).await {
                Ok(profile) => {
                    println!("{}", profile.text);
                    println!();
                    println!("Portrait: data URL, {} chars", profile.image_url.len());
                    ws.persist()
                }
                Err(e) => Err(ws.report(Section::Character, e)),
            }
        }

        Commands::Image {
            prompt,
            from_storyline,
        } => {
            let mut ws = open(true).await?;
            let prompt = match (prompt, from_storyline) {
                (Some(prompt), false) => prompt,
                (None, true) => ws.studio.storyline_prompt_seed().ok_or_else(|| {
                    SessionError::new(SessionErrorKind::MissingStoryline)
                })?,
                (Some(_), true) | (None, false) => {
                    return Err(SessionError::new(SessionErrorKind::EmptyInput(
                        "image prompt (give a prompt or --from-storyline, not both)".to_string(),
                    ))
                    .into())
                }
            };
            match ws.studio.generate_image(&prompt).await {
                Ok(image) => {
                    println!("Generated image {}", image.id);
                    println!("  prompt: {}", image.prompt);
                    println!("  data URL: {} chars", image.url.len());
                    ws.persist()
                }
                Err(e) => Err(ws.report(Section::Image, e)),
            }
        }

        Commands::Save { collection, name } => {
            let mut ws = open(false).await?;
            match collection {
                Collection::Storylines => {
                    let item = ws.studio.save_storyline(&name).await?;
                    println!("Saved storyline {} as \"{}\"", item.id, item.name);
                }
                Collection::Images => {
                    ws.studio.save_images(&name).await?;
                    println!("Saved current images as \"{name}\"");
                }
                Collection::Profiles => {
                    ws.studio.save_character(&name).await?;
                    println!("Saved character profile as \"{name}\"");
                }
                Collection::Moodboards => {
                    ws.studio.save_mood_board(&name).await?;
                    println!("Saved mood board as \"{name}\"");
                }
            }
            Ok(())
        }

        Commands::Library(command) => handle_library_command(command).await,
    }
}

/// Dispatches a library subcommand.
async fn handle_library_command(command: LibraryCommands) -> StudioResult<()> {
    match command {
        LibraryCommands::List {
            collection,
            filter,
            sort,
            desc,
        } => {
            let ws = open(false).await?;
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            let items = ws
                .studio
                .library()
                .list(
                    collection.namespace(),
                    filter.as_deref().unwrap_or(""),
                    sort.sort_key(),
                    direction,
                )
                .await;
            if items.is_empty() {
                println!("No saved items.");
            }
            for item in items {
                println!(
                    "{}  {}  {}",
                    item.id,
                    item.created_at.format("%Y-%m-%d %H:%M"),
                    item.name
                );
            }
            Ok(())
        }

        LibraryCommands::Show { collection, id } => {
            let ws = open(false).await?;
            let namespace = collection.namespace();
            let items = ws.studio.library().read_collection(namespace).await;
            let item = items.into_iter().find(|item| item.id == id).ok_or_else(|| {
                cinestudio_error::LibraryError::new(
                    cinestudio_error::LibraryErrorKind::ItemNotFound {
                        namespace: namespace.to_string(),
                        id,
                    },
                )
            })?;
            // SavedItem serializes cleanly, so show the stored form.
            println!("{}", serde_json::to_string_pretty(&item).unwrap_or_default());
            Ok(())
        }

        LibraryCommands::Load {
            collection,
            id,
            yes,
        } => {
            let mut ws = open(false).await?;
            let namespace = collection.namespace();
            let action = PendingAction::LoadItem { namespace, id };
            ws.studio.request(action.clone());
            if !yes {
                println!("This replaces the corresponding working state.");
                if namespace == Namespace::Storylines {
                    println!("Loading a storyline also clears its scene breakdown and mood board.");
                }
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }
            ws.studio.commit(&action).await?;
            println!("Loaded {namespace} item into the working session.");
            ws.persist()
        }

        LibraryCommands::Delete {
            collection,
            id,
            yes,
        } => {
            let mut ws = open(false).await?;
            let action = PendingAction::DeleteItem {
                namespace: collection.namespace(),
                id,
            };
            ws.studio.request(action.clone());
            if !yes {
                println!("This permanently deletes the item. Re-run with --yes to confirm.");
                return Ok(());
            }
            ws.studio.commit(&action).await?;
            println!("Deleted.");
            Ok(())
        }

        LibraryCommands::Clear { yes } => {
            let mut ws = open(false).await?;
            ws.studio.request(PendingAction::ClearAll);
            if !yes {
                println!("This permanently deletes everything in all collections.");
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }
            ws.studio.commit(&PendingAction::ClearAll).await?;
            println!("All saved collections cleared.");
            Ok(())
        }
    }
}

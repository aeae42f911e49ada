//! The generation orchestrator.

use crate::event::{PendingAction, SessionEvent};
use crate::schema::{mood_board_prompts_schema, scene_breakdown_schema};
use crate::state::{Section, SessionState};
use cinestudio_core::{
    CharacterProfile, GenerateRequest, GeneratedImage, Message, MoodBoardContent, MoodBoardImage,
    SavedImageSet, SavedMoodBoard, SavedProfile, SavedStoryline, Scene,
};
use cinestudio_error::{
    FriendlyError, ParseError, ParseErrorKind, SessionError, SessionErrorKind, StudioError,
    StudioResult,
};
use cinestudio_interface::{AspectRatio, ImageGeneration, JsonMode, StudioDriver};
use cinestudio_library::{KeyValueStore, Library, Namespace};
use cinestudio_prompt::{
    extract_appearance, image_prompt, storyline_instruction, substitute_character_tags,
    StorylineStyle, CHARACTER_PROFILE_INSTRUCTION, MOOD_BOARD_PROMPT_INSTRUCTION,
    SCENE_BREAKDOWN_INSTRUCTION,
};
use tracing::{info, instrument, warn};

/// Characters of storyline kept when seeding an image prompt.
pub const EXCERPT_LEN: usize = 200;

/// Characters of storyline recorded on a saved mood board.
pub const SOURCE_EXCERPT_LEN: usize = 100;

/// Usage guidance shown on the first run against a fresh library.
pub const ONBOARDING_HINT: &str = "\
Welcome to Cinestudio. Start by generating a storyline from a concept;
scene breakdowns, mood boards, and storyline-seeded images all build on
the current storyline. Save finished work to the library to reuse it in
later sessions, and tag image prompts with [CHARACTER: name] to pull in
a saved profile's appearance.";

/// Truncate a storyline to `max_chars`, marking the cut with an ellipsis.
///
/// Short text passes through unchanged.
///
/// # Examples
///
/// ```
/// use cinestudio_session::storyline_excerpt;
///
/// assert_eq!(storyline_excerpt("short", 200), "short");
/// assert_eq!(storyline_excerpt("abcdef", 3), "abc...");
/// ```
pub fn storyline_excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// Drives generation flows against a gateway driver and a library.
///
/// Each operation validates its input, starts a tracked request, calls the
/// gateway, and folds the result into the [`SessionState`]: success merges
/// content, failure records a classified [`FriendlyError`] on the section.
/// The `Result` also propagates to the caller so a CLI can exit non-zero.
#[derive(Debug)]
pub struct Studio<D, S: KeyValueStore> {
    driver: D,
    library: Library<S>,
    state: SessionState,
}

impl<D, S> Studio<D, S>
where
    D: StudioDriver + JsonMode + ImageGeneration,
    S: KeyValueStore,
{
    /// Creates a studio with an empty session.
    pub fn new(driver: D, library: Library<S>) -> Self {
        Self::with_state(driver, library, SessionState::new())
    }

    /// Creates a studio over restored session state.
    pub fn with_state(driver: D, library: Library<S>, state: SessionState) -> Self {
        Self {
            driver,
            library,
            state,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The saved-artifact library.
    pub fn library(&self) -> &Library<S> {
        &self.library
    }

    /// The gateway driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Generates a storyline from a concept in the given style.
    ///
    /// An empty concept is rejected before any gateway call. On success the
    /// new storyline replaces the working one and clears the scene breakdown
    /// and mood board derived from its predecessor.
    #[instrument(skip(self, concept), fields(style = %style))]
    pub async fn generate_storyline(
        &mut self,
        concept: &str,
        style: StorylineStyle,
    ) -> StudioResult<String> {
        let concept = concept.trim();
        if concept.is_empty() {
            return Err(self.reject(Section::Storyline, "Please describe your story concept."));
        }

        let token = self.begin(Section::Storyline);
        let request = GenerateRequest {
            messages: vec![
                Message::system(storyline_instruction(style)),
                Message::user(concept),
            ],
            ..Default::default()
        };

        match self.driver.generate(&request).await {
            Ok(response) => {
                let text = response.text();
                info!(chars = text.len(), "Storyline generated");
                self.state.apply(SessionEvent::StorylineReady {
                    token,
                    text: text.clone(),
                    style,
                });
                Ok(text)
            }
            Err(error) => Err(self.fail(Section::Storyline, token, error)),
        }
    }

    /// Breaks the working storyline into scenes via structured output.
    ///
    /// The response must match the scene schema; malformed JSON or a shape
    /// mismatch is a parse failure, classified like any other.
    #[instrument(skip(self))]
    pub async fn scene_breakdown(&mut self) -> StudioResult<Vec<Scene>> {
        let storyline = match &self.state.storyline {
            Some(text) => text.clone(),
            None => {
                return Err(self.reject(
                    Section::Breakdown,
                    "Generate or load a storyline first.",
                ))
            }
        };

        let token = self.begin(Section::Breakdown);
        let request = GenerateRequest {
            messages: vec![
                Message::system(SCENE_BREAKDOWN_INSTRUCTION),
                Message::user(storyline),
            ],
            ..Default::default()
        };

        let value = match self
            .driver
            .generate_json(&request, &scene_breakdown_schema())
            .await
        {
            Ok(value) => value,
            Err(error) => {
                return Err(self.fail(Section::Breakdown, token, error))
            }
        };

        let scenes: Vec<Scene> = match serde_json::from_value(value) {
            Ok(scenes) => scenes,
            Err(e) => {
                let error: StudioError =
                    ParseError::new(ParseErrorKind::SchemaMismatch(e.to_string())).into();
                return Err(self.fail(Section::Breakdown, token, error));
            }
        };

        info!(count = scenes.len(), "Scene breakdown generated");
        self.state.apply(SessionEvent::ScenesReady {
            token,
            scenes: scenes.clone(),
        });
        Ok(scenes)
    }

    /// Generates a character profile: text first, then a portrait derived
    /// from the profile's Appearance section.
    ///
    /// All-or-nothing: if either call fails, nothing merges into the session.
    #[instrument(skip(self, concept))]
    pub async fn character_profile(&mut self, concept: &str) -> StudioResult<CharacterProfile> {
        let concept = concept.trim();
        if concept.is_empty() {
            return Err(self.reject(Section::Character, "Please describe your character."));
        }

        let token = self.begin(Section::Character);
        let request = GenerateRequest {
            messages: vec![
                Message::system(CHARACTER_PROFILE_INSTRUCTION),
                Message::user(concept),
            ],
            ..Default::default()
        };

        let text = match self.driver.generate(&request).await {
            Ok(response) => response.text(),
            Err(error) => {
                return Err(self.fail(Section::Character, token, error))
            }
        };

        let appearance = extract_appearance(&text);
        let portrait = match self
            .driver
            .generate_image(&image_prompt(&appearance), AspectRatio::Portrait)
            .await
        {
            Ok(image) => image,
            Err(error) => {
                return Err(self.fail(Section::Character, token, error))
            }
        };

        let profile = CharacterProfile {
            text,
            image_url: portrait.to_data_url(),
        };
        info!("Character profile generated");
        self.state.apply(SessionEvent::CharacterReady {
            token,
            profile: profile.clone(),
        });
        Ok(profile)
    }

    /// Generates a single cinematic image from a prompt.
    ///
    /// `[CHARACTER: name]` tags are substituted against saved profiles
    /// before the gateway call; the artifact records the user's original
    /// prompt, not the substituted one.
    #[instrument(skip(self, prompt))]
    pub async fn generate_image(&mut self, prompt: &str) -> StudioResult<GeneratedImage> {
        if prompt.trim().is_empty() {
            return Err(self.reject(Section::Image, "Please enter an image prompt."));
        }

        let token = self.begin(Section::Image);
        let profiles = self.saved_profiles().await;
        let substituted = substitute_character_tags(prompt, &profiles);

        let data = match self
            .driver
            .generate_image(&image_prompt(&substituted), AspectRatio::Widescreen)
            .await
        {
            Ok(data) => data,
            Err(error) => return Err(self.fail(Section::Image, token, error)),
        };

        let image = GeneratedImage::new(data.to_data_url(), prompt);
        info!(id = %image.id, "Image generated");
        self.state.apply(SessionEvent::ImageReady {
            token,
            image: image.clone(),
        });
        Ok(image)
    }

    /// Generates a four-image mood board for the working storyline.
    ///
    /// One structured call produces the four facet prompts, then each is
    /// rendered in turn. Fail-fast: any failure discards the whole board.
    #[instrument(skip(self))]
    pub async fn mood_board(&mut self) -> StudioResult<MoodBoardContent> {
        let storyline = match &self.state.storyline {
            Some(text) => text.clone(),
            None => {
                return Err(self.reject(
                    Section::MoodBoard,
                    "Generate or load a storyline first.",
                ))
            }
        };

        let token = self.begin(Section::MoodBoard);
        let request = GenerateRequest {
            messages: vec![
                Message::system(MOOD_BOARD_PROMPT_INSTRUCTION),
                Message::user(storyline.clone()),
            ],
            ..Default::default()
        };

        let value = match self
            .driver
            .generate_json(&request, &mood_board_prompts_schema())
            .await
        {
            Ok(value) => value,
            Err(error) => {
                return Err(self.fail(Section::MoodBoard, token, error))
            }
        };

        let prompts: Vec<String> = match serde_json::from_value(value) {
            Ok(prompts) => prompts,
            Err(e) => {
                let error: StudioError =
                    ParseError::new(ParseErrorKind::SchemaMismatch(e.to_string())).into();
                return Err(self.fail(Section::MoodBoard, token, error));
            }
        };
        if prompts.len() != 4 {
            let error: StudioError = ParseError::new(ParseErrorKind::WrongCount {
                expected: 4,
                actual: prompts.len(),
            })
            .into();
            return Err(self.fail(Section::MoodBoard, token, error));
        }

        let mut images = Vec::with_capacity(4);
        for prompt in &prompts {
            let data = match self
                .driver
                .generate_image(&image_prompt(prompt), AspectRatio::Square)
                .await
            {
                Ok(data) => data,
                Err(error) => {
                    return Err(self.fail(Section::MoodBoard, token, error))
                }
            };
            images.push(MoodBoardImage::new(data.to_data_url(), prompt.clone()));
        }

        let source_storyline = format!(
            "{}...",
            storyline.chars().take(SOURCE_EXCERPT_LEN).collect::<String>()
        );
        let board = MoodBoardContent {
            images,
            source_storyline,
        };
        info!("Mood board generated");
        self.state.apply(SessionEvent::MoodBoardReady {
            token,
            board: board.clone(),
        });
        Ok(board)
    }

    /// Image prompt seeded from the working storyline, when one exists.
    pub fn storyline_prompt_seed(&self) -> Option<String> {
        self.state.storyline.as_ref().map(|text| {
            format!(
                "A cinematic scene based on: {}",
                storyline_excerpt(text, EXCERPT_LEN)
            )
        })
    }

    /// Saves the working storyline under a name.
    pub async fn save_storyline(&mut self, name: &str) -> StudioResult<SavedStoryline> {
        let text = self.state.storyline.clone().ok_or_else(|| {
            SessionError::new(SessionErrorKind::NothingToSave("storyline".to_string()))
        })?;
        let item = self.library.save(Namespace::Storylines, name, text).await?;
        typed(item)
    }

    /// Saves the current session images as one set.
    pub async fn save_images(&mut self, name: &str) -> StudioResult<()> {
        if self.state.images.is_empty() {
            return Err(
                SessionError::new(SessionErrorKind::NothingToSave("images".to_string())).into(),
            );
        }
        self.library
            .save(Namespace::ImageSets, name, self.state.images.clone())
            .await?;
        Ok(())
    }

    /// Saves the current character profile.
    pub async fn save_character(&mut self, name: &str) -> StudioResult<()> {
        let profile = self.state.character.clone().ok_or_else(|| {
            SessionError::new(SessionErrorKind::NothingToSave(
                "character profile".to_string(),
            ))
        })?;
        self.library
            .save(Namespace::Profiles, name, profile)
            .await?;
        Ok(())
    }

    /// Saves the current mood board.
    pub async fn save_mood_board(&mut self, name: &str) -> StudioResult<()> {
        let board = self.state.mood_board.clone().ok_or_else(|| {
            SessionError::new(SessionErrorKind::NothingToSave("mood board".to_string()))
        })?;
        self.library
            .save(Namespace::MoodBoards, name, board)
            .await?;
        Ok(())
    }

    /// Requests a destructive action, to be committed or cancelled.
    pub fn request(&mut self, action: PendingAction) {
        self.state
            .apply(SessionEvent::ConfirmationRequested(action));
    }

    /// Commits a previously requested destructive action.
    ///
    /// The named action must match the pending one; otherwise nothing runs
    /// and a [`SessionErrorKind::NoPendingConfirmation`] error is returned.
    #[instrument(skip(self))]
    pub async fn commit(&mut self, action: &PendingAction) -> StudioResult<()> {
        if self.state.pending() != Some(action) {
            return Err(SessionError::new(SessionErrorKind::NoPendingConfirmation(
                action.to_string(),
            ))
            .into());
        }
        self.state.apply(SessionEvent::ConfirmationCommitted);

        match action {
            PendingAction::DeleteItem { namespace, id } => {
                self.library.delete(*namespace, id).await?;
                info!(%namespace, id, "Deleted saved item");
            }
            PendingAction::ClearAll => {
                self.library.clear_all().await?;
                info!("Cleared all saved collections");
            }
            PendingAction::LoadItem { namespace, id } => {
                let event = match namespace {
                    Namespace::Storylines => {
                        let item: SavedStoryline = self.library.load(*namespace, id).await?;
                        SessionEvent::StorylineAdopted { text: item.content }
                    }
                    Namespace::ImageSets => {
                        let item: SavedImageSet = self.library.load(*namespace, id).await?;
                        SessionEvent::ImagesAdopted {
                            images: item.content,
                        }
                    }
                    Namespace::Profiles => {
                        let item: SavedProfile = self.library.load(*namespace, id).await?;
                        SessionEvent::ProfileAdopted {
                            profile: item.content,
                        }
                    }
                    Namespace::MoodBoards => {
                        let item: SavedMoodBoard = self.library.load(*namespace, id).await?;
                        SessionEvent::MoodBoardAdopted {
                            board: item.content,
                        }
                    }
                };
                info!(%namespace, id, "Loaded saved item over working state");
                self.state.apply(event);
            }
        }
        Ok(())
    }

    /// Abandons the pending destructive action, if any.
    pub fn cancel(&mut self) {
        self.state.apply(SessionEvent::ConfirmationCancelled);
    }

    /// First-run usage guidance, surfaced once per library.
    ///
    /// Returns [`ONBOARDING_HINT`] the first time it is called against a
    /// fresh library and records that the guidance has been shown; every
    /// later call returns `None`.
    pub async fn onboarding_hint(&mut self) -> StudioResult<Option<&'static str>> {
        if self.library.tutorial_seen().await {
            return Ok(None);
        }
        self.library.mark_tutorial_seen().await?;
        Ok(Some(ONBOARDING_HINT))
    }

    /// Saved character profiles, for `[CHARACTER: name]` substitution.
    ///
    /// Entries that no longer decode are skipped with a warning rather than
    /// failing the whole lookup.
    pub async fn saved_profiles(&self) -> Vec<SavedProfile> {
        self.library
            .read_collection(Namespace::Profiles)
            .await
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item.content) {
                Ok(content) => Some(SavedProfile {
                    id: item.id,
                    name: item.name,
                    created_at: item.created_at,
                    content,
                }),
                Err(e) => {
                    warn!(id = %item.id, error = %e, "Skipping undecodable saved profile");
                    None
                }
            })
            .collect()
    }

    /// Starts a tracked request and returns its token.
    fn begin(&mut self, section: Section) -> u64 {
        self.state.apply(SessionEvent::Started { section });
        self.state.latest_token(section)
    }

    /// Records a classified failure on a section and passes the error back.
    ///
    /// Classifies the kind's message, not the located wrapper, so a line
    /// number at the construction site can never match a status substring.
    fn fail(&mut self, section: Section, token: u64, error: StudioError) -> StudioError {
        let friendly = FriendlyError::classify(error.message());
        warn!(%section, category = ?friendly.category, "Generation failed");
        self.state.apply(SessionEvent::Failed {
            section,
            token,
            error: friendly,
        });
        error
    }

    /// Records an inline input-validation error on a section.
    fn reject(&mut self, section: Section, remedy: &str) -> StudioError {
        self.state.apply(SessionEvent::InputRejected {
            section,
            error: FriendlyError::input_required(remedy),
        });
        SessionError::new(SessionErrorKind::EmptyInput(section.to_string())).into()
    }
}

/// Reinterprets a stored item's JSON content as a concrete type.
fn typed<T: serde::de::DeserializeOwned>(
    item: cinestudio_core::SavedItem<serde_json::Value>,
) -> StudioResult<cinestudio_core::SavedItem<T>> {
    let content = serde_json::from_value(item.content)
        .map_err(|e| ParseError::new(ParseErrorKind::SchemaMismatch(e.to_string())))?;
    Ok(cinestudio_core::SavedItem {
        id: item.id,
        name: item.name,
        created_at: item.created_at,
        content,
    })
}

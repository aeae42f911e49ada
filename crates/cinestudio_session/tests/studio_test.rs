//! Orchestrator flow tests over a scripted mock driver.

mod test_utils;

use cinestudio_core::{CharacterProfile, GeneratedImage, MoodBoardContent, MoodBoardImage};
use cinestudio_error::{ErrorCategory, GeminiErrorKind};
use cinestudio_interface::AspectRatio;
use cinestudio_library::{Library, MemoryStore, Namespace};
use cinestudio_prompt::StorylineStyle;
use cinestudio_session::{
    PendingAction, Section, SessionState, Studio, SESSION_IMAGE_CAP,
};
use serde_json::json;
use test_utils::MockDriver;

fn studio() -> Studio<MockDriver, MemoryStore> {
    Studio::new(MockDriver::new(), Library::new(MemoryStore::default()))
}

fn studio_with_storyline(text: &str) -> Studio<MockDriver, MemoryStore> {
    let mut state = SessionState::new();
    state.storyline = Some(text.to_string());
    Studio::with_state(MockDriver::new(), Library::new(MemoryStore::default()), state)
}

#[tokio::test]
async fn storyline_flow_merges_text_into_state() {
    let mut studio = studio();
    studio_driver(&studio).push_text("FADE IN. A heist begins.");

    let text = studio
        .generate_storyline("a heist on a generation ship", StorylineStyle::Drama)
        .await
        .unwrap();

    assert_eq!(text, "FADE IN. A heist begins.");
    assert_eq!(studio.state().storyline.as_deref(), Some(text.as_str()));
    assert_eq!(studio.state().style, StorylineStyle::Drama);
    assert!(!studio.state().busy(Section::Storyline));
    assert!(studio.state().error(Section::Storyline).is_none());
}

#[tokio::test]
async fn empty_concept_never_reaches_the_gateway() {
    let mut studio = studio();

    let result = studio.generate_storyline("   ", StorylineStyle::Cinematic).await;

    assert!(result.is_err());
    let error = studio.state().error(Section::Storyline).unwrap();
    assert_eq!(error.category, ErrorCategory::InputValidation);
    // The scripted queue was never touched, so no call was made.
    assert_eq!(studio_driver(&studio).image_call_count(), 0);
}

#[tokio::test]
async fn gateway_failure_is_classified_onto_the_section() {
    let mut studio = studio();
    studio_driver(&studio).push_text_error(GeminiErrorKind::HttpError {
        status_code: 429,
        message: "quota exceeded".to_string(),
    });

    let result = studio
        .generate_storyline("anything", StorylineStyle::Cinematic)
        .await;

    assert!(result.is_err());
    let error = studio.state().error(Section::Storyline).unwrap();
    assert_eq!(error.category, ErrorCategory::RateLimited);
    assert!(error.technical_message.contains("429"));
    // The classifier sees the failure itself, never the construction site,
    // so a source line number can not impersonate a status code.
    assert!(!error.technical_message.contains(" at line "));
    assert!(studio.state().storyline.is_none());
}

#[tokio::test]
async fn scene_breakdown_requires_a_storyline() {
    let mut studio = studio();
    let result = studio.scene_breakdown().await;
    assert!(result.is_err());
    let error = studio.state().error(Section::Breakdown).unwrap();
    assert_eq!(error.category, ErrorCategory::InputValidation);
}

#[tokio::test]
async fn scene_breakdown_parses_schema_conformant_output() {
    let mut studio = studio_with_storyline("Two scenes happen.");
    studio_driver(&studio).push_json(json!([
        {
            "sceneNumber": 1,
            "location": "INT. VAULT - NIGHT",
            "characters": ["The Thief"],
            "summary": "The vault door opens."
        },
        {
            "sceneNumber": 2,
            "location": "EXT. ROOFTOP - DAWN",
            "characters": ["The Thief", "The Detective"],
            "summary": "A chase across the skyline."
        }
    ]));

    let scenes = studio.scene_breakdown().await.unwrap();

    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].scene_number, 1);
    assert_eq!(scenes[1].location, "EXT. ROOFTOP - DAWN");
    assert_eq!(studio.state().scenes, scenes);
}

#[tokio::test]
async fn malformed_scene_json_is_a_recorded_failure() {
    let mut studio = studio_with_storyline("A story.");
    studio_driver(&studio).push_json(json!([{"wrong_field": true}]));

    let result = studio.scene_breakdown().await;

    assert!(result.is_err());
    assert!(studio.state().scenes.is_empty());
    assert!(studio.state().error(Section::Breakdown).is_some());
}

#[tokio::test]
async fn character_profile_is_all_or_nothing() {
    let mut studio = studio();
    let driver = studio_driver(&studio);
    driver.push_text("## Appearance\nTall, silver-haired.\n## Backstory\nUnknown.");
    driver.push_image_error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "internal error".to_string(),
    });

    let result = studio.character_profile("a retired spy").await;

    assert!(result.is_err());
    // The text call succeeded but nothing merged.
    assert!(studio.state().character.is_none());
    let error = studio.state().error(Section::Character).unwrap();
    assert_eq!(error.category, ErrorCategory::ServerSide);
}

#[tokio::test]
async fn character_portrait_uses_only_the_appearance_section() {
    let mut studio = studio();
    let driver = studio_driver(&studio);
    driver.push_text("## Appearance\nTall, silver-haired.\n## Backstory\nUnknown.");
    driver.push_image();

    let profile = studio.character_profile("a retired spy").await.unwrap();

    assert!(profile.image_url.starts_with("data:image/png;base64,"));
    assert_eq!(studio.state().character.as_ref(), Some(&profile));

    let prompts = studio_driver(&studio).image_prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Tall, silver-haired."));
    assert!(!prompts[0].contains("Backstory"));
}

#[tokio::test]
async fn image_generation_substitutes_saved_character_tags() {
    let mut studio = studio();
    studio
        .library()
        .save(
            Namespace::Profiles,
            "Zara",
            CharacterProfile {
                text: "## Appearance\nA wiry pilot with a scarred jaw.\n## Fears\nSilence."
                    .to_string(),
                image_url: "data:image/png;base64,AAAA".to_string(),
            },
        )
        .await
        .unwrap();
    studio_driver(&studio).push_image();

    let image = studio
        .generate_image("[CHARACTER: Zara] sprinting through a hangar")
        .await
        .unwrap();

    // The artifact keeps the user's original prompt.
    assert_eq!(image.prompt, "[CHARACTER: Zara] sprinting through a hangar");

    // The gateway saw the substituted appearance, not the tag.
    let prompts = studio_driver(&studio).image_prompts.lock().unwrap().clone();
    assert!(prompts[0].contains("(A character described as: A wiry pilot with a scarred jaw.)"));
    assert!(!prompts[0].contains("[CHARACTER:"));
}

#[tokio::test]
async fn unknown_character_tags_pass_through_verbatim() {
    let mut studio = studio();
    studio_driver(&studio).push_image();

    studio
        .generate_image("[CHARACTER: Nobody] waits alone")
        .await
        .unwrap();

    let prompts = studio_driver(&studio).image_prompts.lock().unwrap().clone();
    assert!(prompts[0].contains("[CHARACTER: Nobody]"));
}

#[tokio::test]
async fn session_keeps_at_most_five_images() {
    let mut studio = studio();
    for n in 0..6 {
        studio_driver(&studio).push_image();
        studio.generate_image(&format!("prompt {n}")).await.unwrap();
    }

    let images = &studio.state().images;
    assert_eq!(images.len(), SESSION_IMAGE_CAP);
    assert_eq!(images[0].prompt, "prompt 5");
    assert!(images.iter().all(|i| i.prompt != "prompt 0"));
}

#[tokio::test]
async fn mood_board_renders_all_four_prompts() {
    let long_storyline = "s".repeat(150);
    let mut studio = studio_with_storyline(&long_storyline);
    let driver = studio_driver(&studio);
    driver.push_json(json!([
        "a drowned cathedral",
        "the diver's face lit by bioluminescence",
        "teal and rust color study",
        "a brass pocket watch, stopped"
    ]));
    for _ in 0..4 {
        driver.push_image();
    }

    let board = studio.mood_board().await.unwrap();

    assert_eq!(board.images.len(), 4);
    assert_eq!(board.images[0].prompt, "a drowned cathedral");
    assert_eq!(board.source_storyline.chars().count(), 103);
    assert!(board.source_storyline.ends_with("..."));
    assert_eq!(studio.state().mood_board.as_ref(), Some(&board));
}

#[tokio::test]
async fn mood_board_with_wrong_prompt_count_fails_before_rendering() {
    let mut studio = studio_with_storyline("A story.");
    studio_driver(&studio).push_json(json!(["only", "three", "prompts"]));

    let result = studio.mood_board().await;

    assert!(result.is_err());
    assert!(studio.state().mood_board.is_none());
    assert_eq!(studio_driver(&studio).image_call_count(), 0);
}

#[tokio::test]
async fn mood_board_image_failure_discards_the_whole_board() {
    let mut studio = studio_with_storyline("A story.");
    let driver = studio_driver(&studio);
    driver.push_json(json!(["one", "two", "three", "four"]));
    driver.push_image();
    driver.push_image();
    driver.push_image_error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "internal error".to_string(),
    });

    let result = studio.mood_board().await;

    assert!(result.is_err());
    assert!(studio.state().mood_board.is_none());
}

#[tokio::test]
async fn prompt_seed_uses_a_truncated_excerpt() {
    let studio = studio_with_storyline(&"x".repeat(250));
    let seed = studio.storyline_prompt_seed().unwrap();
    assert!(seed.starts_with("A cinematic scene based on: "));
    assert!(seed.ends_with("..."));

    let short = studio_with_storyline("brief");
    assert_eq!(
        short.storyline_prompt_seed().unwrap(),
        "A cinematic scene based on: brief"
    );
}

#[tokio::test]
async fn commit_without_request_is_rejected() {
    let mut studio = studio();
    let result = studio.commit(&PendingAction::ClearAll).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn commit_must_name_the_pending_action() {
    let mut studio = studio();
    let saved = studio
        .library()
        .save(Namespace::Storylines, "Keep me", "text".to_string())
        .await
        .unwrap();

    studio.request(PendingAction::DeleteItem {
        namespace: Namespace::Storylines,
        id: saved.id.clone(),
    });

    // Committing a different action must not run anything.
    let result = studio.commit(&PendingAction::ClearAll).await;
    assert!(result.is_err());
    assert_eq!(
        studio
            .library()
            .read_collection(Namespace::Storylines)
            .await
            .len(),
        1
    );

    // The original request is still pending and can be committed.
    studio
        .commit(&PendingAction::DeleteItem {
            namespace: Namespace::Storylines,
            id: saved.id,
        })
        .await
        .unwrap();
    assert!(studio
        .library()
        .read_collection(Namespace::Storylines)
        .await
        .is_empty());
}

#[tokio::test]
async fn cancel_clears_the_pending_action() {
    let mut studio = studio();
    studio.request(PendingAction::ClearAll);
    studio.cancel();
    assert!(studio.commit(&PendingAction::ClearAll).await.is_err());
}

#[tokio::test]
async fn loading_a_storyline_replaces_working_state_and_dependents() {
    let mut studio = studio_with_storyline("unsaved work");
    studio_driver(&studio).push_json(json!([{
        "sceneNumber": 1,
        "location": "INT. SOMEWHERE",
        "characters": [],
        "summary": "Something."
    }]));
    studio.scene_breakdown().await.unwrap();
    assert!(!studio.state().scenes.is_empty());

    let saved = studio
        .library()
        .save(Namespace::Storylines, "The keeper", "A saved tale.".to_string())
        .await
        .unwrap();

    let action = PendingAction::LoadItem {
        namespace: Namespace::Storylines,
        id: saved.id.clone(),
    };
    studio.request(action.clone());
    studio.commit(&action).await.unwrap();

    assert_eq!(studio.state().storyline.as_deref(), Some("A saved tale."));
    assert!(studio.state().scenes.is_empty());
    assert!(studio.state().mood_board.is_none());
}

#[tokio::test]
async fn loading_restores_each_saved_artifact_type() {
    let mut studio = studio_with_storyline("the working tale");

    let profile = CharacterProfile {
        text: "## Appearance\nTall, wind-burned.".to_string(),
        image_url: "data:portrait".to_string(),
    };
    let images = vec![
        GeneratedImage::new("data:a", "a skyline"),
        GeneratedImage::new("data:b", "a hangar"),
    ];
    let board = MoodBoardContent {
        images: vec![MoodBoardImage::new("data:m", "rain on glass")],
        source_storyline: "the working tale...".to_string(),
    };

    let saved_profile = studio
        .library()
        .save(Namespace::Profiles, "Zara", profile.clone())
        .await
        .unwrap();
    let saved_images = studio
        .library()
        .save(Namespace::ImageSets, "Establishing shots", images.clone())
        .await
        .unwrap();
    let saved_board = studio
        .library()
        .save(Namespace::MoodBoards, "Opening mood", board.clone())
        .await
        .unwrap();

    for (namespace, id) in [
        (Namespace::Profiles, saved_profile.id),
        (Namespace::ImageSets, saved_images.id),
        (Namespace::MoodBoards, saved_board.id),
    ] {
        let action = PendingAction::LoadItem { namespace, id };
        studio.request(action.clone());
        studio.commit(&action).await.unwrap();
    }

    assert_eq!(studio.state().character.as_ref(), Some(&profile));
    assert_eq!(studio.state().images, images);
    assert_eq!(studio.state().mood_board.as_ref(), Some(&board));
    // Only a storyline load touches the storyline and its dependents.
    assert_eq!(studio.state().storyline.as_deref(), Some("the working tale"));
}

#[tokio::test]
async fn onboarding_hint_is_shown_exactly_once() {
    let mut studio = studio();
    assert!(studio.onboarding_hint().await.unwrap().is_some());
    assert!(studio.onboarding_hint().await.unwrap().is_none());
    assert!(studio.library().tutorial_seen().await);
}

#[tokio::test]
async fn each_flow_requests_its_native_aspect_ratio() {
    let mut studio = studio_with_storyline("a long night in the port city");
    studio_driver(&studio).push_text("## Appearance\nA wiry pilot.");
    studio_driver(&studio).push_image();
    studio.character_profile("a pilot").await.unwrap();

    studio_driver(&studio).push_image();
    studio.generate_image("the harbor at dawn").await.unwrap();

    studio_driver(&studio).push_json(json!(["p1", "p2", "p3", "p4"]));
    for _ in 0..4 {
        studio_driver(&studio).push_image();
    }
    studio.mood_board().await.unwrap();

    let ratios = studio_driver(&studio).image_ratios.lock().unwrap().clone();
    assert_eq!(
        ratios,
        vec![
            AspectRatio::Portrait,
            AspectRatio::Widescreen,
            AspectRatio::Square,
            AspectRatio::Square,
            AspectRatio::Square,
            AspectRatio::Square,
        ]
    );
}

#[tokio::test]
async fn mood_board_prompt_failure_is_classified() {
    let mut studio = studio_with_storyline("a long night in the port city");
    studio_driver(&studio).push_json_error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "backend unavailable".to_string(),
    });

    let result = studio.mood_board().await;

    assert!(result.is_err());
    let error = studio.state().error(Section::MoodBoard).unwrap();
    assert_eq!(error.category, ErrorCategory::ServerSide);
    assert_eq!(studio_driver(&studio).image_call_count(), 0);
}

#[tokio::test]
async fn save_storyline_requires_content() {
    let mut studio = studio();
    assert!(studio.save_storyline("name").await.is_err());

    let mut with_content = studio_with_storyline("worth keeping");
    let item = with_content.save_storyline("Opening").await.unwrap();
    assert_eq!(item.content, "worth keeping");
}

/// Borrow the scripted driver back out of the studio.
fn studio_driver<'a>(
    studio: &'a Studio<MockDriver, MemoryStore>,
) -> &'a MockDriver {
    studio.driver()
}

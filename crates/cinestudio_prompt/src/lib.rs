//! Prompt construction for Cinestudio generation operations.
//!
//! Everything in this crate is a pure function over its inputs: system
//! instructions, the storyline style registry, character-tag substitution,
//! and Appearance-section extraction. No I/O happens here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod instructions;
mod style;
mod substitute;

pub use instructions::{
    CHARACTER_PROFILE_INSTRUCTION, IMAGE_PROMPT_PREFIX, MOOD_BOARD_PROMPT_INSTRUCTION,
    SCENE_BREAKDOWN_INSTRUCTION, STORYLINE_INSTRUCTION_BASE,
};
pub use style::StorylineStyle;
pub use substitute::{extract_appearance, substitute_character_tags};

/// Compose the full system instruction for storyline generation.
///
/// Combines the fixed storyteller instruction with the style-specific
/// instruction; the user's concept travels separately as the user message.
///
/// # Examples
///
/// ```
/// use cinestudio_prompt::{storyline_instruction, StorylineStyle};
///
/// let instruction = storyline_instruction(StorylineStyle::Drama);
/// assert!(instruction.contains("master storyteller"));
/// assert!(instruction.contains("Character-driven drama"));
/// ```
pub fn storyline_instruction(style: StorylineStyle) -> String {
    format!("{}\n\n{}", STORYLINE_INSTRUCTION_BASE, style.instruction())
}

/// Compose the full prompt for cinematic image generation.
///
/// # Examples
///
/// ```
/// use cinestudio_prompt::image_prompt;
///
/// let prompt = image_prompt("a rain-slicked neon alley");
/// assert!(prompt.ends_with("a rain-slicked neon alley"));
/// ```
pub fn image_prompt(description: &str) -> String {
    format!("{}{}", IMAGE_PROMPT_PREFIX, description)
}

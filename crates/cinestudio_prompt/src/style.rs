//! Storyline style registry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of storyline styles.
///
/// String keys are lowercase; unknown keys fall back to [`StorylineStyle::Cinematic`]
/// via [`StorylineStyle::from_key`].
///
/// # Examples
///
/// ```
/// use cinestudio_prompt::StorylineStyle;
///
/// assert_eq!(StorylineStyle::from_key("drama"), StorylineStyle::Drama);
/// assert_eq!(StorylineStyle::from_key("nonsense"), StorylineStyle::Cinematic);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StorylineStyle {
    /// Standard cinematic three-act structure
    #[default]
    Cinematic,
    /// High-octane action
    Action,
    /// Character-driven drama
    Drama,
    /// Sci-fi/futuristic
    Futuristic,
    /// Historical fiction
    Historical,
    /// Educational narrative
    Educational,
    /// Thriller/intense
    Intense,
    /// Parable/allegory
    Parable,
}

impl StorylineStyle {
    /// Look up a style by registry key, falling back to cinematic.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    /// Human-readable display name.
    pub fn name(&self) -> &'static str {
        match self {
            StorylineStyle::Cinematic => "Cinematic",
            StorylineStyle::Action => "Action",
            StorylineStyle::Drama => "Drama",
            StorylineStyle::Futuristic => "Futuristic",
            StorylineStyle::Historical => "Historical",
            StorylineStyle::Educational => "Educational",
            StorylineStyle::Intense => "Intense",
            StorylineStyle::Parable => "Parable",
        }
    }

    /// Style-specific instruction appended to the storyline system prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            StorylineStyle::Cinematic => "Style: Standard cinematic. Focus on strong character arcs, intriguing plot points, and vivid descriptions suitable for film. Ensure a clear three-act structure with potential for suspense, conflict, and resolution.",
            StorylineStyle::Action => "Style: High-octane action. Emphasize thrilling set-pieces, fast-paced events, and physical conflict. The plot should be driven by constant forward momentum and escalating stakes.",
            StorylineStyle::Drama => "Style: Character-driven drama. Focus on realistic characters, emotional depth, and interpersonal conflict. The story should explore complex themes and relationships.",
            StorylineStyle::Futuristic => "Style: Sci-fi/Futuristic. Create a story set in the future, incorporating advanced technology, speculative concepts, or dystopian/utopian societies. Explore the human condition in this new context.",
            StorylineStyle::Historical => "Style: Historical fiction. Set the story in a specific, well-researched historical period. The narrative should be grounded in the events, culture, and atmosphere of the time.",
            StorylineStyle::Educational => "Style: Educational narrative. Craft a story that teaches a specific concept, lesson, or piece of information. The educational content should be woven seamlessly into an engaging plot.",
            StorylineStyle::Intense => "Style: Thriller/Intense. Build suspense, tension, and a sense of dread. Use psychological elements, high stakes, and a palpable sense of danger to keep the audience on edge.",
            StorylineStyle::Parable => "Style: Parable/Allegory. Tell a simple story that illustrates a moral or spiritual lesson. The characters and events should be symbolic, representing broader concepts or ideas.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_key_round_trips() {
        for style in StorylineStyle::iter() {
            let key = style.to_string();
            assert_eq!(StorylineStyle::from_key(&key), style);
        }
    }

    #[test]
    fn unknown_key_falls_back_to_cinematic() {
        assert_eq!(StorylineStyle::from_key("noir"), StorylineStyle::Cinematic);
        assert_eq!(StorylineStyle::from_key(""), StorylineStyle::Cinematic);
    }

    #[test]
    fn fallback_uses_the_cinematic_instruction() {
        let unknown = StorylineStyle::from_key("does-not-exist");
        assert_eq!(
            unknown.instruction(),
            StorylineStyle::Cinematic.instruction()
        );
    }
}

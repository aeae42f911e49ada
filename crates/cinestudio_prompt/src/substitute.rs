//! Character-tag substitution and Appearance-section extraction.

use cinestudio_core::SavedProfile;
use regex::Regex;

/// Replace `[CHARACTER: <name>]` tags with a parenthetical appearance clause.
///
/// Each tag is handled independently in first-to-last order. The name is
/// looked up against the saved profiles by exact (trimmed) name; a tag whose
/// name has no saved profile passes through verbatim.
///
/// # Examples
///
/// ```
/// use cinestudio_core::{CharacterProfile, SavedProfile};
/// use cinestudio_prompt::substitute_character_tags;
///
/// let profiles = vec![SavedProfile::new(
///     "Zara",
///     CharacterProfile {
///         text: "**Appearance**: Tall, silver-haired.\n\n**Backstory**: Unknown.".to_string(),
///         image_url: String::new(),
///     },
/// )];
///
/// let out = substitute_character_tags("A duel with [CHARACTER: Zara] at dawn", &profiles);
/// assert!(!out.contains("[CHARACTER: Zara]"));
/// assert!(out.contains("(A character described as: Tall, silver-haired.)"));
/// ```
pub fn substitute_character_tags(text: &str, profiles: &[SavedProfile]) -> String {
    let re = Regex::new(r"\[CHARACTER:\s*([^\]]*?)\s*\]").expect("valid character tag regex");

    re.replace_all(text, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match profiles.iter().find(|p| p.name == name) {
            Some(profile) => {
                let appearance = extract_appearance(&profile.content.text);
                format!("(A character described as: {})", appearance.trim())
            }
            // Unknown name: leave the tag untouched.
            None => caps[0].to_string(),
        }
    })
    .into_owned()
}

/// Extract the content of the markdown "Appearance" section from a profile.
///
/// Recognizes `**Appearance**` and `#`-style headings, with or without a
/// trailing colon. Returns the section body up to the next section heading;
/// if no Appearance heading is found, returns the input unchanged.
///
/// # Examples
///
/// ```
/// use cinestudio_prompt::extract_appearance;
///
/// let profile = "**Appearance**: Wiry, storm-grey eyes.\n\n**Backstory**: Raised on a freighter.";
/// assert_eq!(extract_appearance(profile), "Wiry, storm-grey eyes.");
///
/// let plain = "A drifter with no written profile.";
/// assert_eq!(extract_appearance(plain), plain);
/// ```
pub fn extract_appearance(profile_text: &str) -> String {
    let re = Regex::new(
        r"(?is)(?:\*\*\s*appearance\s*\*\*|#+\s*appearance)\s*:?\s*\n?(.*?)(?:\n\s*(?:\*\*|#+\s)|\z)",
    )
    .expect("valid appearance section regex");

    match re.captures(profile_text) {
        Some(caps) => caps[1].trim().to_string(),
        None => profile_text.to_string(),
    }
}

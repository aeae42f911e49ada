//! User-facing error classification.
//!
//! Maps an opaque failure message into a category with a fixed title and
//! remedy text. Classification is advisory only and never triggers a retry;
//! the raw technical message is always preserved for display on demand.

use serde::{Deserialize, Serialize};

/// User-facing failure categories, in classification priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum ErrorCategory {
    /// The API credential is missing or rejected
    InvalidCredential,
    /// Too many requests in a short period
    RateLimited,
    /// Temporary failure on the service side
    ServerSide,
    /// Prompt or response was blocked by safety filters
    ContentSafety,
    /// Empty required field, caught before any AI call
    InputValidation,
    /// Anything that matched no known pattern
    Unknown,
}

/// A structured error for user-friendly display.
///
/// # Examples
///
/// ```
/// use cinestudio_error::{ErrorCategory, FriendlyError};
///
/// let friendly = FriendlyError::classify("HTTP 429 error: quota exceeded");
/// assert_eq!(friendly.category, ErrorCategory::RateLimited);
/// assert!(friendly.technical_message.contains("429"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendlyError {
    /// Classified category
    pub category: ErrorCategory,
    /// Short human-readable title
    pub title: String,
    /// The raw failure message, shown on demand
    pub technical_message: String,
    /// Multi-step remedy text, newline separated
    pub remedy: String,
}

impl FriendlyError {
    /// Classify a raw failure message into a friendly error.
    ///
    /// Matching is case-insensitive substring search, in priority order;
    /// the first match wins and `Unknown` is the fallback.
    pub fn classify(technical_message: impl Into<String>) -> Self {
        let technical_message = technical_message.into();
        let lowered = technical_message.to_lowercase();

        if lowered.contains("api key not valid") {
            return Self {
                category: ErrorCategory::InvalidCredential,
                title: "Invalid API Key".to_string(),
                technical_message,
                remedy: "It looks like the API key is missing or invalid. Here's how to fix it:\n\
                    1. Ensure you have a valid API key from Google AI Studio.\n\
                    2. The application reads the key from the GEMINI_API_KEY environment variable.\n\
                    3. Make sure this environment variable is set where you run the application.\n\
                    4. Restart the application after setting the environment variable."
                    .to_string(),
            };
        }

        if lowered.contains("429") || lowered.contains("resource has been exhausted") {
            return Self {
                category: ErrorCategory::RateLimited,
                title: "Request Limit Reached".to_string(),
                technical_message,
                remedy: "You've made too many requests in a short period.\n\
                    1. Please wait a few moments before trying again.\n\
                    2. If this issue persists, check your usage limits in your Google AI Platform dashboard."
                    .to_string(),
            };
        }

        if lowered.contains("500") || lowered.contains("internal error") {
            return Self {
                category: ErrorCategory::ServerSide,
                title: "Server Error".to_string(),
                technical_message,
                remedy: "There seems to be a temporary issue with the AI service.\n\
                    1. This is likely not a problem on your end.\n\
                    2. Please wait a few moments and try your request again."
                    .to_string(),
            };
        }

        if lowered.contains("prompt was blocked") || lowered.contains("safety settings") {
            return Self {
                category: ErrorCategory::ContentSafety,
                title: "Content Safety Issue".to_string(),
                technical_message,
                remedy: "The input prompt or the AI's response was flagged for safety reasons.\n\
                    1. Review your input text and remove any potentially sensitive or harmful content.\n\
                    2. Try rephrasing your prompt to be more neutral.\n\
                    3. If you believe this is a mistake, adjust the safety settings in your Google AI project."
                    .to_string(),
            };
        }

        Self {
            category: ErrorCategory::Unknown,
            title: "An Unexpected Error Occurred".to_string(),
            technical_message,
            remedy: "Something went wrong, but we're not sure what.\n\
                1. Try your request again in a few moments.\n\
                2. Run with --verbose for more detailed logs.\n\
                3. Ensure your internet connection is stable."
                .to_string(),
        }
    }

    /// Build an input-validation error for an empty required field.
    ///
    /// These are caught before any AI call and shown inline; they never go
    /// through classification.
    pub fn input_required(remedy: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::InputValidation,
            title: "Input Required".to_string(),
            technical_message: "User input was empty.".to_string(),
            remedy: remedy.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_classifies_as_rate_limited() {
        let friendly = FriendlyError::classify("HTTP 429 error: quota exceeded");
        assert_eq!(friendly.category, ErrorCategory::RateLimited);
        assert_eq!(friendly.title, "Request Limit Reached");
    }

    #[test]
    fn exhausted_resource_classifies_as_rate_limited() {
        let friendly = FriendlyError::classify("Resource has been exhausted (e.g. check quota).");
        assert_eq!(friendly.category, ErrorCategory::RateLimited);
    }

    #[test]
    fn bad_key_classifies_as_credential() {
        let friendly = FriendlyError::classify("400: API key not valid. Please pass a valid key.");
        assert_eq!(friendly.category, ErrorCategory::InvalidCredential);
        assert!(friendly.technical_message.contains("API key not valid"));
    }

    #[test]
    fn credential_outranks_rate_limit() {
        // Both substrings present: credential wins because it is checked first.
        let friendly = FriendlyError::classify("429: api key not valid");
        assert_eq!(friendly.category, ErrorCategory::InvalidCredential);
    }

    #[test]
    fn server_error_classifies_as_server_side() {
        let friendly = FriendlyError::classify("HTTP 500 error: Internal error encountered.");
        assert_eq!(friendly.category, ErrorCategory::ServerSide);
    }

    #[test]
    fn safety_block_classifies_as_content_safety() {
        let friendly = FriendlyError::classify("The prompt was blocked by safety settings");
        assert_eq!(friendly.category, ErrorCategory::ContentSafety);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let friendly = FriendlyError::classify("API KEY NOT VALID");
        assert_eq!(friendly.category, ErrorCategory::InvalidCredential);
    }

    #[test]
    fn unknown_message_falls_back_to_unknown() {
        let friendly = FriendlyError::classify("connection reset by peer");
        assert_eq!(friendly.category, ErrorCategory::Unknown);
        assert_eq!(friendly.technical_message, "connection reset by peer");
    }

    #[test]
    fn input_required_is_not_classified() {
        let friendly = FriendlyError::input_required("Please enter a concept first.");
        assert_eq!(friendly.category, ErrorCategory::InputValidation);
        assert_eq!(friendly.remedy, "Please enter a concept first.");
    }
}

//! Layered TOML configuration for the studio.
//!
//! Configuration sources merge with later sources taking precedence:
//! 1. Bundled defaults (cinestudio.toml shipped with the workspace)
//! 2. User config in home directory (~/.config/cinestudio/cinestudio.toml)
//! 3. User config in current directory (./cinestudio.toml)
//! 4. Environment variables (CINESTUDIO_MODELS__TEXT, etc.)
//!
//! The Gemini API key is deliberately not part of this file; it is read from
//! the `GEMINI_API_KEY` environment variable at client construction.

use cinestudio_error::{ConfigError, StudioResult};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Model identifiers for each generation modality.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model for text and structured-output requests
    pub text: String,
    /// Model for image generation
    pub image: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            text: "gemini-2.5-flash".to_string(),
            image: "imagen-4.0-generate-001".to_string(),
        }
    }
}

/// Default sampling parameters for text requests.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Output token ceiling
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_output_tokens: 8192,
        }
    }
}

/// Location of the saved-artifact library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct LibraryConfig {
    /// Directory for saved artifacts; platform data directory when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// Top-level Cinestudio configuration.
///
/// # Example
///
/// ```no_run
/// use cinestudio_models::StudioConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StudioConfig::load()?;
/// println!("text model: {}", config.models.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct StudioConfig {
    /// Model identifiers
    #[serde(default)]
    pub models: ModelConfig,
    /// Generation defaults
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Library location
    #[serde(default)]
    pub library: LibraryConfig,
}

impl StudioConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StudioResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled defaults.
    #[instrument]
    pub fn load() -> StudioResult<Self> {
        debug!("Loading layered configuration");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../cinestudio.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // User config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/cinestudio/cinestudio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // User config from current directory (optional)
        builder = builder.add_source(File::with_name("cinestudio").required(false));

        // Environment variables take final precedence
        builder = builder.add_source(Environment::with_prefix("CINESTUDIO").separator("__"));

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Resolve the library directory.
    ///
    /// Uses the configured path when present, otherwise the platform data
    /// directory (e.g. `~/.local/share/cinestudio`).
    pub fn library_dir(&self) -> StudioResult<PathBuf> {
        if let Some(path) = &self.library.path {
            return Ok(PathBuf::from(path));
        }
        dirs::data_dir()
            .map(|dir| dir.join("cinestudio"))
            .ok_or_else(|| ConfigError::new("No platform data directory available").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_name_shipping_models() {
        let config = StudioConfig::default();
        assert_eq!(config.models.text, "gemini-2.5-flash");
        assert_eq!(config.models.image, "imagen-4.0-generate-001");
        assert!(config.generation.temperature > 0.0);
    }

    #[test]
    fn bundled_defaults_parse() {
        let config: StudioConfig =
            toml_from_str(include_str!("../../../cinestudio.toml")).expect("bundled defaults");
        assert_eq!(config, {
            let mut expected = StudioConfig::default();
            expected.library.path = None;
            expected
        });
    }

    fn toml_from_str(raw: &str) -> Result<StudioConfig, config::ConfigError> {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn explicit_library_path_wins() {
        let config = StudioConfig {
            library: LibraryConfig {
                path: Some("/tmp/studio-test".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(
            config.library_dir().unwrap(),
            PathBuf::from("/tmp/studio-test")
        );
    }
}

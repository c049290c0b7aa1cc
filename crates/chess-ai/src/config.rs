//! Configuration file loading for move selection.
//!
//! The difficulty-to-depth policy lives in a TOML file so it can be tuned
//! without touching the search:
//!
//! ```toml
//! default_difficulty = "medium"
//!
//! [depths]
//! easy = 2
//! medium = 3
//! hard = 4
//! ```

use crate::{ConfigError, DepthTable, Difficulty};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Move selection configuration.
///
/// Every field has a default, so an empty file (or no file at all) gives
/// easy/medium/hard depths of 2/3/4 with medium used for requests that
/// name no difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AiConfig {
    /// Difficulty used when a request does not name one.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Search depth per difficulty.
    #[serde(default)]
    pub depths: DepthTable,
}

impl AiConfig {
    /// The file name looked up when no path is given.
    pub const DEFAULT_PATH: &'static str = "ai.toml";

    /// Loads the configuration from disk.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// [`ConfigError::Parse`] if it contains invalid TOML, or
    /// [`ConfigError::InvalidDepth`] if a depth is zero.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every difficulty searches at least one ply.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Difficulty::ALL
            .into_iter()
            .find(|&d| self.depths.depth(d) == 0)
        {
            Some(difficulty) => Err(ConfigError::InvalidDepth { difficulty }),
            None => Ok(()),
        }
    }

    /// Returns the search depth for a difficulty.
    pub fn depth(&self, difficulty: Difficulty) -> u32 {
        self.depths.depth(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = AiConfig::from_toml(
            r#"
default_difficulty = "hard"

[depths]
easy = 1
medium = 2
hard = 5
"#,
        )
        .unwrap();

        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.depth(Difficulty::Easy), 1);
        assert_eq!(config.depth(Difficulty::Medium), 2);
        assert_eq!(config.depth(Difficulty::Hard), 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AiConfig::from_toml("").unwrap();
        assert_eq!(config, AiConfig::default());
        assert_eq!(config.default_difficulty, Difficulty::Medium);
        assert_eq!(config.depth(Difficulty::Hard), 4);
    }

    #[test]
    fn test_partial_depth_table() {
        let config = AiConfig::from_toml("[depths]\nhard = 6\n").unwrap();
        assert_eq!(config.depth(Difficulty::Easy), 2);
        assert_eq!(config.depth(Difficulty::Medium), 3);
        assert_eq!(config.depth(Difficulty::Hard), 6);
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let result = AiConfig::from_toml("[depths]\nmedium = 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidDepth {
                difficulty: Difficulty::Medium
            })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AiConfig::from_toml("default_difficulty = \"expert\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AiConfig::from_toml("[depths\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AiConfig::load("/nonexistent/path/ai.toml").unwrap();
        assert_eq!(config, AiConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("chess-ai-config-{}.toml", std::process::id()));
        std::fs::write(&path, "default_difficulty = \"easy\"\n").unwrap();
        let config = AiConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.default_difficulty, Difficulty::Easy);
    }
}

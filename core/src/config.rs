//! Session configuration.
//!
//! Loaded from TOML, for example:
//!
//! ```toml
//! capacity = 15
//! page_size = 10
//! select_keys = "123456789"
//! case_insensitive_keys = true
//! dictionary = "data/zh_cn_pinyin.json"
//! ```

use crate::candidate::DEFAULT_PAGE_SIZE;
use crate::error::ConfigError;
use crate::input_buffer::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImeConfig {
    /// Maximum letters in one syllable
    pub capacity: usize,

    /// Candidates per page
    pub page_size: usize,

    /// Keys that pick a candidate on the current page while composing.
    /// First char selects the 1st candidate, etc.
    pub select_keys: String,

    /// Fall back to an ASCII case-insensitive key match on lookup
    pub case_insensitive_keys: bool,

    /// Dictionary document to load instead of the bundled one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,
}

impl Default for ImeConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            select_keys: "123456789".to_string(),
            case_insensitive_keys: true,
            dictionary: None,
        }
    }
}

impl ImeConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ImeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if let Some(ch) = self.select_keys.chars().find(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid(format!(
                "select key {ch:?} collides with syllable letters"
            )));
        }
        Ok(())
    }

    /// Check if a character is a selection key and return its index (0-based).
    pub fn selection_key_index(&self, ch: char) -> Option<usize> {
        self.select_keys.chars().position(|c| c == ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ImeConfig::default();
        assert_eq!(cfg.capacity, 15);
        assert_eq!(cfg.page_size, 10);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.selection_key_index('1'), Some(0));
        assert_eq!(cfg.selection_key_index('9'), Some(8));
        assert_eq!(cfg.selection_key_index('0'), None);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = ImeConfig::from_toml_str("page_size = 5\n").unwrap();
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.capacity, 15);
        assert!(cfg.dictionary.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ImeConfig::from_toml_str("capacity = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ImeConfig::from_toml_str("page_size = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ImeConfig::from_toml_str("select_keys = \"asdf\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ImeConfig::from_toml_str("capacity = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn toml_file_roundtrip() {
        let tmp = std::env::temp_dir().join(format!(
            "syllable_ime_config_test_{}.toml",
            std::process::id()
        ));
        let cfg = ImeConfig {
            capacity: 8,
            dictionary: Some(PathBuf::from("dict.json")),
            ..ImeConfig::default()
        };
        cfg.save_toml(&tmp).unwrap();
        let loaded = ImeConfig::load_toml(&tmp).unwrap();
        assert_eq!(loaded, cfg);
        let _ = std::fs::remove_file(tmp);
    }
}

//! Immutable pipeline configuration.
//!
//! Built once at start-up from defaults, an optional TOML file and CLI/env
//! overrides, then passed by reference into each component.

use std::path::Path;

use serde::Deserialize;

use crate::analysis::DEFAULT_TEMPLATE;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credentials for the text-understanding service. `None` means offline.
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API, without trailing slash.
    pub base_url: String,
    /// Model for classification and suggestions.
    pub classification_model: String,
    /// Model for enhancement of complex documents.
    pub conversion_model: String,
    pub default_template: String,
    pub request_timeout_secs: u64,
    pub compile_timeout_secs: u64,
    pub classification_excerpt_chars: usize,
    pub suggestion_excerpt_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            classification_model: "gpt-4o".to_string(),
            conversion_model: "gpt-4".to_string(),
            default_template: DEFAULT_TEMPLATE.to_string(),
            request_timeout_secs: 120,
            compile_timeout_secs: 60,
            classification_excerpt_chars: 2000,
            suggestion_excerpt_chars: 1000,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.classification_model, "gpt-4o");
        assert_eq!(c.conversion_model, "gpt-4");
        assert_eq!(c.default_template, "indian_government");
        assert_eq!(c.classification_excerpt_chars, 2000);
        assert!(!c.has_credentials());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = Config::from_toml_str(
            r#"
            default_template = "minimal"
            compile_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(c.default_template, "minimal");
        assert_eq!(c.compile_timeout_secs, 30);
        assert_eq!(c.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn blank_api_key_is_not_credentials() {
        let c = Config {
            api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(!c.has_credentials());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc2latex.toml");
        std::fs::write(&path, "api_key = \"sk-test\"\n").unwrap();
        let c = Config::load(&path).unwrap();
        assert!(c.has_credentials());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load(Path::new("/nonexistent/doc2latex.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::from_toml_str("default_template = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

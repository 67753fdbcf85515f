//! Editor configuration: TOML file, then environment overrides.
//!
//! ENV vars: STOREFRONT_API_URL, STOREFRONT_API_TOKEN,
//! STOREFRONT_REQUEST_TIMEOUT_SECS, STOREFRONT_HISTORY_DEPTH,
//! STOREFRONT_BLOCK_IDS, STOREFRONT_RECONCILE

use crate::blocks::IdStrategy;
use crate::buffer::ReconcilePolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ------------------------------------------------------------------
// 1. Configuration structs
// ------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub persistence: PersistenceConfig,
    pub history: HistoryConfig,
    pub editing: EditingConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PersistenceConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_seconds: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_depth: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditingConfig {
    pub block_ids: IdStrategy,
    pub reconcile: ReconcilePolicy,
    /// Open the editor of a block right after adding it.
    pub select_new_blocks: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api/theme".to_string(),
            api_token: None,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            block_ids: IdStrategy::Timestamp,
            reconcile: ReconcilePolicy::WholeObject,
            select_new_blocks: true,
        }
    }
}

// ------------------------------------------------------------------
// 2. Loading
// ------------------------------------------------------------------

impl EditorConfig {
    /// Reads a TOML file, applies environment overrides, validates.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading editor config {}", path.display()))?;
        let mut config: EditorConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing editor config {}", path.display()))?;

        config.apply_env()?;
        config.validate()?;
        info!(path = %path.display(), "editor config loaded");
        Ok(config)
    }

    /// Defaults plus environment (a `.env` file is honored).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = EditorConfig::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        dotenv::dotenv().ok();
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            self.persistence.api_url = url;
        }
        if let Some(token) = lookup("STOREFRONT_API_TOKEN") {
            self.persistence.api_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(raw) = lookup("STOREFRONT_REQUEST_TIMEOUT_SECS") {
            self.persistence.request_timeout_seconds = parse_number("STOREFRONT_REQUEST_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("STOREFRONT_HISTORY_DEPTH") {
            self.history.max_depth = parse_number("STOREFRONT_HISTORY_DEPTH", &raw)?;
        }
        if let Some(raw) = lookup("STOREFRONT_BLOCK_IDS") {
            self.editing.block_ids = match raw.as_str() {
                "timestamp" => IdStrategy::Timestamp,
                "uuid" => IdStrategy::Uuid,
                _ => return Err(invalid("STOREFRONT_BLOCK_IDS", &raw)),
            };
        }
        if let Some(raw) = lookup("STOREFRONT_RECONCILE") {
            self.editing.reconcile = match raw.as_str() {
                "whole-object" => ReconcilePolicy::WholeObject,
                "field-level" => ReconcilePolicy::FieldLevel,
                _ => return Err(invalid("STOREFRONT_RECONCILE", &raw)),
            };
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // 3. Validation
    // ------------------------------------------------------------------
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.persistence.api_url).map_err(|_| invalid("persistence.api_url", &self.persistence.api_url))?;
        if self.persistence.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("request timeout must be at least one second".to_string()));
        }
        if self.history.max_depth == 0 {
            return Err(ConfigError::Invalid("history depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[persistence]
api_url = "https://shop.example.com/api/theme"

[editing]
reconcile = "field-level"
"#
        )
        .unwrap();

        let config = EditorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.editing.reconcile, ReconcilePolicy::FieldLevel);
        assert_eq!(config.history.max_depth, 100);
        assert!(config.editing.select_new_blocks);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EditorConfig::from_file("/nonexistent/editor.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/editor.toml"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_API_TOKEN", "secret"),
            ("STOREFRONT_HISTORY_DEPTH", "5"),
            ("STOREFRONT_BLOCK_IDS", "uuid"),
        ]
        .into_iter()
        .collect();

        let mut config = EditorConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.persistence.api_token.as_deref(), Some("secret"));
        assert_eq!(config.history.max_depth, 5);
        assert_eq!(config.editing.block_ids, IdStrategy::Uuid);
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut config = EditorConfig::default();
        let result = config.apply_overrides(|key| (key == "STOREFRONT_RECONCILE").then(|| "sometimes".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn zero_depth_fails_validation() {
        let mut config = EditorConfig::default();
        config.history.max_depth = 0;
        assert!(config.validate().is_err());
    }
}

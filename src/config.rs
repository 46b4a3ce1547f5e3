//! Configuration management for the IMEC Hub browser.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages the API base URL, interface language and view preferences.

use crate::hub::Category;
use crate::i18n::Language;
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback API base when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable overriding `api_base`.
pub const API_BASE_ENV: &str = "IMEC_API_BASE";

/// How search results are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One section per record type, with counters
    #[default]
    Categorized,
    /// Uniform cards, first 24 results
    List,
}

impl ViewMode {
    /// Localization key of the view name.
    pub fn label_key(self) -> &'static str {
        match self {
            ViewMode::Categorized => "view.categorized",
            ViewMode::List => "view.list",
        }
    }

    /// Switch to the other view.
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Categorized => ViewMode::List,
            ViewMode::List => ViewMode::Categorized,
        }
    }
}

/// Application configuration structure.
///
/// Passed explicitly to the search client and the application state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hub API, without the `/search` path
    pub api_base: String,
    /// Interface language code
    pub lang: Language,
    /// Default result layout
    pub view: ViewMode,
    /// Fetch an unfiltered `/search` when the browser starts
    pub load_on_start: bool,
    /// Request timeout in seconds; no timeout when unset
    pub request_timeout_secs: Option<u64>,
    /// Restrict searches to these record types; empty means all
    pub categories: Vec<Category>,
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            lang: Language::Fr,
            view: ViewMode::Categorized,
            load_on_start: false,
            request_timeout_secs: None,
            categories: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/imec-hub/config.jsonc`
    /// 3. `~/.config/imec-hub/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path)?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_comments(&content))
            .with_context(|| format!("Failed to deserialize config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = Self::resolve_path(path)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/imec-hub/config.jsonc` or the
    ///   platform equivalent
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("imec-hub").join("config.jsonc"))
    }

    fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_config_path(),
        }
    }

    /// Apply `IMEC_API_BASE` from the environment, if set.
    pub fn apply_env_overrides(&mut self) {
        self.override_api_base(std::env::var(API_BASE_ENV).ok());
    }

    /// Replace `api_base` with a non-blank override.
    ///
    /// # Arguments
    /// * `api_base` - Candidate value from the environment or command line
    pub fn override_api_base(&mut self, api_base: Option<String>) {
        if let Some(api_base) = api_base.filter(|v| !v.trim().is_empty()) {
            self.api_base = api_base.trim().to_string();
        }
    }
}

/// Strip `//` line comments from JSONC content.
///
/// # Details
/// A `//` preceded by an odd number of quotes on the same line is treated as
/// part of a string (so URLs such as `"http://..."` survive). Escaped quotes
/// are not handled.
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut search_from = 0;
            while let Some(offset) = line[search_from..].find("//") {
                let comment_pos = search_from + offset;
                let quote_count = line[..comment_pos].matches('"').count();
                if quote_count % 2 == 0 {
                    return line[..comment_pos].trim_end();
                }
                search_from = comment_pos + 2;
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.lang, Language::Fr);
        assert_eq!(config.view, ViewMode::Categorized);
        assert!(!config.load_on_start);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let config = Config {
            api_base: "https://hub.example.org/api".to_string(),
            lang: Language::Ar,
            view: ViewMode::List,
            categories: vec![Category::Budget, Category::Legal],
            ..Config::default()
        };

        config.save(Some(&config_path)).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.api_base, "https://hub.example.org/api");
        assert_eq!(loaded.lang, Language::Ar);
        assert_eq!(loaded.view, ViewMode::List);
        assert_eq!(loaded.categories, vec![Category::Budget, Category::Legal]);
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // Hub API served by the FastAPI backend
            "api_base": "http://10.0.0.5:8000", // trailing comment
            "lang": "EN",
            "load_on_start": true
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.api_base, "http://10.0.0.5:8000");
        assert_eq!(loaded.lang, Language::En);
        assert!(loaded.load_on_start);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load(Some(&temp_dir.path().join("absent.jsonc"))).unwrap();
        assert_eq!(loaded.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_override_api_base_ignores_blank() {
        let mut config = Config::default();
        config.override_api_base(Some("   ".to_string()));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        config.override_api_base(None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        config.override_api_base(Some(" http://api:9000 ".to_string()));
        assert_eq!(config.api_base, "http://api:9000");
    }
}

//! Loader configuration persistence
//!
//! Stores deployment settings in `~/.config/hljs-loader/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::language::BundleLocator;
use crate::scanner::LANGUAGE_PREFIX;

/// Placeholder replaced by the bundle name in [`LoaderConfig::bundle_url_template`]
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Where the engine and its language bundles live, and what gets highlighted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// URL of the base highlighting engine, relative to the page
    #[serde(default = "default_base_engine_url")]
    pub base_engine_url: String,
    /// URL of a language bundle, with `{lang}` standing for the bundle name
    #[serde(default = "default_bundle_url_template")]
    pub bundle_url_template: String,
    /// Class prefix that marks a code block's language
    #[serde(default = "default_language_prefix")]
    pub language_prefix: String,
    /// Selector handed to the engine's highlight-all entry point
    #[serde(default = "default_selector")]
    pub selector: String,
}

fn default_base_engine_url() -> String {
    "_ch-highlight.js".to_string()
}

fn default_bundle_url_template() -> String {
    format!("_ch-hljs-lang-{}.min.js", LANG_PLACEHOLDER)
}

fn default_language_prefix() -> String {
    LANGUAGE_PREFIX.to_string()
}

fn default_selector() -> String {
    r#"pre code[class^="language-"]:not([data-highlighted="yes"])"#.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_engine_url: default_base_engine_url(),
            bundle_url_template: default_bundle_url_template(),
            language_prefix: default_language_prefix(),
            selector: default_selector(),
        }
    }
}

impl LoaderConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit path, falling back to defaults
    ///
    /// A file that parses but fails [`validate`](Self::validate) is rejected
    /// as a whole.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<LoaderConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => {
                        tracing::info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        tracing::warn!("Invalid config at {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.bundle_url_template.contains(LANG_PLACEHOLDER) {
            return Err(format!(
                "bundle_url_template {:?} has no {} placeholder",
                self.bundle_url_template, LANG_PLACEHOLDER
            ));
        }
        if self.language_prefix.is_empty() {
            return Err("language_prefix must not be empty".to_string());
        }
        Ok(())
    }

    pub fn locator(&self) -> BundleLocator {
        BundleLocator::new(&self.base_engine_url, &self.bundle_url_template)
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/wizstrings/wizstrings.toml`
//! 3. Local config: `<top_directory>/.wizstrings.toml`
//! 4. Environment variables: `WIZSTRINGS_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_CONTEXT;

/// Name of the local config file looked up in the scanned directory.
pub const LOCAL_CONFIG_FILE: &str = ".wizstrings.toml";

/// Unified configuration for wizstrings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Exact name of the wizard definition files (default: wizard.json)
    pub file_name: String,
    /// Keys starting with this prefix hold translatable strings (default: tr)
    pub key_prefix: String,
    /// Translation context for QT_TRANSLATE_NOOP (default: QtC::ProjectExplorer)
    pub context: String,
    /// Visit directory entries sorted by name (default: true)
    pub sort_entries: bool,
    /// Follow symlinked directories while scanning (default: false)
    pub follow_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_name: "wizard.json".into(),
            key_prefix: "tr".into(),
            context: DEFAULT_CONTEXT.into(),
            sort_entries: true,
            follow_links: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub file_name: Option<String>,
    pub key_prefix: Option<String>,
    pub context: Option<String>,
    pub sort_entries: Option<bool>,
    pub follow_links: Option<bool>,
}

/// Get the XDG config directory for wizstrings.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wizstrings").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("wizstrings.toml"))
}

/// Get the path to the local config file in a scanned directory.
pub fn local_config_path(top_dir: &Path) -> PathBuf {
    top_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            file_name: overlay
                .file_name
                .clone()
                .unwrap_or_else(|| self.file_name.clone()),
            key_prefix: overlay
                .key_prefix
                .clone()
                .unwrap_or_else(|| self.key_prefix.clone()),
            context: overlay
                .context
                .clone()
                .unwrap_or_else(|| self.context.clone()),
            sort_entries: overlay.sort_entries.unwrap_or(self.sort_entries),
            follow_links: overlay.follow_links.unwrap_or(self.follow_links),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `top_dir` - Optional scanned directory holding a local config
    pub fn load(top_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = top_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply WIZSTRINGS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("WIZSTRINGS"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("file_name") {
            settings.file_name = val;
        }
        if let Ok(val) = config.get_string("key_prefix") {
            settings.key_prefix = val;
        }
        if let Ok(val) = config.get_string("context") {
            settings.context = val;
        }
        match config.get_bool("sort_entries") {
            Ok(val) => settings.sort_entries = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_bool("follow_links") {
            Ok(val) => settings.follow_links = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# wizstrings configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/wizstrings/wizstrings.toml
#   Local:  <top_directory>/.wizstrings.toml
#   Env:    WIZSTRINGS_* environment variables

# Exact name of wizard definition files
# file_name = "wizard.json"

# Keys with this prefix hold translatable strings
# key_prefix = "tr"

# Translation context for QT_TRANSLATE_NOOP
# context = "QtC::ProjectExplorer"

# Visit directory entries sorted by name (reproducible output)
# sort_entries = true

# Follow symlinked directories while scanning
# follow_links = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

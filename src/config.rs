//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/texttree/texttree.toml`
//! 3. Local config: `<dir>/.texttree.toml`
//! 4. Environment variables: `TEXTTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Style;
use crate::render::TRUNCATION_MARKER;

/// Glyph configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleSettings {
    /// Indentation below a last sibling
    pub empty: String,
    /// Indentation below a sibling followed by others
    pub continuation: String,
    /// Connector of a non-last line
    pub branch: String,
    /// Connector of the last line
    pub last: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        let style = Style::default();
        Self {
            empty: style.empty,
            continuation: style.continuation,
            branch: style.branch,
            last: style.last,
        }
    }
}

/// Raw style config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyleSettings {
    pub empty: Option<String>,
    pub continuation: Option<String>,
    pub branch: Option<String>,
    pub last: Option<String>,
}

impl StyleSettings {
    pub fn to_style(&self) -> Style {
        Style::new(
            self.empty.clone(),
            self.continuation.clone(),
            self.branch.clone(),
            self.last.clone(),
        )
    }

    /// Overlay wins where it specifies a glyph.
    pub fn merge(&self, overlay: &RawStyleSettings) -> Self {
        Self {
            empty: overlay.empty.clone().unwrap_or_else(|| self.empty.clone()),
            continuation: overlay
                .continuation
                .clone()
                .unwrap_or_else(|| self.continuation.clone()),
            branch: overlay.branch.clone().unwrap_or_else(|| self.branch.clone()),
            last: overlay.last.clone().unwrap_or_else(|| self.last.clone()),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub style: RawStyleSettings,
    pub max_depth: Option<usize>,
    pub truncation_marker: Option<String>,
}

/// Unified configuration for texttree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Values shown per node before truncation (unlimited when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Line shown in place of truncated values
    pub truncation_marker: String,
    /// Default glyphs
    pub style: StyleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: None,
            truncation_marker: TRUNCATION_MARKER.to_string(),
            style: StyleSettings::default(),
        }
    }
}

/// Get the XDG config directory for texttree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "texttree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("texttree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".texttree.toml")
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
    /// Merge overlay config onto self (base): overlay wins if specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.or(self.max_depth),
            truncation_marker: overlay
                .truncation_marker
                .clone()
                .unwrap_or_else(|| self.truncation_marker.clone()),
            style: self.style.merge(&overlay.style),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.texttree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/texttree/texttree.toml`
    /// 3. Local config: `<local_dir>/.texttree.toml`
    /// 4. Environment variables: `TEXTTREE_*` prefix, `__` between levels
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TEXTTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TEXTTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("style.empty") {
            settings.style.empty = val;
        }
        if let Ok(val) = config.get_string("style.continuation") {
            settings.style.continuation = val;
        }
        if let Ok(val) = config.get_string("style.branch") {
            settings.style.branch = val;
        }
        if let Ok(val) = config.get_string("style.last") {
            settings.style.last = val;
        }
        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = Some(usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("TEXTTREE_MAX_DEPTH must not be negative: {val}"),
            })?);
        }
        if let Ok(val) = config.get_string("truncation_marker") {
            settings.truncation_marker = val;
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
        r#"# texttree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/texttree/texttree.toml
#   Local:  <dir>/.texttree.toml
#   Env:    TEXTTREE_* environment variables (e.g. TEXTTREE_STYLE__BRANCH)

# Values listed per node before a truncation marker (unlimited if unset)
# max_depth = 10

# Line shown in place of truncated values
# truncation_marker = "..."

[style]
# Indentation below a last sibling
# empty = "    "

# Indentation below a sibling followed by others
# continuation = "│   "

# Connector of a non-last line
# branch = "├── "

# Connector of the last line
# last = "└── "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (the twelve-node example tree)
//! 2. Global config: `$XDG_CONFIG_HOME/blindtree/blindtree.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `BLINDTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{parse_color, ApplicationError, DEFAULT_PALETTE};
use crate::domain::{SearchMethod, TreeConfig};

/// Unified configuration for blindtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used for membership checks and when no method is given
    pub method: SearchMethod,
    /// Layer colors, indexed by `depth % len`
    pub palette: Vec<String>,
    /// Shape of the tree to load
    pub tree: TreeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            method: SearchMethod::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            tree: TreeConfig::example(),
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub method: Option<SearchMethod>,
    pub palette: Option<Vec<String>>,
    pub tree: Option<TreeConfig>,
}

/// Get the XDG config directory for blindtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "blindtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("blindtree.toml"))
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
    /// Overlay wins for every field it specifies; a tree replaces the whole tree.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            method: overlay.method.unwrap_or(self.method),
            palette: overlay
                .palette
                .clone()
                .unwrap_or_else(|| self.palette.clone()),
            tree: overlay.tree.clone().unwrap_or_else(|| self.tree.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/blindtree/blindtree.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `BLINDTREE_*` prefix
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit file; a missing file is an error here
        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables replace values
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply BLINDTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("BLINDTREE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("palette")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("method") {
            settings.method = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get::<Vec<String>>("palette") {
            settings.palette = val;
        }

        Ok(settings)
    }

    /// Reject settings the presentation layer cannot use.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.palette.is_empty() {
            return Err(ApplicationError::Config {
                message: "palette must contain at least one color".into(),
            });
        }
        for color in &self.palette {
            parse_color(color)?;
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# blindtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/blindtree/blindtree.toml
#   File:   blindtree --config <file>
#   Env:    BLINDTREE_METHOD, BLINDTREE_PALETTE (comma separated)

# Traversal used for membership checks and as the default method: "bfs" or "dfs"
# method = "bfs"

# Layer colors, picked by depth % len
# palette = ["#55f", "#77f", "#99f", "#bbf", "#ddf", "#fff"]

# Tree shape: a root label and ordered parent -> children edges.
# A parent must be the root or a child listed in an earlier edge.
# [tree]
# root = "1"
#
# [[tree.edges]]
# parent = "1"
# children = ["2", "3", "4"]
#
# [[tree.edges]]
# parent = "2"
# children = ["5", "6"]
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

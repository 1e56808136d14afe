//! Configuration file support for Dockyard.
//!
//! Dockyard supports two configuration file locations:
//! - Global: `~/.dockyard/config.toml` - User-wide defaults
//! - Project: `.dockyard/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Swift version used when neither settings nor config name one.
pub const DEFAULT_SWIFT_VERSION: &str = "5.0";

/// Development region used when config does not name one.
pub const DEFAULT_DEVELOPMENT_REGION: &str = "en";

/// Helper command written into embed scripts by default.
pub const DEFAULT_EMBED_COMMAND: &str = "dockyard";

/// Dockyard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation settings
    pub generation: GenerationConfig,
}

/// Generation-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerationConfig {
    /// Default `SWIFT_VERSION` for targets that don't set one
    pub swift_version: Option<String>,

    /// Development region of generated projects
    pub development_region: Option<String>,

    /// Organization name recorded on generated projects
    pub organization_name: Option<String>,

    /// Name of the generated `.xcodeproj`; `{name}` expands to the project name
    pub project_name_template: Option<String>,

    /// Helper binary invoked by embed scripts
    pub embed_command: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let generation = other.generation;
        if generation.swift_version.is_some() {
            self.generation.swift_version = generation.swift_version;
        }
        if generation.development_region.is_some() {
            self.generation.development_region = generation.development_region;
        }
        if generation.organization_name.is_some() {
            self.generation.organization_name = generation.organization_name;
        }
        if generation.project_name_template.is_some() {
            self.generation.project_name_template = generation.project_name_template;
        }
        if generation.embed_command.is_some() {
            self.generation.embed_command = generation.embed_command;
        }
    }

    /// The Swift version forced onto targets without an explicit one.
    pub fn swift_version(&self) -> &str {
        self.generation
            .swift_version
            .as_deref()
            .unwrap_or(DEFAULT_SWIFT_VERSION)
    }

    /// The development region of generated projects.
    pub fn development_region(&self) -> &str {
        self.generation
            .development_region
            .as_deref()
            .unwrap_or(DEFAULT_DEVELOPMENT_REGION)
    }

    /// The helper command used in embed scripts.
    pub fn embed_command(&self) -> &str {
        self.generation
            .embed_command
            .as_deref()
            .unwrap_or(DEFAULT_EMBED_COMMAND)
    }

    /// Expand the project name template for a project.
    pub fn project_file_name(&self, name: &str) -> String {
        match &self.generation.project_name_template {
            Some(template) => template.replace("{name}", name),
            None => name.to_string(),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.dockyard/config.toml)
/// 2. Global config (~/.dockyard/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Load the configuration that applies to a project root.
pub fn load_config_for(root: &Path) -> Config {
    let global = global_config_path().unwrap_or_default();
    load_config(&global, &project_config_path(root))
}

/// Get the global dockyard config directory (~/.dockyard).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".dockyard"))
}

/// Get the global config path (~/.dockyard/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.dockyard/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".dockyard").join("config.toml")
}

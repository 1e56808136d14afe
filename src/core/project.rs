//! Project - a set of targets sharing a root directory and settings.

use std::path::{Path, PathBuf};

use crate::core::scheme::Scheme;
use crate::core::settings::Settings;
use crate::core::target::Target;

/// A loaded project.
///
/// There is exactly one Project per root path. The project owns its
/// targets; other projects refer to them through `Dependency::Project`.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute directory containing `Project.toml`
    pub path: PathBuf,

    pub name: String,

    /// Name of the generated `.xcodeproj`, without extension, if it differs
    /// from `name`
    pub file_name: Option<String>,

    pub settings: Settings,

    pub targets: Vec<Target>,

    pub schemes: Vec<Scheme>,
}

impl Project {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Project {
            path: path.into(),
            name: name.into(),
            file_name: None,
            settings: Settings::default(),
            targets: Vec::new(),
            schemes: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }

    /// Playgrounds are not declared; they are discovered on disk.
    pub fn playgrounds_pattern(&self) -> String {
        format!("{}/Playgrounds/*.playground", self.path.display())
    }
}

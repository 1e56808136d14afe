//! Dependency declarations.
//!
//! A Dependency describes what a target requires: another target of the same
//! project, a target of another project, a precompiled framework or library,
//! or a system SDK. Cross-project references are resolved by the graph
//! builder, never by the target itself.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Whether an SDK dependency must be present at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkStatus {
    #[default]
    Required,
    /// Weakly linked
    Optional,
}

/// A dependency of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// Another target in the same project
    Target { name: String },

    /// A target in the project rooted at `path`
    Project { target: String, path: PathBuf },

    /// A precompiled `.framework`
    Framework { path: PathBuf },

    /// A precompiled static or dynamic library
    Library {
        path: PathBuf,
        public_headers: PathBuf,
        swift_module_map: Option<PathBuf>,
    },

    /// A system framework (`.framework`) or text-based library (`.tbd`)
    Sdk { name: String, status: SdkStatus },
}

impl Dependency {
    pub fn target(name: impl Into<String>) -> Self {
        Dependency::Target { name: name.into() }
    }

    pub fn project(target: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Dependency::Project {
            target: target.into(),
            path: path.into(),
        }
    }

    pub fn framework(path: impl Into<PathBuf>) -> Self {
        Dependency::Framework { path: path.into() }
    }

    pub fn library(path: impl Into<PathBuf>, public_headers: impl Into<PathBuf>) -> Self {
        Dependency::Library {
            path: path.into(),
            public_headers: public_headers.into(),
            swift_module_map: None,
        }
    }

    pub fn sdk(name: impl Into<String>, status: SdkStatus) -> Self {
        Dependency::Sdk {
            name: name.into(),
            status,
        }
    }

    /// Project path of a cross-project reference.
    pub fn project_path(&self) -> Option<&PathBuf> {
        match self {
            Dependency::Project { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Target { name } => write!(f, "target `{}`", name),
            Dependency::Project { target, path } => {
                write!(f, "target `{}` of {}", target, path.display())
            }
            Dependency::Framework { path } => write!(f, "framework {}", path.display()),
            Dependency::Library { path, .. } => write!(f, "library {}", path.display()),
            Dependency::Sdk { name, status } => match status {
                SdkStatus::Required => write!(f, "sdk `{}`", name),
                SdkStatus::Optional => write!(f, "sdk `{}` (optional)", name),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_display() {
        assert_eq!(Dependency::target("Core").to_string(), "target `Core`");
        assert_eq!(
            Dependency::sdk("ARKit.framework", SdkStatus::Optional).to_string(),
            "sdk `ARKit.framework` (optional)"
        );
    }

    #[test]
    fn test_project_path() {
        let dep = Dependency::project("Shared", "/w/Shared");
        assert_eq!(dep.project_path(), Some(&PathBuf::from("/w/Shared")));
        assert_eq!(Dependency::target("Core").project_path(), None);
    }
}

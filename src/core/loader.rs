//! Model loading.
//!
//! A [`ModelLoader`] turns a directory holding a manifest into a model
//! object. [`load_projects`] walks `project` dependencies from a set of entry
//! projects and loads every project reachable from them, one wave at a time,
//! converting each wave in parallel.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::core::manifest::{self, ManifestError};
use crate::core::project::Project;
use crate::core::workspace::Workspace;
use crate::util::fs::FileSystem;

/// Loads projects and workspaces from their directories.
pub trait ModelLoader: Send + Sync {
    fn load_project(&self, path: &Path) -> Result<Project, ManifestError>;
    fn load_workspace(&self, path: &Path) -> Result<Workspace, ManifestError>;
}

/// Loads `Project.toml` and `Workspace.toml` manifests.
#[derive(Clone)]
pub struct TomlManifestLoader {
    fs: Arc<dyn FileSystem>,
}

impl TomlManifestLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        TomlManifestLoader { fs }
    }
}

impl ModelLoader for TomlManifestLoader {
    fn load_project(&self, path: &Path) -> Result<Project, ManifestError> {
        manifest::load_project(self.fs.as_ref(), path)
    }

    fn load_workspace(&self, path: &Path) -> Result<Workspace, ManifestError> {
        manifest::load_workspace(self.fs.as_ref(), path)
    }
}

/// Projects keyed by their root path.
pub type Projects = BTreeMap<PathBuf, Project>;

/// Load `entries` and every project they reference.
///
/// Entry projects must load. A referenced project without a manifest is
/// skipped so the graph builder can report the dangling reference with the
/// target that made it.
pub fn load_projects(loader: &dyn ModelLoader, entries: &[PathBuf]) -> Result<Projects, ManifestError> {
    let mut projects = Projects::new();
    let mut wave: Vec<PathBuf> = unique_sorted(entries.iter().cloned());
    let mut attempted: BTreeSet<PathBuf> = BTreeSet::new();
    let mut first_wave = true;

    while !wave.is_empty() {
        tracing::debug!("loading {} project(s)", wave.len());

        let results: Vec<(PathBuf, Result<Project, ManifestError>)> = wave
            .par_iter()
            .map(|path| (path.clone(), loader.load_project(path)))
            .collect();

        for (path, result) in results {
            match result {
                Ok(project) => {
                    projects.insert(path, project);
                }
                Err(ManifestError::ManifestNotFound { path: missing }) if !first_wave => {
                    tracing::debug!("referenced project has no manifest: {}", missing.display());
                }
                Err(e) => return Err(e),
            }
        }

        attempted.extend(wave.drain(..));
        wave = unique_sorted(
            projects
                .values()
                .flat_map(|p| p.targets.iter())
                .flat_map(|t| t.dependencies.iter())
                .filter_map(|d| d.project_path())
                .filter(|p| !attempted.contains(*p))
                .cloned(),
        );
        first_wave = false;
    }

    Ok(projects)
}

fn unique_sorted(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    paths.collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockFileSystem;

    fn manifest(name: &str, deps: &str) -> String {
        format!(
            r#"
[project]
name = "{name}"

[[targets]]
name = "{name}"
platform = "ios"
product = "framework"
bundle-id = "io.{name}"
dependencies = [{deps}]
"#
        )
    }

    #[test]
    fn test_load_projects_follows_references() {
        let fs = MockFileSystem::new()
            .with_file_contents(
                "/w/App/Project.toml",
                manifest("App", r#"{ project = "../Core", target = "Core" }"#),
            )
            .with_file_contents(
                "/w/Core/Project.toml",
                manifest("Core", r#"{ project = "../Base", target = "Base" }"#),
            )
            .with_file_contents("/w/Base/Project.toml", manifest("Base", ""));
        let loader = TomlManifestLoader::new(Arc::new(fs));

        let projects = load_projects(&loader, &[PathBuf::from("/w/App")]).unwrap();
        let names: Vec<&str> = projects.values().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["App", "Base", "Core"]);
    }

    #[test]
    fn test_load_projects_skips_dangling_reference() {
        let fs = MockFileSystem::new().with_file_contents(
            "/w/App/Project.toml",
            manifest("App", r#"{ project = "../Gone", target = "Gone" }"#),
        );
        let loader = TomlManifestLoader::new(Arc::new(fs));

        let projects = load_projects(&loader, &[PathBuf::from("/w/App")]).unwrap();
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn test_load_projects_entry_must_exist() {
        let loader = TomlManifestLoader::new(Arc::new(MockFileSystem::new()));
        let err = load_projects(&loader, &[PathBuf::from("/w/App")]).unwrap_err();
        assert!(matches!(err, ManifestError::ManifestNotFound { .. }));
    }
}

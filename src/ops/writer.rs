//! Writing generated containers to disk.
//!
//! Every container is first rendered into a temporary directory next to its
//! destination. Only once all of them rendered are the destinations
//! replaced, so a failed run leaves the previous output untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tempfile::TempDir;

use crate::generator::{GeneratedProject, GeneratedWorkspace};
use crate::util::fs::{file_name, remove_dir_all_if_exists, write_string};
use crate::xcode::SchemeDocument;

/// Data file of a project container.
pub const PROJECT_FILE: &str = "project.json";

/// Data file of a workspace container.
pub const WORKSPACE_FILE: &str = "contents.json";

/// Owner of user schemes when `USER` is not set.
const DEFAULT_USER: &str = "dockyard";

/// A rendered container waiting to replace its destination.
struct Staged {
    _dir: TempDir,
    rendered: PathBuf,
    destination: PathBuf,
}

/// Write every project of `workspace` and then the workspace itself.
///
/// Returns the container paths in the order they were written.
pub fn write_workspace(workspace: &GeneratedWorkspace) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(workspace.projects.len() + 1);
    for project in workspace.projects.values() {
        staged.push(stage(&project.path, |dir| render_project(project, dir))?);
    }
    staged.push(stage(&workspace.path, |dir| {
        write_json(&dir.join(WORKSPACE_FILE), &workspace.data)?;
        write_schemes(&workspace.schemes, dir)
    })?);

    commit(staged)
}

/// Write a single project container.
pub fn write_project(project: &GeneratedProject) -> Result<PathBuf> {
    let staged = stage(&project.path, |dir| render_project(project, dir))?;
    let mut written = commit(vec![staged])?;
    written
        .pop()
        .ok_or_else(|| anyhow!("nothing was written for {}", project.path.display()))
}

fn render_project(project: &GeneratedProject, dir: &Path) -> Result<()> {
    write_json(&dir.join(PROJECT_FILE), &project.pbxproj)?;
    write_schemes(&project.schemes, dir)
}

/// Shared schemes go to `xcshareddata`, the others to the current user's
/// `xcuserdata`.
fn write_schemes(schemes: &[SchemeDocument], container: &Path) -> Result<()> {
    for scheme in schemes {
        let dir = if scheme.shared {
            container.join("xcshareddata").join("xcschemes")
        } else {
            container
                .join("xcuserdata")
                .join(format!("{}.xcuserdatad", current_user()))
                .join("xcschemes")
        };
        write_json(&dir.join(format!("{}.json", scheme.name)), scheme)?;
    }
    Ok(())
}

fn current_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_string())
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    json.push('\n');
    write_string(path, &json)
}

/// Render a container into a temporary directory beside `destination`.
fn stage(destination: &Path, render: impl FnOnce(&Path) -> Result<()>) -> Result<Staged> {
    let parent = destination
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", destination.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory: {}", parent.display()))?;

    let dir = tempfile::Builder::new()
        .prefix(".dockyard-")
        .tempdir_in(parent)
        .with_context(|| format!("failed to create a temporary directory in {}", parent.display()))?;
    let rendered = dir.path().join(file_name(destination));
    fs::create_dir_all(&rendered)?;
    render(&rendered)?;

    Ok(Staged {
        _dir: dir,
        rendered,
        destination: destination.to_path_buf(),
    })
}

fn commit(staged: Vec<Staged>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(staged.len());
    for container in staged {
        remove_dir_all_if_exists(&container.destination)?;
        fs::rename(&container.rendered, &container.destination).with_context(|| {
            format!(
                "failed to move {} into place",
                container.destination.display()
            )
        })?;
        tracing::debug!("wrote {}", container.destination.display());
        written.push(container.destination);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::xcode::{PbxProj, WorkspaceData, WorkspaceDataElement};

    fn scheme(name: &str, shared: bool) -> SchemeDocument {
        SchemeDocument {
            name: name.to_string(),
            shared,
            version: "1.3".to_string(),
            build_action: None,
            test_action: None,
            launch_action: None,
        }
    }

    fn project(root: &Path) -> GeneratedProject {
        GeneratedProject {
            name: "App".to_string(),
            path: root.join("App").join("App.xcodeproj"),
            pbxproj: PbxProj::new(),
            targets: BTreeMap::new(),
            schemes: vec![scheme("App", true), scheme("Scratch", false)],
        }
    }

    #[test]
    fn test_write_project_layout() {
        let tmp = TempDir::new().unwrap();
        let generated = project(tmp.path());
        let written = write_project(&generated).unwrap();

        assert_eq!(written, generated.path);
        assert!(written.join(PROJECT_FILE).is_file());
        assert!(written.join("xcshareddata/xcschemes/App.json").is_file());
        let user_schemes = written.join("xcuserdata");
        assert!(!written.join("xcshareddata/xcschemes/Scratch.json").exists());
        assert!(user_schemes.is_dir());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(written.join(PROJECT_FILE)).unwrap()).unwrap();
        assert_eq!(json["objectVersion"], 50);
    }

    #[test]
    fn test_write_replaces_previous_output() {
        let tmp = TempDir::new().unwrap();
        let generated = project(tmp.path());
        let stale = generated.path.join("stale.json");
        write_string(&stale, "{}").unwrap();

        write_project(&generated).unwrap();
        assert!(!stale.exists());
        assert!(generated.path.join(PROJECT_FILE).exists());

        let leftovers: Vec<_> = fs::read_dir(tmp.path().join("App"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".dockyard-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_workspace() {
        let tmp = TempDir::new().unwrap();
        let generated_project = project(tmp.path());
        let workspace = GeneratedWorkspace {
            name: "Acme".to_string(),
            path: tmp.path().join("Acme.xcworkspace"),
            data: WorkspaceData::new(vec![WorkspaceDataElement::file("App/App.xcodeproj")]),
            schemes: vec![scheme("All", true)],
            projects: [(tmp.path().join("App"), generated_project)].into_iter().collect(),
        };

        let written = write_workspace(&workspace).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1], workspace.path);

        let contents = fs::read_to_string(workspace.path.join(WORKSPACE_FILE)).unwrap();
        assert!(contents.contains("group:App/App.xcodeproj"));
        assert!(workspace.path.join("xcshareddata/xcschemes/All.json").is_file());
    }
}

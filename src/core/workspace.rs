//! Workspace - several projects plus loose files shown side by side.

use std::path::{Path, PathBuf};

use crate::core::scheme::Scheme;

/// A file listed in a workspace manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileElement {
    File { path: PathBuf },
    /// A directory shown as one opaque reference
    FolderReference { path: PathBuf },
}

impl FileElement {
    pub fn path(&self) -> &Path {
        match self {
            FileElement::File { path } | FileElement::FolderReference { path } => path,
        }
    }
}

/// A loaded workspace.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Absolute directory containing `Workspace.toml`
    pub path: PathBuf,

    pub name: String,

    /// Absolute roots of the member projects, in manifest order
    pub projects: Vec<PathBuf>,

    pub schemes: Vec<Scheme>,

    pub additional_files: Vec<FileElement>,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Workspace {
            path: path.into(),
            name: name.into(),
            projects: Vec::new(),
            schemes: Vec::new(),
            additional_files: Vec::new(),
        }
    }

    /// A workspace wrapping a single project, used when generating a
    /// project directory without a `Workspace.toml`.
    pub fn for_project(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let path = path.into();
        let mut workspace = Workspace::new(path.clone(), name);
        workspace.projects.push(path);
        workspace
    }
}

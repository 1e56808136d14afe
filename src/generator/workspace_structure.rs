//! Directory tree of a workspace.
//!
//! Projects, files and folder references are placed below the common
//! ancestor of the workspace directory and every entry. Intermediate
//! directories become groups; a directory that is itself listed as a file is
//! dropped unless it is a container such as a `.playground`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::workspace::{FileElement, Workspace};
use crate::util::fs::{common_ancestor, extension, file_name, FileSystem};

/// Directories that are shown as a single file.
const CONTAINER_EXTENSIONS: &[&str] = &["xcodeproj", "xcworkspace", "playground"];

/// An entry of a workspace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureElement {
    File {
        path: PathBuf,
    },
    FolderReference {
        path: PathBuf,
    },
    /// The root directory of a generated project
    Project {
        path: PathBuf,
    },
    Group {
        name: String,
        path: PathBuf,
        contents: Vec<StructureElement>,
    },
}

impl StructureElement {
    pub fn path(&self) -> &Path {
        match self {
            StructureElement::File { path }
            | StructureElement::FolderReference { path }
            | StructureElement::Project { path }
            | StructureElement::Group { path, .. } => path,
        }
    }
}

/// The tree of one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceStructure {
    pub name: String,
    pub contents: Vec<StructureElement>,
}

enum Entry {
    Leaf(StructureElement),
    Directory(usize),
}

struct Directory {
    path: PathBuf,
    entries: Vec<Entry>,
}

/// Directories by absolute path, created on first use.
struct DirectoryTree {
    directories: Vec<Directory>,
    index: HashMap<PathBuf, usize>,
}

impl DirectoryTree {
    fn new(root: PathBuf) -> Self {
        let mut index = HashMap::new();
        index.insert(root.clone(), 0);
        DirectoryTree {
            directories: vec![Directory {
                path: root,
                entries: Vec::new(),
            }],
            index,
        }
    }

    /// The directory at `path`, creating it and its parents below the root.
    fn directory(&mut self, path: &Path) -> usize {
        if let Some(&id) = self.index.get(path) {
            return id;
        }

        let parent = match path.parent() {
            Some(parent) => self.directory(parent),
            None => 0,
        };
        let id = self.directories.len();
        self.directories.push(Directory {
            path: path.to_path_buf(),
            entries: Vec::new(),
        });
        self.index.insert(path.to_path_buf(), id);
        self.directories[parent].entries.push(Entry::Directory(id));
        id
    }

    fn insert(&mut self, element: StructureElement) {
        let parent = match element.path().parent() {
            Some(parent) => self.directory(parent),
            None => 0,
        };
        self.directories[parent].entries.push(Entry::Leaf(element));
    }

    fn contents(&self, id: usize) -> Vec<StructureElement> {
        let mut contents: Vec<StructureElement> = self.directories[id]
            .entries
            .iter()
            .map(|entry| match entry {
                Entry::Leaf(element) => element.clone(),
                Entry::Directory(child) => {
                    let path = self.directories[*child].path.clone();
                    StructureElement::Group {
                        name: file_name(&path),
                        contents: self.contents(*child),
                        path,
                    }
                }
            })
            .collect();
        // Stable, so a project stays ahead of a group or folder at its path.
        contents.sort_by(|a, b| a.path().cmp(b.path()));
        contents
    }
}

pub struct WorkspaceStructureGenerator<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> WorkspaceStructureGenerator<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        WorkspaceStructureGenerator { fs }
    }

    /// Build the tree of `workspace` with `projects` as its project roots.
    pub fn generate_structure(&self, workspace: &Workspace, projects: &[PathBuf]) -> WorkspaceStructure {
        let mut elements: Vec<StructureElement> = projects
            .iter()
            .map(|path| StructureElement::Project { path: path.clone() })
            .collect();
        elements.extend(
            workspace
                .additional_files
                .iter()
                .filter_map(|file| self.file_element(file)),
        );

        let root = common_ancestor(
            std::iter::once(workspace.path.as_path())
                .chain(elements.iter().filter_map(|e| e.path().parent())),
        )
        .unwrap_or_else(|| workspace.path.clone());

        let mut tree = DirectoryTree::new(root);
        for element in elements {
            tree.insert(element);
        }

        WorkspaceStructure {
            name: workspace.name.clone(),
            contents: tree.contents(0),
        }
    }

    fn file_element(&self, file: &FileElement) -> Option<StructureElement> {
        match file {
            FileElement::File { path } => {
                if self.fs.is_dir(path) && !is_container(path) {
                    tracing::debug!("skipping directory {} listed as a file", path.display());
                    return None;
                }
                Some(StructureElement::File { path: path.clone() })
            }
            FileElement::FolderReference { path } => {
                if !self.fs.exists(path) {
                    tracing::warn!("folder reference {} does not exist", path.display());
                    return None;
                }
                if !self.fs.is_dir(path) {
                    tracing::warn!("folder reference {} is not a directory", path.display());
                    return None;
                }
                Some(StructureElement::FolderReference { path: path.clone() })
            }
        }
    }
}

fn is_container(path: &Path) -> bool {
    extension(path).is_some_and(|ext| CONTAINER_EXTENSIONS.contains(&ext))
}

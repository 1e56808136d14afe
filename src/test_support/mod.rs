//! Test utilities and mocks for Dockyard unit tests.
//!
//! This module provides an in-memory [`FileSystem`] and model fixtures so
//! loading and generation can be tested without touching the real
//! filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use dockyard::test_support::{MockFileSystem, project, target};
//!
//! #[test]
//! fn test_example() {
//!     let fs = MockFileSystem::new().with_file("/p/Sources/main.swift");
//!     let project = project("/p", "App").with_target(target("App", Product::App));
//!     // Use the mock in tests...
//! }
//! ```

pub mod fixtures;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use glob::{MatchOptions, Pattern};

use crate::util::fs::FileSystem;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock filesystem for testing without real I/O.
///
/// Adding a file or directory registers all of its parent directories.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    /// Directories passed to `read_dir`, in call order
    listed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        MockFileSystem::default()
    }

    /// Add an empty file.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.add_file(path, Vec::new());
        self
    }

    /// Add a file with the given content.
    pub fn with_file_contents(mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Add a directory.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let mut current = Some(path.as_ref());
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() || !self.dirs.insert(dir.to_path_buf()) {
                break;
            }
            current = dir.parent();
        }
    }

    /// Every directory listed through `read_dir` so far.
    pub fn listed_dirs(&self) -> Vec<PathBuf> {
        self.listed
            .lock()
            .map(|listed| listed.clone())
            .unwrap_or_default()
    }

    /// Every known path, files and directories.
    fn entries(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys().chain(self.dirs.iter())
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if let Ok(mut listed) = self.listed.lock() {
            listed.push(path.to_path_buf());
        }
        if !self.is_dir(path) {
            return Err(anyhow!("not a directory: {}", path.display()));
        }
        let mut children: Vec<PathBuf> = self
            .entries()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        children.sort();
        children.dedup();
        Ok(children)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = Pattern::new(pattern).map_err(|e| anyhow!("invalid glob pattern: {}", e))?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let mut results: Vec<PathBuf> = self
            .entries()
            .filter(|p| pattern.matches_path_with(p, options))
            .cloned()
            .collect();
        results.sort();
        results.dedup();
        Ok(results)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self
            .files
            .get(path)
            .ok_or_else(|| anyhow!("file not found: {}", path.display()))?;
        String::from_utf8(bytes.clone()).map_err(|e| anyhow!("invalid UTF-8: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_registers_parents() {
        let fs = MockFileSystem::new().with_file("/p/Sources/main.swift");
        assert!(fs.is_dir(Path::new("/p/Sources")));
        assert!(fs.is_dir(Path::new("/p")));
        assert!(fs.is_file(Path::new("/p/Sources/main.swift")));
        assert!(!fs.exists(Path::new("/p/Other")));
    }

    #[test]
    fn test_mock_fs_read_dir() {
        let fs = MockFileSystem::new()
            .with_file("/p/en.lproj/Main.storyboard")
            .with_file("/p/en.lproj/Localizable.strings")
            .with_file("/p/en.lproj/Nested/Deep.txt");
        let children = fs.read_dir(Path::new("/p/en.lproj")).unwrap();
        assert_eq!(
            children,
            vec![
                PathBuf::from("/p/en.lproj/Localizable.strings"),
                PathBuf::from("/p/en.lproj/Main.storyboard"),
                PathBuf::from("/p/en.lproj/Nested"),
            ]
        );
    }

    #[test]
    fn test_mock_fs_glob() {
        let fs = MockFileSystem::new()
            .with_file("/p/Sources/a.swift")
            .with_file("/p/Sources/Sub/b.swift")
            .with_file("/p/Sources/c.m");
        let matches = fs.glob("/p/Sources/**/*.swift").unwrap();
        assert_eq!(
            matches,
            vec![
                PathBuf::from("/p/Sources/Sub/b.swift"),
                PathBuf::from("/p/Sources/a.swift"),
            ]
        );
        assert_eq!(fs.glob("/p/Sources/*.swift").unwrap().len(), 1);
    }

    #[test]
    fn test_mock_fs_read_to_string() {
        let fs = MockFileSystem::new().with_file_contents("/p/Project.toml", "[project]");
        assert_eq!(fs.read_to_string(Path::new("/p/Project.toml")).unwrap(), "[project]");
        assert!(fs.read_to_string(Path::new("/p/Missing.toml")).is_err());
    }
}

//! Filesystem utilities.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

/// Directory extensions Xcode treats as a single opaque file.
pub const FILE_PACKAGE_EXTENSIONS: &[&str] = &[
    "xcassets",
    "scnassets",
    "bundle",
    "framework",
    "xcframework",
    "playground",
    "xcodeproj",
    "xcworkspace",
    "xcmappingmodel",
    "rcproject",
    "mlmodelc",
];

/// Read-only view of the filesystem used while loading and generating.
///
/// Generation code only ever asks questions through this trait so tests can
/// run against an in-memory tree.
pub trait FileSystem: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.exists(path) && !self.is_dir(path)
    }

    /// Immediate children of a directory, sorted.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Expand an absolute glob pattern. Results are sorted.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?
        {
            children.push(entry?.path());
        }
        children.sort();
        Ok(children)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut results = Vec::new();
        for entry in glob(pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
            match entry {
                Ok(path) => results.push(path),
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
        results.sort();
        results.dedup();
        Ok(results)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Recursively copy a directory.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Whether a manifest entry is a glob pattern rather than a literal path.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Find files matching a glob pattern relative to a base directory.
pub fn glob_files(fs: &dyn FileSystem, base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let mut results: Vec<PathBuf> = fs
        .glob(&full_pattern.to_string_lossy())?
        .into_iter()
        .filter(|path| !fs.is_dir(path))
        .collect();

    results.sort();
    results.dedup();
    Ok(results)
}

/// Like [`glob_files`], but file packages (asset catalogs, bundles, ...) are
/// returned as one entry instead of their contents.
pub fn glob_resources(fs: &dyn FileSystem, base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);

    let mut results = Vec::new();
    for path in fs.glob(&full_pattern.to_string_lossy())? {
        if let Some(package) = enclosing_file_package(base, &path) {
            results.push(package);
        } else if !fs.is_dir(&path) {
            results.push(path);
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Returns the outermost file package containing `path` (or `path` itself),
/// looking only at components below `base`.
fn enclosing_file_package(base: &Path, path: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(base).ok()?;
    let mut current = base.to_path_buf();
    for component in relative.components() {
        current.push(component);
        if is_file_package(&current) {
            return Some(current);
        }
    }
    None
}

/// Whether a directory path is treated as a single file by Xcode.
pub fn is_file_package(path: &Path) -> bool {
    extension(path).is_some_and(|ext| FILE_PACKAGE_EXTENSIONS.contains(&ext))
}

/// The extension of a path as a `&str`, if any.
pub fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// The last component of a path as a `String`.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lexically normalize a path, resolving `.` and `..` without touching disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Relative path rendered with `/` separators, as Xcode stores it.
pub fn relative_string(base: &Path, path: &Path) -> String {
    path_string(&relative_path(base, path))
}

/// Render a path with `/` separators.
pub fn path_string(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// The deepest directory that contains every given path.
pub fn common_ancestor<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    let mut iter = paths.into_iter();
    let mut ancestor = iter.next()?.to_path_buf();
    for path in iter {
        while !path.starts_with(&ancestor) {
            if !ancestor.pop() {
                return None;
            }
        }
    }
    Some(ancestor)
}

/// The relative path of the first tree element below `source_root` on the way
/// to `path`.
///
/// Leading `.` and `..` components are folded together with the first real
/// component, so `../../d/file.swift` yields `../../d`.
pub fn closest_relative_element_path(path: &Path, source_root: &Path) -> PathBuf {
    let components: Vec<String> = relative_path(source_root, path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let mut first = Vec::new();
    for component in &components {
        let last_is_marker = first
            .last()
            .is_some_and(|last: &&String| last.as_str() == ".." || last.as_str() == ".");
        if !first.is_empty() && !last_is_marker {
            break;
        }
        first.push(component);
    }

    if first.is_empty() {
        return components.first().map(PathBuf::from).unwrap_or_default();
    }
    PathBuf::from(
        first
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

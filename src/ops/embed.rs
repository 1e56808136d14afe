//! Implementation of `dockyard embed`, the helper run by the
//! "Embed Precompiled Frameworks" script phase.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::util::fs::{copy_dir_all, file_name, remove_dir_all_if_exists};

/// Build environment the embed phase runs in.
#[derive(Debug, Clone, Default)]
pub struct EmbedEnvironment {
    /// `$SRCROOT`, the project directory
    pub src_root: PathBuf,
    /// `$BUILT_PRODUCTS_DIR`
    pub built_products_dir: PathBuf,
    /// `$FRAMEWORKS_FOLDER_PATH`, relative to the built products
    pub frameworks_folder_path: PathBuf,
}

impl EmbedEnvironment {
    /// Read the environment Xcode sets for script phases.
    pub fn from_env() -> Result<Self> {
        Ok(EmbedEnvironment {
            src_root: env_path("SRCROOT")?,
            built_products_dir: env_path("BUILT_PRODUCTS_DIR")?,
            frameworks_folder_path: env_path("FRAMEWORKS_FOLDER_PATH")?,
        })
    }
}

fn env_path(name: &str) -> Result<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .with_context(|| format!("`{}` is not set; run this from an embed build phase", name))
}

/// Copy the framework at `framework`, relative to `$SRCROOT`, into the
/// frameworks folder of the built product. Returns the copy's path.
pub fn embed(framework: &Path, env: &EmbedEnvironment) -> Result<PathBuf> {
    let source = env.src_root.join(framework);
    if !source.is_dir() {
        bail!("framework not found: {}", source.display());
    }

    let destination = env
        .built_products_dir
        .join(&env.frameworks_folder_path)
        .join(file_name(&source));
    remove_dir_all_if_exists(&destination)?;
    copy_dir_all(&source, &destination)?;

    tracing::info!("embedded {} into {}", file_name(&source), destination.display());
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(tmp: &Path) -> EmbedEnvironment {
        EmbedEnvironment {
            src_root: tmp.join("src"),
            built_products_dir: tmp.join("build"),
            frameworks_folder_path: PathBuf::from("App.app/Frameworks"),
        }
    }

    #[test]
    fn test_embed_copies_framework() {
        let tmp = TempDir::new().unwrap();
        let framework = tmp.path().join("src/Vendor/Foo.framework");
        fs::create_dir_all(framework.join("Headers")).unwrap();
        fs::write(framework.join("Foo"), b"binary").unwrap();
        fs::write(framework.join("Headers/Foo.h"), b"// header").unwrap();

        let env = env(tmp.path());
        let embedded = embed(Path::new("Vendor/Foo.framework"), &env).unwrap();

        assert_eq!(embedded, tmp.path().join("build/App.app/Frameworks/Foo.framework"));
        assert_eq!(fs::read(embedded.join("Foo")).unwrap(), b"binary");
        assert!(embedded.join("Headers/Foo.h").is_file());
    }

    #[test]
    fn test_embed_replaces_stale_copy() {
        let tmp = TempDir::new().unwrap();
        let framework = tmp.path().join("src/Foo.framework");
        fs::create_dir_all(&framework).unwrap();
        fs::write(framework.join("Foo"), b"new").unwrap();
        let env = env(tmp.path());
        let stale = tmp.path().join("build/App.app/Frameworks/Foo.framework/Old");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"old").unwrap();

        let embedded = embed(Path::new("Foo.framework"), &env).unwrap();
        assert!(!stale.exists());
        assert!(embedded.join("Foo").is_file());
    }

    #[test]
    fn test_embed_missing_framework() {
        let tmp = TempDir::new().unwrap();
        let err = embed(Path::new("Missing.framework"), &env(tmp.path())).unwrap_err();
        assert!(err.to_string().contains("framework not found"));
    }
}

//! Core target types.
//!
//! This module contains the main Target struct and the file declarations
//! that hang off it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::action::{ActionOrder, TargetAction};
use crate::core::dependency::Dependency;
use crate::core::settings::Settings;

use super::platform::{DeploymentTarget, Platform};
use super::product::Product;

/// A source file with optional per-file compiler flags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    pub path: PathBuf,
    pub compiler_flags: Option<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile {
            path: path.into(),
            compiler_flags: None,
        }
    }

    pub fn with_compiler_flags(mut self, flags: impl Into<String>) -> Self {
        self.compiler_flags = Some(flags.into());
        self
    }
}

/// Header files grouped by visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pub public: Vec<PathBuf>,
    pub private: Vec<PathBuf>,
    pub project: Vec<PathBuf>,
}

impl Headers {
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.private.is_empty() && self.project.is_empty()
    }

    /// Every header regardless of visibility.
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.public
            .iter()
            .chain(self.private.iter())
            .chain(self.project.iter())
    }
}

/// A versioned CoreData model (`.xcdatamodeld`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreDataModel {
    /// Path of the `.xcdatamodeld` container.
    pub path: PathBuf,
    /// Paths of the `.xcdatamodel` versions inside the container.
    pub versions: Vec<PathBuf>,
    /// Name of the active version, without extension.
    pub current_version: String,
}

impl CoreDataModel {
    /// Path of the `.xcdatamodel` the current version points at.
    pub fn current_version_path(&self) -> PathBuf {
        self.path
            .join(format!("{}.xcdatamodel", self.current_version))
    }

    /// Whether the current version is one of the declared versions.
    pub fn has_current_version(&self) -> bool {
        let current = self.current_version_path();
        self.versions.iter().any(|v| *v == current)
    }
}

/// A buildable target of a project.
#[derive(Debug, Clone)]
pub struct Target {
    /// Target name, unique within its project
    pub name: String,

    /// Platform the target is built for
    pub platform: Platform,

    /// What kind of artifact to produce
    pub product: Product,

    /// `PRODUCT_BUNDLE_IDENTIFIER`
    pub bundle_id: String,

    pub info_plist: Option<PathBuf>,

    pub entitlements: Option<PathBuf>,

    /// Target level settings, applied on top of the project's
    pub settings: Option<Settings>,

    pub sources: Vec<SourceFile>,

    pub resources: Vec<PathBuf>,

    /// Directories copied into the bundle as they are, listed as a single
    /// folder element instead of one element per file
    pub folder_references: Vec<PathBuf>,

    pub headers: Option<Headers>,

    pub core_data_models: Vec<CoreDataModel>,

    /// Script phases run before and after the build
    pub actions: Vec<TargetAction>,

    /// Environment passed to run and test actions of the generated scheme
    pub environment: BTreeMap<String, String>,

    /// Dependencies in declaration order
    pub dependencies: Vec<Dependency>,

    pub deployment_target: Option<DeploymentTarget>,
}

impl Target {
    /// Create a target with no files.
    pub fn new(
        name: impl Into<String>,
        platform: Platform,
        product: Product,
        bundle_id: impl Into<String>,
    ) -> Self {
        Target {
            name: name.into(),
            platform,
            product,
            bundle_id: bundle_id.into(),
            info_plist: None,
            entitlements: None,
            settings: None,
            sources: Vec::new(),
            resources: Vec::new(),
            folder_references: Vec::new(),
            headers: None,
            core_data_models: Vec::new(),
            actions: Vec::new(),
            environment: BTreeMap::new(),
            dependencies: Vec::new(),
            deployment_target: None,
        }
    }

    /// Name of the product without extension, e.g. `Core` for `libCore.a`.
    pub fn product_name(&self) -> &str {
        &self.name
    }

    /// Name of the product on disk, e.g. `libCore.a`.
    pub fn product_name_with_extension(&self) -> String {
        self.product.file_name(&self.name)
    }

    /// Actions run before the sources are compiled.
    pub fn pre_actions(&self) -> impl Iterator<Item = &TargetAction> {
        self.actions.iter().filter(|a| a.order == ActionOrder::Pre)
    }

    /// Actions run after every other phase.
    pub fn post_actions(&self) -> impl Iterator<Item = &TargetAction> {
        self.actions.iter().filter(|a| a.order == ActionOrder::Post)
    }

    /// Every path the target references on disk, used to build the file tree.
    pub fn referenced_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = Vec::new();
        files.extend(self.sources.iter().map(|s| s.path.as_path()));
        files.extend(self.resources.iter().map(|r| r.as_path()));
        files.extend(self.folder_references.iter().map(|r| r.as_path()));
        for model in &self.core_data_models {
            files.push(&model.path);
            files.extend(model.versions.iter().map(|v| v.as_path()));
        }
        if let Some(headers) = &self.headers {
            files.extend(headers.all().map(|h| h.as_path()));
        }
        if let Some(info_plist) = &self.info_plist {
            files.push(info_plist);
        }
        if let Some(entitlements) = &self.entitlements {
            files.push(entitlements);
        }
        if let Some(settings) = &self.settings {
            files.extend(settings.xcconfigs());
        }
        files
    }
}

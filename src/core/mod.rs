//! Core data structures for Dockyard.
//!
//! This module contains the model the generators work on:
//! - Projects, workspaces and their targets
//! - Dependencies, settings, schemes and target actions
//! - Manifest parsing and model loading

pub mod action;
pub mod dependency;
pub mod loader;
pub mod manifest;
pub mod project;
pub mod scheme;
pub mod settings;
pub mod target;
pub mod workspace;

pub use action::{ActionOrder, TargetAction};
pub use dependency::{Dependency, SdkStatus};
pub use loader::{load_projects, ModelLoader, Projects, TomlManifestLoader};
pub use manifest::{ManifestError, PROJECT_MANIFEST, WORKSPACE_MANIFEST};
pub use project::Project;
pub use scheme::{Scheme, TargetReference};
pub use settings::{BuildConfiguration, BuildSettings, Configuration, SettingValue, Settings};
pub use target::{CoreDataModel, DeploymentTarget, Device, Headers, Platform, Product, SourceFile, Target};
pub use workspace::{FileElement, Workspace};

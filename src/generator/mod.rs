//! Project and workspace generation.
//!
//! A [`WorkspaceGenerator`] generates every project of a loaded graph with a
//! [`ProjectGenerator`]: first the file element tree, then one native target
//! per target with its configurations and build phases, then the schemes.
//! The result is an in-memory object arena per project; writing it out is
//! left to [`crate::ops::writer`].

mod build_phase;
mod config;
mod errors;
mod file_elements;
mod groups;
mod link;
mod project;
mod scheme;
mod settings_provider;
mod target;
mod workspace;
mod workspace_structure;

pub use build_phase::shell_script;
pub use errors::GeneratorError;
pub use file_elements::{AddedElement, ProjectFileElements};
pub use groups::ProjectGroups;
pub use link::NOTHING_TO_EMBED;
pub use project::{GeneratedProject, ProjectGenerator};
pub use scheme::{project_schemes, SchemeGenerator, SchemeTargets};
pub use settings_provider::DefaultSettingsProvider;
pub use target::TargetGenerator;
pub use workspace::{GeneratedWorkspace, WorkspaceGenerator};
pub use workspace_structure::{StructureElement, WorkspaceStructure, WorkspaceStructureGenerator};

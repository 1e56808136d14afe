//! Dockyard - generates Xcode projects and workspaces from TOML manifests
//!
//! This crate provides the core library functionality for Dockyard:
//! manifest loading, the dependency graph, and the generators that turn a
//! graph into project, scheme and workspace objects.

pub mod core;
pub mod generator;
pub mod graph;
pub mod ops;
pub mod util;
pub mod xcode;

/// Test utilities and mocks for Dockyard unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory filesystem, a binary inspector
/// with canned answers, and model fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    dependency::Dependency, project::Project, scheme::Scheme, target::Target, workspace::Workspace,
};

pub use generator::{GeneratedProject, GeneratedWorkspace, GeneratorError};
pub use graph::{Graph, GraphError};
pub use util::config::Config;

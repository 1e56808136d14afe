//! Graph construction errors and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while building the dependency graph.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GraphError {
    #[error("target `{name}` not found in {}", .project.display())]
    #[diagnostic(code(dockyard::graph::missing_target))]
    MissingTarget {
        name: String,
        project: PathBuf,
        referenced_by: String,
        available: Vec<String>,
    },

    #[error("project not found at {}", .path.display())]
    #[diagnostic(code(dockyard::graph::missing_project))]
    MissingProject { path: PathBuf, referenced_by: String },

    #[error("cycle detected between targets: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(dockyard::graph::cycle),
        help("Remove one of the dependencies in the cycle")
    )]
    CycleDetected { cycle: Vec<String> },

    #[error("precompiled dependency not found: {}", .path.display())]
    #[diagnostic(code(dockyard::graph::missing_precompiled))]
    MissingPrecompiled { path: PathBuf, referenced_by: String },

    #[error("unsupported sdk `{name}`")]
    #[diagnostic(
        code(dockyard::graph::invalid_sdk),
        help("SDK dependencies must be `.framework` or `.tbd` files")
    )]
    InvalidSdk { name: String, referenced_by: String },
}

impl GraphError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GraphError::MissingTarget {
                name,
                project,
                referenced_by,
                available,
            } => {
                let mut diag = Diagnostic::error(format!("could not find target `{}`", name))
                    .with_context(format!("required by `{}`", referenced_by))
                    .with_context(format!("looked in {}", project.display()));

                if !available.is_empty() {
                    diag = diag.with_context(format!("available targets: {}", available.join(", ")));
                }

                diag.with_suggestion(suggestions::TARGET_NOT_FOUND)
            }

            GraphError::MissingProject {
                path,
                referenced_by,
            } => Diagnostic::error(format!("could not find a project at {}", path.display()))
                .with_context(format!("required by `{}`", referenced_by))
                .with_suggestion(suggestions::PROJECT_NOT_FOUND),

            GraphError::CycleDetected { cycle } => {
                Diagnostic::error("cycle detected in target dependencies")
                    .with_context(format!("cycle: {}", cycle.join(" -> ")))
                    .with_suggestion(suggestions::CYCLE)
            }

            GraphError::MissingPrecompiled {
                path,
                referenced_by,
            } => Diagnostic::error(format!(
                "precompiled dependency not found: {}",
                path.display()
            ))
            .with_context(format!("required by `{}`", referenced_by))
            .with_suggestion(suggestions::MISSING_PRECOMPILED),

            GraphError::InvalidSdk {
                name,
                referenced_by,
            } => Diagnostic::error(format!("unsupported sdk `{}`", name))
                .with_context(format!("required by `{}`", referenced_by))
                .with_suggestion("Use a `.framework` or `.tbd` name, e.g. `ARKit.framework`"),
        }
    }
}

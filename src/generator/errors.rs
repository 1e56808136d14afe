//! Generation errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while turning a loaded graph into project objects.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("no file element for {}", .path.display())]
    MissingFileReference { path: PathBuf },

    #[error("no product reference for `{name}`")]
    MissingProduct { name: String },

    #[error("target `{target}` depends on `{dependency}`, which has no native target")]
    MissingNativeTarget { target: String, dependency: String },

    #[error("target `{target}` has no configuration list")]
    MissingConfigurationList { target: String },

    #[error("project at {} was not generated", .path.display())]
    ProjectNotFound { path: PathBuf },

    #[error("scheme `{scheme}` references unknown target `{target}` in {}", .project.display())]
    UnknownSchemeTarget {
        scheme: String,
        target: String,
        project: PathBuf,
    },
}

impl GeneratorError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GeneratorError::MissingFileReference { path } => {
                Diagnostic::error(format!("no file element was created for {}", path.display()))
                    .with_location(path.clone())
                    .with_suggestion(suggestions::MISSING_FILE_REFERENCE)
            }

            GeneratorError::MissingProduct { name } => {
                Diagnostic::error(format!("no product reference for `{}`", name))
                    .with_context("the product belongs to a target that is not part of the graph")
            }

            GeneratorError::MissingNativeTarget { target, dependency } => Diagnostic::error(format!(
                "target `{}` depends on `{}`, which has no native target",
                target, dependency
            ))
            .with_context("dependencies within a project are declared between native targets")
            .with_suggestion(suggestions::TARGET_NOT_FOUND),

            GeneratorError::MissingConfigurationList { target } => {
                Diagnostic::error(format!("target `{}` has no configuration list", target))
                    .with_context("search paths are written into every build configuration of a target")
            }

            GeneratorError::ProjectNotFound { path } => {
                Diagnostic::error(format!("project at {} was not generated", path.display()))
                    .with_location(path.clone())
                    .with_suggestion(suggestions::PROJECT_NOT_FOUND)
            }

            GeneratorError::UnknownSchemeTarget {
                scheme,
                target,
                project,
            } => Diagnostic::error(format!("scheme `{}` references unknown target `{}`", scheme, target))
                .with_context(format!("looked in {}", project.display()))
                .with_suggestion(suggestions::TARGET_NOT_FOUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reference_diagnostic() {
        let err = GeneratorError::MissingFileReference {
            path: PathBuf::from("/p/Resources/Missing.png"),
        };
        assert_eq!(err.to_string(), "no file element for /p/Resources/Missing.png");
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("/p/Resources/Missing.png"));
        assert!(output.contains("sources, resources or headers"));
    }

    #[test]
    fn test_missing_native_target_names_both_targets() {
        let err = GeneratorError::MissingNativeTarget {
            target: "App".to_string(),
            dependency: "Core".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "target `App` depends on `Core`, which has no native target"
        );
        assert!(err.to_diagnostic().format(false).contains("dockyard graph"));
    }
}

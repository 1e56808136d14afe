//! User-friendly diagnostic messages.
//!
//! Every fatal error can be rendered with its root cause, the paths or names
//! involved, and suggested fixes.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str = "Run `dockyard init` to create a new project";

    /// Suggestion when a target is not found.
    pub const TARGET_NOT_FOUND: &str = "Run `dockyard graph` to see available targets";

    /// Suggestion when a referenced project is not loaded.
    pub const PROJECT_NOT_FOUND: &str =
        "Check the `project` path of the dependency; it must point at a directory with a Project.toml";

    /// Suggestion when a dependency cycle is found.
    pub const CYCLE: &str = "Remove one of the dependencies in the cycle";

    /// Suggestion when a precompiled binary is missing.
    pub const MISSING_PRECOMPILED: &str =
        "Build or download the binary before generating, or fix the path in the manifest";

    /// Suggestion when a file reference could not be resolved.
    pub const MISSING_FILE_REFERENCE: &str =
        "Make sure the file is listed in the target's sources, resources or headers";

    /// Suggestion when a manifest key is wrong.
    pub const MALFORMED_MANIFEST: &str =
        "Check the manifest for misspelled keys and missing required fields such as `bundle-id`";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("dependency cycle detected")
            .with_location("/work/App/Project.toml")
            .with_context("App -> Core -> App")
            .with_suggestion(suggestions::CYCLE);

        let output = diag.format(false);
        assert!(output.contains("error: dependency cycle detected"));
        assert!(output.contains("--> /work/App/Project.toml"));
        assert!(output.contains("App -> Core -> App"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Remove one of the dependencies"));
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning("glob matched no files");
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.to_string().starts_with("warning: "));
    }
}

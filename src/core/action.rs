//! Target actions - scripts run as part of a target's build.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// When an action runs relative to the other build phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOrder {
    Pre,
    Post,
}

/// A script phase attached to a target.
///
/// Exactly one of `tool`, `path` or `script` says what runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAction {
    pub name: String,
    pub order: ActionOrder,
    /// Executable looked up on `PATH`
    pub tool: Option<String>,
    /// Absolute path of a script file
    pub path: Option<PathBuf>,
    /// Inline shell script
    pub script: Option<String>,
    pub arguments: Vec<String>,
    pub input_paths: Vec<PathBuf>,
    pub output_paths: Vec<PathBuf>,
}

impl TargetAction {
    /// An action running `tool` with `arguments`.
    pub fn tool(
        name: impl Into<String>,
        order: ActionOrder,
        tool: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        TargetAction {
            name: name.into(),
            order,
            tool: Some(tool.into()),
            path: None,
            script: None,
            arguments,
            input_paths: Vec::new(),
            output_paths: Vec::new(),
        }
    }

    /// An action running an inline script.
    pub fn script(name: impl Into<String>, order: ActionOrder, script: impl Into<String>) -> Self {
        TargetAction {
            name: name.into(),
            order,
            tool: None,
            path: None,
            script: Some(script.into()),
            arguments: Vec::new(),
            input_paths: Vec::new(),
            output_paths: Vec::new(),
        }
    }
}

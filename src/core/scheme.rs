//! Schemes - named build, test and run recipes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::settings::BuildConfiguration;

/// A target of some project, by project root and target name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetReference {
    pub project_path: PathBuf,
    pub name: String,
}

impl TargetReference {
    pub fn new(project_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        TargetReference {
            project_path: project_path.into(),
            name: name.into(),
        }
    }
}

/// A script run before or after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionAction {
    pub title: String,
    pub script: String,
    /// Target whose build settings are exported to the script
    pub target: Option<TargetReference>,
}

/// Launch arguments and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    pub environment: BTreeMap<String, String>,
    pub launch: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildAction {
    pub targets: Vec<TargetReference>,
    pub pre_actions: Vec<ExecutionAction>,
    pub post_actions: Vec<ExecutionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAction {
    pub targets: Vec<TargetReference>,
    pub configuration: BuildConfiguration,
    pub coverage: bool,
    pub arguments: Option<Arguments>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAction {
    pub configuration: BuildConfiguration,
    pub executable: Option<TargetReference>,
    pub arguments: Option<Arguments>,
}

/// A scheme as declared in a manifest, or synthesized for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub name: String,
    pub shared: bool,
    pub build_action: Option<BuildAction>,
    pub test_action: Option<TestAction>,
    pub run_action: Option<RunAction>,
}

impl Scheme {
    pub fn new(name: impl Into<String>) -> Self {
        Scheme {
            name: name.into(),
            shared: true,
            build_action: None,
            test_action: None,
            run_action: None,
        }
    }
}

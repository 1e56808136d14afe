//! Scheme documents.

use std::collections::BTreeMap;

use serde::Serialize;

use super::object::ObjectId;

/// A target as referenced from a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildableReference {
    pub blueprint_identifier: ObjectId,
    /// Product file name, e.g. `App.app`
    pub buildable_name: String,
    pub blueprint_name: String,
    /// `container:<path of the .xcodeproj relative to the scheme's container>`
    pub referenced_container: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildActionEntry {
    pub build_for_testing: bool,
    pub build_for_running: bool,
    pub build_for_profiling: bool,
    pub build_for_archiving: bool,
    pub build_for_analyzing: bool,
    pub buildable_reference: BuildableReference,
}

impl BuildActionEntry {
    pub fn new(buildable_reference: BuildableReference) -> Self {
        BuildActionEntry {
            build_for_testing: true,
            build_for_running: true,
            build_for_profiling: true,
            build_for_archiving: true,
            build_for_analyzing: true,
            buildable_reference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionActionDocument {
    pub title: String,
    pub script_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_buildable: Option<BuildableReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildActionDocument {
    pub parallelize_buildables: bool,
    pub build_implicit_dependencies: bool,
    pub entries: Vec<BuildActionEntry>,
    pub pre_actions: Vec<ExecutionActionDocument>,
    pub post_actions: Vec<ExecutionActionDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testable {
    pub skipped: bool,
    pub buildable_reference: BuildableReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestActionDocument {
    pub build_configuration: String,
    pub code_coverage_enabled: bool,
    pub should_use_launch_scheme_args_env: bool,
    pub testables: Vec<Testable>,
    pub command_line_arguments: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchActionDocument {
    pub build_configuration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildable_product_runnable: Option<BuildableReference>,
    pub command_line_arguments: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
}

/// A generated scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDocument {
    pub name: String,
    #[serde(skip)]
    pub shared: bool,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_action: Option<BuildActionDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_action: Option<TestActionDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_action: Option<LaunchActionDocument>,
}

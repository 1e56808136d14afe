//! Objects of a project file.
//!
//! Objects reference each other by [`ObjectId`]; they never own each other.
//! The arena holding them is [`PbxProj`](super::PbxProj).

use std::fmt;

use serde::Serialize;

use crate::core::settings::BuildSettings;

/// Identifier of an object in the arena: 24 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        ObjectId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an element path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceTree {
    #[serde(rename = "<group>")]
    Group,
    #[serde(rename = "<absolute>")]
    Absolute,
    #[serde(rename = "SOURCE_ROOT")]
    SourceRoot,
    #[serde(rename = "SDKROOT")]
    SdkRoot,
    #[serde(rename = "BUILT_PRODUCTS_DIR")]
    BuiltProductsDir,
}

/// `buildActionMask` of phases that run for every build.
pub const DEFAULT_BUILD_ACTION_MASK: u32 = 2_147_483_647;

/// `dstSubfolderSpec` values of copy files phases.
pub mod subfolder {
    pub const FRAMEWORKS: u32 = 10;
    pub const PRODUCTS_DIRECTORY: u32 = 16;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source_tree: SourceTree,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_index: Option<bool>,
}

impl FileReference {
    pub fn new(path: impl Into<String>, source_tree: SourceTree) -> Self {
        FileReference {
            name: None,
            path: Some(path.into()),
            source_tree,
            last_known_file_type: None,
            explicit_file_type: None,
            include_in_index: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_file_type(mut self, file_type: Option<&str>) -> Self {
        self.last_known_file_type = file_type.map(str::to_string);
        self
    }
}

/// A plain or variant group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source_tree: SourceTree,
    pub children: Vec<ObjectId>,
}

impl Group {
    pub fn new(name: Option<String>, path: Option<String>) -> Self {
        Group {
            name,
            path,
            source_tree: SourceTree::Group,
            children: Vec::new(),
        }
    }
}

/// A versioned container such as a CoreData model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    pub source_tree: SourceTree,
    pub children: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<ObjectId>,
    pub version_group_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFile {
    pub file_ref: ObjectId,
    #[serde(skip_serializing_if = "BuildSettings::is_empty")]
    pub settings: BuildSettings,
}

/// Sources, resources, headers and frameworks phases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPhase {
    pub build_action_mask: u32,
    pub files: Vec<ObjectId>,
    pub run_only_for_deployment_postprocessing: bool,
}

impl BuildPhase {
    pub fn new(files: Vec<ObjectId>) -> Self {
        BuildPhase {
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files,
            run_only_for_deployment_postprocessing: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFilesBuildPhase {
    pub name: String,
    pub build_action_mask: u32,
    pub dst_path: String,
    pub dst_subfolder_spec: u32,
    pub files: Vec<ObjectId>,
    pub run_only_for_deployment_postprocessing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellScriptBuildPhase {
    pub name: String,
    pub build_action_mask: u32,
    pub files: Vec<ObjectId>,
    pub input_paths: Vec<String>,
    pub output_paths: Vec<String>,
    pub run_only_for_deployment_postprocessing: bool,
    pub shell_path: String,
    pub shell_script: String,
}

impl ShellScriptBuildPhase {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        ShellScriptBuildPhase {
            name: name.into(),
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files: Vec::new(),
            input_paths: Vec::new(),
            output_paths: Vec::new(),
            run_only_for_deployment_postprocessing: false,
            shell_path: "/bin/sh".to_string(),
            shell_script: script.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTarget {
    pub name: String,
    pub product_name: String,
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_reference: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_configuration_list: Option<ObjectId>,
    pub build_phases: Vec<ObjectId>,
    pub build_rules: Vec<ObjectId>,
    pub dependencies: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDependency {
    pub name: String,
    pub target: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigurationObject {
    pub name: String,
    pub build_settings: BuildSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_configuration_reference: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationList {
    pub build_configurations: Vec<ObjectId>,
    pub default_configuration_is_visible: bool,
    pub default_configuration_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectObject {
    pub name: String,
    pub build_configuration_list: ObjectId,
    pub compatibility_version: String,
    pub development_region: String,
    pub has_scanned_for_encodings: bool,
    pub known_regions: Vec<String>,
    pub main_group: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_ref_group: Option<ObjectId>,
    pub project_dir_path: String,
    pub project_root: String,
    pub targets: Vec<ObjectId>,
}

/// Any object of a project file, tagged with its `isa`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "isa")]
pub enum PbxObject {
    #[serde(rename = "PBXFileReference")]
    FileReference(FileReference),
    #[serde(rename = "PBXGroup")]
    Group(Group),
    #[serde(rename = "PBXVariantGroup")]
    VariantGroup(Group),
    #[serde(rename = "XCVersionGroup")]
    VersionGroup(VersionGroup),
    #[serde(rename = "PBXBuildFile")]
    BuildFile(BuildFile),
    #[serde(rename = "PBXSourcesBuildPhase")]
    SourcesBuildPhase(BuildPhase),
    #[serde(rename = "PBXResourcesBuildPhase")]
    ResourcesBuildPhase(BuildPhase),
    #[serde(rename = "PBXHeadersBuildPhase")]
    HeadersBuildPhase(BuildPhase),
    #[serde(rename = "PBXFrameworksBuildPhase")]
    FrameworksBuildPhase(BuildPhase),
    #[serde(rename = "PBXCopyFilesBuildPhase")]
    CopyFilesBuildPhase(CopyFilesBuildPhase),
    #[serde(rename = "PBXShellScriptBuildPhase")]
    ShellScriptBuildPhase(ShellScriptBuildPhase),
    #[serde(rename = "PBXNativeTarget")]
    NativeTarget(NativeTarget),
    #[serde(rename = "PBXTargetDependency")]
    TargetDependency(TargetDependency),
    #[serde(rename = "XCBuildConfiguration")]
    BuildConfiguration(BuildConfigurationObject),
    #[serde(rename = "XCConfigurationList")]
    ConfigurationList(ConfigurationList),
    #[serde(rename = "PBXProject")]
    Project(ProjectObject),
}

impl PbxObject {
    /// The `isa` of the object as written to disk.
    pub fn isa(&self) -> &'static str {
        match self {
            PbxObject::FileReference(_) => "PBXFileReference",
            PbxObject::Group(_) => "PBXGroup",
            PbxObject::VariantGroup(_) => "PBXVariantGroup",
            PbxObject::VersionGroup(_) => "XCVersionGroup",
            PbxObject::BuildFile(_) => "PBXBuildFile",
            PbxObject::SourcesBuildPhase(_) => "PBXSourcesBuildPhase",
            PbxObject::ResourcesBuildPhase(_) => "PBXResourcesBuildPhase",
            PbxObject::HeadersBuildPhase(_) => "PBXHeadersBuildPhase",
            PbxObject::FrameworksBuildPhase(_) => "PBXFrameworksBuildPhase",
            PbxObject::CopyFilesBuildPhase(_) => "PBXCopyFilesBuildPhase",
            PbxObject::ShellScriptBuildPhase(_) => "PBXShellScriptBuildPhase",
            PbxObject::NativeTarget(_) => "PBXNativeTarget",
            PbxObject::TargetDependency(_) => "PBXTargetDependency",
            PbxObject::BuildConfiguration(_) => "XCBuildConfiguration",
            PbxObject::ConfigurationList(_) => "XCConfigurationList",
            PbxObject::Project(_) => "PBXProject",
        }
    }

    /// Children of groups of any kind.
    pub fn children(&self) -> Option<&[ObjectId]> {
        match self {
            PbxObject::Group(group) | PbxObject::VariantGroup(group) => Some(&group.children),
            PbxObject::VersionGroup(group) => Some(&group.children),
            _ => None,
        }
    }

    /// Display name: the explicit name, else the path.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            PbxObject::FileReference(file) => file.name.as_deref().or(file.path.as_deref()),
            PbxObject::Group(group) | PbxObject::VariantGroup(group) => {
                group.name.as_deref().or(group.path.as_deref())
            }
            PbxObject::VersionGroup(group) => group.name.as_deref().or(Some(&group.path)),
            PbxObject::NativeTarget(target) => Some(&target.name),
            PbxObject::CopyFilesBuildPhase(phase) => Some(&phase.name),
            PbxObject::ShellScriptBuildPhase(phase) => Some(&phase.name),
            _ => None,
        }
    }
}

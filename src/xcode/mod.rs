//! In-memory model of Xcode project, workspace and scheme files.
//!
//! Generators build these values; [`crate::ops::writer`] serializes them.

mod file_type;
mod object;
mod pbxproj;
mod scheme;
mod workspace_data;

pub use file_type::last_known_file_type;
pub use object::{
    subfolder, BuildConfigurationObject, BuildFile, BuildPhase, ConfigurationList,
    CopyFilesBuildPhase, FileReference, Group, NativeTarget, ObjectId, PbxObject, ProjectObject,
    ShellScriptBuildPhase, SourceTree, TargetDependency, VersionGroup, DEFAULT_BUILD_ACTION_MASK,
};
pub use pbxproj::PbxProj;
pub use scheme::{
    BuildActionDocument, BuildActionEntry, BuildableReference, ExecutionActionDocument,
    LaunchActionDocument, SchemeDocument, TestActionDocument, Testable,
};
pub use workspace_data::{WorkspaceData, WorkspaceDataElement};

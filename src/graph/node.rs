//! Graph nodes.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::dependency::SdkStatus;
use crate::core::target::{Product, Target};
use crate::util::fs::file_name;

/// How a binary is linked into its dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Linking {
    Static,
    Dynamic,
}

impl fmt::Display for Linking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Linking::Static => f.write_str("static"),
            Linking::Dynamic => f.write_str("dynamic"),
        }
    }
}

/// A target of a loaded project.
#[derive(Debug, Clone)]
pub struct TargetNode {
    pub project_path: PathBuf,
    pub target: Target,
}

impl TargetNode {
    pub fn name(&self) -> &str {
        &self.target.name
    }

    pub fn product(&self) -> Product {
        self.target.product
    }
}

/// What kind of precompiled artifact a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecompiledKind {
    Framework,
    Library {
        public_headers: PathBuf,
        swift_module_map: Option<PathBuf>,
    },
}

/// A precompiled framework or library on disk.
#[derive(Debug, Clone)]
pub struct PrecompiledNode {
    /// The `.framework` directory or the library file
    pub path: PathBuf,
    pub kind: PrecompiledKind,
    pub linking: Linking,
}

impl PrecompiledNode {
    pub fn is_framework(&self) -> bool {
        self.kind == PrecompiledKind::Framework
    }

    /// File name of the artifact, e.g. `Foo.framework`.
    pub fn name(&self) -> String {
        file_name(&self.path)
    }
}

/// Path of the Mach-O binary: `Foo.framework/Foo` for frameworks, the
/// library itself otherwise.
pub(crate) fn framework_binary_path(path: &Path, kind: &PrecompiledKind) -> PathBuf {
    match kind {
        PrecompiledKind::Framework => match path.file_stem() {
            Some(stem) => path.join(stem),
            None => path.to_path_buf(),
        },
        PrecompiledKind::Library { .. } => path.to_path_buf(),
    }
}

/// A system framework or text-based library.
#[derive(Debug, Clone)]
pub struct SdkNode {
    /// e.g. `ARKit.framework` or `libc++.tbd`
    pub name: String,
    /// Absolute path inside the SDK
    pub path: PathBuf,
    pub status: SdkStatus,
}

impl SdkNode {
    /// Location of an SDK binary by name, `None` for unsupported extensions.
    pub fn sdk_path(name: &str) -> Option<PathBuf> {
        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("framework") => Some(Path::new("/System/Library/Frameworks").join(name)),
            Some("tbd") => Some(Path::new("/usr/lib").join(name)),
            _ => None,
        }
    }
}

/// A node of the dependency graph.
#[derive(Debug, Clone)]
pub enum GraphNode {
    Target(TargetNode),
    Precompiled(PrecompiledNode),
    Sdk(SdkNode),
}

impl GraphNode {
    pub fn key(&self) -> NodeKey {
        match self {
            GraphNode::Target(node) => {
                NodeKey::Target(node.project_path.clone(), node.target.name.clone())
            }
            GraphNode::Precompiled(node) => NodeKey::Precompiled(node.path.clone()),
            GraphNode::Sdk(node) => NodeKey::Sdk(node.path.clone(), node.status),
        }
    }

    pub fn as_target(&self) -> Option<&TargetNode> {
        match self {
            GraphNode::Target(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_precompiled(&self) -> Option<&PrecompiledNode> {
        match self {
            GraphNode::Precompiled(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_sdk(&self) -> Option<&SdkNode> {
        match self {
            GraphNode::Sdk(node) => Some(node),
            _ => None,
        }
    }

    /// Whether the node is a target producing a static product.
    pub fn is_static_target(&self) -> bool {
        self.as_target().is_some_and(|t| t.product().is_static())
    }

    /// Whether the node is a target producing a dynamic framework.
    pub fn is_framework_target(&self) -> bool {
        self.as_target()
            .is_some_and(|t| t.product() == Product::Framework)
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphNode::Target(node) => write!(f, "{} ({})", node.name(), node.product()),
            GraphNode::Precompiled(node) => write!(f, "{} ({})", node.name(), node.linking),
            GraphNode::Sdk(node) => match node.status {
                SdkStatus::Required => write!(f, "{} (sdk)", node.name),
                SdkStatus::Optional => write!(f, "{} (sdk, optional)", node.name),
            },
        }
    }
}

/// Identity of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
    /// Project root and target name
    Target(PathBuf, String),
    Precompiled(PathBuf),
    /// An SDK is linked weakly or not per dependent, so the status is part
    /// of its identity
    Sdk(PathBuf, SdkStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_paths() {
        assert_eq!(
            SdkNode::sdk_path("ARKit.framework"),
            Some(PathBuf::from("/System/Library/Frameworks/ARKit.framework"))
        );
        assert_eq!(
            SdkNode::sdk_path("libc++.tbd"),
            Some(PathBuf::from("/usr/lib/libc++.tbd"))
        );
        assert_eq!(SdkNode::sdk_path("libz.dylib"), None);
    }

    #[test]
    fn test_framework_binary_path() {
        let node = PrecompiledNode {
            path: PathBuf::from("/p/Vendor/Foo.framework"),
            kind: PrecompiledKind::Framework,
            linking: Linking::Dynamic,
        };
        assert_eq!(
            framework_binary_path(&node.path, &node.kind),
            PathBuf::from("/p/Vendor/Foo.framework/Foo")
        );
        assert_eq!(node.name(), "Foo.framework");
    }
}

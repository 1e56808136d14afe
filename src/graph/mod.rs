//! The dependency graph.
//!
//! Nodes are targets of loaded projects, precompiled frameworks and
//! libraries, and SDK binaries. Edges point from a target to what it depends
//! on and keep declaration order. Once built, the graph is read-only; the
//! generators only query it.

mod builder;
mod errors;
mod linking;
mod node;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

pub use builder::GraphLoader;
pub use errors::GraphError;
pub use linking::{fat_first_slice_offset, linking_from_header, BinaryInspector, MachOInspector};
pub use node::{GraphNode, Linking, NodeKey, PrecompiledKind, PrecompiledNode, SdkNode, TargetNode};

use crate::core::dependency::SdkStatus;
use crate::core::loader::Projects;
use crate::core::project::Project;
use crate::core::target::Product;

/// What a link or embed phase refers to.
///
/// Ordering is SDKs, then products, then absolute paths, each by path or
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyReference {
    /// An SDK binary, by absolute path inside the SDK
    Sdk { path: PathBuf, status: SdkStatus },
    /// The product of a target, by its file name (`libCore.a`, `Core.framework`)
    Product(String),
    /// A precompiled artifact on disk
    Absolute(PathBuf),
}

/// The dependency graph of a generation run.
#[derive(Debug)]
pub struct Graph {
    graph: DiGraph<GraphNode, ()>,
    index: HashMap<NodeKey, NodeIndex>,
    projects: Projects,
}

impl Graph {
    fn new(graph: DiGraph<GraphNode, ()>, index: HashMap<NodeKey, NodeIndex>, projects: Projects) -> Self {
        Graph {
            graph,
            index,
            projects,
        }
    }

    /// Every loaded project, keyed by root path.
    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    pub fn project(&self, path: &Path) -> Option<&Project> {
        self.projects.get(path)
    }

    fn target_index(&self, project_path: &Path, name: &str) -> Option<NodeIndex> {
        self.index
            .get(&NodeKey::Target(project_path.to_path_buf(), name.to_string()))
            .copied()
    }

    /// The node of a target, if it was loaded.
    pub fn target(&self, project_path: &Path, name: &str) -> Option<&TargetNode> {
        self.target_index(project_path, name)
            .and_then(|idx| self.graph[idx].as_target())
    }

    /// Direct dependencies of a node in declaration order.
    fn dependency_indices(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self.graph.edges(node).collect();
        edges.sort_by_key(|e| e.id());
        edges.into_iter().map(|e| e.target()).collect()
    }

    /// Direct dependencies of a target in declaration order.
    pub fn direct_dependencies(&self, project_path: &Path, name: &str) -> Vec<&GraphNode> {
        match self.target_index(project_path, name) {
            Some(idx) => self
                .dependency_indices(idx)
                .into_iter()
                .map(|i| &self.graph[i])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every node reachable from `start`, excluding `start`, in depth-first
    /// discovery order. Nodes matching `test` are returned; the walk does not
    /// continue below nodes matching `skip`.
    fn find_all(
        &self,
        start: NodeIndex,
        test: impl Fn(&GraphNode) -> bool,
        skip: impl Fn(&GraphNode) -> bool,
    ) -> Vec<NodeIndex> {
        let mut found = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut stack: Vec<NodeIndex> = self.dependency_indices(start).into_iter().rev().collect();

        while let Some(idx) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            let node = &self.graph[idx];
            if test(node) {
                found.push(idx);
            }
            if skip(node) {
                continue;
            }
            stack.extend(self.dependency_indices(idx).into_iter().rev());
        }

        found
    }

    /// Direct dependency targets from the same project, in declaration
    /// order.
    pub fn target_dependencies(&self, project_path: &Path, name: &str) -> Vec<&TargetNode> {
        self.direct_dependencies(project_path, name)
            .into_iter()
            .filter_map(GraphNode::as_target)
            .filter(|t| t.project_path == project_path)
            .collect()
    }

    /// The first direct dependency producing an app, used as test host.
    pub fn app_dependency(&self, project_path: &Path, name: &str) -> Option<&TargetNode> {
        self.direct_dependencies(project_path, name)
            .into_iter()
            .filter_map(GraphNode::as_target)
            .find(|t| t.product() == Product::App)
    }

    /// Everything a target links against.
    pub fn linkable_dependencies(&self, project_path: &Path, name: &str) -> Vec<DependencyReference> {
        let Some(idx) = self.target_index(project_path, name) else {
            return Vec::new();
        };
        let Some(target) = self.graph[idx].as_target() else {
            return Vec::new();
        };

        let mut references = BTreeSet::new();
        let direct = self.dependency_indices(idx);

        for &dep in &direct {
            if let Some(sdk) = self.graph[dep].as_sdk() {
                references.insert(sdk_reference(sdk));
            }
        }

        if target.product().can_link_static_products() {
            let statics = self.find_all(idx, GraphNode::is_static_target, GraphNode::is_framework_target);
            for &static_idx in &statics {
                for sdk_idx in self.dependency_indices(static_idx) {
                    if let Some(sdk) = self.graph[sdk_idx].as_sdk() {
                        references.insert(sdk_reference(sdk));
                    }
                }
                if let Some(node) = self.graph[static_idx].as_target() {
                    references.insert(DependencyReference::Product(node.target.product_name_with_extension()));
                }
            }
        }

        for &dep in &direct {
            match &self.graph[dep] {
                GraphNode::Precompiled(precompiled) => {
                    references.insert(DependencyReference::Absolute(precompiled.path.clone()));
                }
                GraphNode::Target(node)
                    if matches!(node.product(), Product::Framework | Product::DynamicLibrary) =>
                {
                    references.insert(DependencyReference::Product(node.target.product_name_with_extension()));
                }
                _ => {}
            }
        }

        references.into_iter().collect()
    }

    /// Frameworks that must be copied into the bundle of an app or test
    /// target: dynamic precompiled frameworks and framework targets.
    pub fn embeddable_frameworks(&self, project_path: &Path, name: &str) -> Vec<DependencyReference> {
        let Some(idx) = self.target_index(project_path, name) else {
            return Vec::new();
        };
        let embeds = self.graph[idx]
            .as_target()
            .is_some_and(|t| t.product().can_embed_frameworks());
        if !embeds {
            return Vec::new();
        }

        let other_bundle = |node: &GraphNode| {
            node.as_target()
                .is_some_and(|t| t.product().can_embed_frameworks())
        };
        let mut references = BTreeSet::new();

        let precompiled = self.find_all(
            idx,
            |node| {
                node.as_precompiled()
                    .is_some_and(|p| p.is_framework() && p.linking == Linking::Dynamic)
            },
            other_bundle,
        );
        for p in precompiled {
            if let Some(node) = self.graph[p].as_precompiled() {
                references.insert(DependencyReference::Absolute(node.path.clone()));
            }
        }

        let frameworks = self.find_all(idx, GraphNode::is_framework_target, other_bundle);
        for f in frameworks {
            if let Some(node) = self.graph[f].as_target() {
                references.insert(DependencyReference::Product(node.target.product_name_with_extension()));
            }
        }

        references.into_iter().collect()
    }

    /// Direct dependency targets with a static product.
    pub fn static_dependencies(&self, project_path: &Path, name: &str) -> Vec<DependencyReference> {
        let references: BTreeSet<DependencyReference> = self
            .direct_dependencies(project_path, name)
            .into_iter()
            .filter_map(GraphNode::as_target)
            .filter(|t| t.product().is_static())
            .map(|t| DependencyReference::Product(t.target.product_name_with_extension()))
            .collect();
        references.into_iter().collect()
    }

    fn direct_libraries(&self, project_path: &Path, name: &str) -> Vec<&PrecompiledNode> {
        self.direct_dependencies(project_path, name)
            .into_iter()
            .filter_map(GraphNode::as_precompiled)
            .filter(|p| !p.is_framework())
            .collect()
    }

    /// Public header directories of directly linked libraries.
    pub fn libraries_public_headers_folders(&self, project_path: &Path, name: &str) -> Vec<PathBuf> {
        let folders: BTreeSet<PathBuf> = self
            .direct_libraries(project_path, name)
            .into_iter()
            .filter_map(|lib| match &lib.kind {
                PrecompiledKind::Library { public_headers, .. } => Some(public_headers.clone()),
                PrecompiledKind::Framework => None,
            })
            .collect();
        folders.into_iter().collect()
    }

    /// Directories holding directly linked library binaries.
    pub fn libraries_search_paths(&self, project_path: &Path, name: &str) -> Vec<PathBuf> {
        let paths: BTreeSet<PathBuf> = self
            .direct_libraries(project_path, name)
            .into_iter()
            .filter_map(|lib| lib.path.parent().map(Path::to_path_buf))
            .collect();
        paths.into_iter().collect()
    }

    /// Directories holding Swift module maps of directly linked libraries.
    pub fn libraries_swift_include_paths(&self, project_path: &Path, name: &str) -> Vec<PathBuf> {
        let paths: BTreeSet<PathBuf> = self
            .direct_libraries(project_path, name)
            .into_iter()
            .filter_map(|lib| match &lib.kind {
                PrecompiledKind::Library {
                    swift_module_map: Some(map),
                    ..
                } => map.parent().map(Path::to_path_buf),
                _ => None,
            })
            .collect();
        paths.into_iter().collect()
    }

    /// Direct dependency targets producing a resource bundle.
    pub fn resource_bundle_dependencies(&self, project_path: &Path, name: &str) -> Vec<&TargetNode> {
        let mut bundles: Vec<&TargetNode> = self
            .direct_dependencies(project_path, name)
            .into_iter()
            .filter_map(GraphNode::as_target)
            .filter(|t| t.product() == Product::Bundle)
            .collect();
        bundles.sort_by(|a, b| a.name().cmp(b.name()));
        bundles
    }

    /// Every node reachable from the targets of a project, the targets
    /// themselves excluded unless another target reaches them.
    pub fn find_all_for_project(&self, project_path: &Path) -> Vec<&GraphNode> {
        let Some(project) = self.projects.get(project_path) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for target in &project.targets {
            let Some(idx) = self.target_index(project_path, &target.name) else {
                continue;
            };
            for found in self.find_all(idx, |_| true, |_| false) {
                if seen.insert(found) {
                    nodes.push(&self.graph[found]);
                }
            }
        }
        nodes
    }
}

fn sdk_reference(sdk: &SdkNode) -> DependencyReference {
    DependencyReference::Sdk {
        path: sdk.path.clone(),
        status: sdk.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency::Dependency;
    use crate::test_support::{project, target, MockFileSystem, StaticInspector};

    fn load(projects: Vec<Project>, fs: &MockFileSystem, inspector: &StaticInspector) -> Graph {
        let projects: Projects = projects.into_iter().map(|p| (p.path.clone(), p)).collect();
        GraphLoader::new(fs, inspector).load(projects).unwrap()
    }

    fn product(name: &str) -> DependencyReference {
        DependencyReference::Product(name.to_string())
    }

    #[test]
    fn test_target_dependencies_keep_declaration_order() {
        let p = project("/p", "P")
            .with_target(
                target("App", Product::App)
                    .with_dependency(Dependency::target("Zeta"))
                    .with_dependency(Dependency::target("Alpha")),
            )
            .with_target(target("Zeta", Product::Framework))
            .with_target(target("Alpha", Product::Framework));
        let graph = load(vec![p], &MockFileSystem::new(), &StaticInspector::default());

        let names: Vec<&str> = graph
            .target_dependencies(Path::new("/p"), "App")
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_target_dependencies_exclude_other_projects() {
        let a = project("/a", "A").with_target(
            target("App", Product::App)
                .with_dependency(Dependency::project("Core", "/b"))
                .with_dependency(Dependency::target("Local")),
        )
        .with_target(target("Local", Product::Framework));
        let b = project("/b", "B").with_target(target("Core", Product::Framework));
        let graph = load(vec![a, b], &MockFileSystem::new(), &StaticInspector::default());

        let names: Vec<&str> = graph
            .target_dependencies(Path::new("/a"), "App")
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["Local"]);
    }

    #[test]
    fn test_linkable_dependencies_of_app() {
        let p = project("/p", "P")
            .with_target(
                target("App", Product::App)
                    .with_dependency(Dependency::target("Kit"))
                    .with_dependency(Dependency::target("Core"))
                    .with_dependency(Dependency::framework("/p/Vendor/Foo.framework"))
                    .with_dependency(Dependency::sdk("ARKit.framework", SdkStatus::Optional)),
            )
            .with_target(target("Kit", Product::Framework).with_dependency(Dependency::target("KitCore")))
            .with_target(target("KitCore", Product::StaticLibrary))
            .with_target(
                target("Core", Product::StaticLibrary)
                    .with_dependency(Dependency::target("Base"))
                    .with_dependency(Dependency::sdk("libc++.tbd", SdkStatus::Required)),
            )
            .with_target(target("Base", Product::StaticFramework));
        let fs = MockFileSystem::new().with_dir("/p/Vendor/Foo.framework");
        let graph = load(vec![p], &fs, &StaticInspector::default());

        assert_eq!(
            graph.linkable_dependencies(Path::new("/p"), "App"),
            vec![
                DependencyReference::Sdk {
                    path: PathBuf::from("/System/Library/Frameworks/ARKit.framework"),
                    status: SdkStatus::Optional,
                },
                DependencyReference::Sdk {
                    path: PathBuf::from("/usr/lib/libc++.tbd"),
                    status: SdkStatus::Required,
                },
                product("Base.framework"),
                product("Kit.framework"),
                product("libCore.a"),
                DependencyReference::Absolute(PathBuf::from("/p/Vendor/Foo.framework")),
            ]
        );
    }

    #[test]
    fn test_products_with_shared_target_name_stay_apart() {
        let app = project("/w/App", "App")
            .with_target(
                target("App", Product::App)
                    .with_dependency(Dependency::target("Core"))
                    .with_dependency(Dependency::project("Core", "/w/Other")),
            )
            .with_target(target("Core", Product::StaticLibrary));
        let other = project("/w/Other", "Other").with_target(target("Core", Product::Framework));
        let graph = load(vec![app, other], &MockFileSystem::new(), &StaticInspector::default());

        assert_eq!(
            graph.linkable_dependencies(Path::new("/w/App"), "App"),
            vec![product("Core.framework"), product("libCore.a")]
        );
        assert_eq!(
            graph.embeddable_frameworks(Path::new("/w/App"), "App"),
            vec![product("Core.framework")]
        );
    }

    #[test]
    fn test_static_library_does_not_link_its_statics() {
        let p = project("/p", "P")
            .with_target(target("Core", Product::StaticLibrary).with_dependency(Dependency::target("Base")))
            .with_target(target("Base", Product::StaticLibrary));
        let graph = load(vec![p], &MockFileSystem::new(), &StaticInspector::default());

        assert!(graph.linkable_dependencies(Path::new("/p"), "Core").is_empty());
        assert_eq!(
            graph.static_dependencies(Path::new("/p"), "Core"),
            vec![product("libBase.a")]
        );
    }

    #[test]
    fn test_embeddable_frameworks() {
        let p = project("/p", "P")
            .with_target(
                target("App", Product::App)
                    .with_dependency(Dependency::target("Kit"))
                    .with_dependency(Dependency::framework("/p/Vendor/Static.framework")),
            )
            .with_target(
                target("Kit", Product::Framework)
                    .with_dependency(Dependency::framework("/p/Vendor/Dynamic.framework")),
            )
            .with_target(
                target("AppTests", Product::UnitTests).with_dependency(Dependency::target("App")),
            );
        let fs = MockFileSystem::new()
            .with_dir("/p/Vendor/Static.framework")
            .with_dir("/p/Vendor/Dynamic.framework");
        let inspector = StaticInspector::default()
            .with("/p/Vendor/Static.framework/Static", Linking::Static)
            .with("/p/Vendor/Dynamic.framework/Dynamic", Linking::Dynamic);
        let graph = load(vec![p], &fs, &inspector);

        assert_eq!(
            graph.embeddable_frameworks(Path::new("/p"), "App"),
            vec![
                product("Kit.framework"),
                DependencyReference::Absolute(PathBuf::from("/p/Vendor/Dynamic.framework")),
            ]
        );
        assert!(graph.embeddable_frameworks(Path::new("/p"), "Kit").is_empty());
        assert!(graph.embeddable_frameworks(Path::new("/p"), "AppTests").is_empty());
    }

    #[test]
    fn test_library_queries() {
        let p = project("/p", "P").with_target(
            target("App", Product::App).with_dependency(Dependency::Library {
                path: PathBuf::from("/p/Vendor/lib/libBar.a"),
                public_headers: PathBuf::from("/p/Vendor/include"),
                swift_module_map: Some(PathBuf::from("/p/Vendor/modules/Bar.modulemap")),
            }),
        );
        let fs = MockFileSystem::new().with_file("/p/Vendor/lib/libBar.a");
        let graph = load(vec![p], &fs, &StaticInspector::default());
        let root = Path::new("/p");

        assert_eq!(
            graph.libraries_public_headers_folders(root, "App"),
            vec![PathBuf::from("/p/Vendor/include")]
        );
        assert_eq!(
            graph.libraries_search_paths(root, "App"),
            vec![PathBuf::from("/p/Vendor/lib")]
        );
        assert_eq!(
            graph.libraries_swift_include_paths(root, "App"),
            vec![PathBuf::from("/p/Vendor/modules")]
        );
        assert_eq!(
            graph.linkable_dependencies(root, "App"),
            vec![DependencyReference::Absolute(PathBuf::from("/p/Vendor/lib/libBar.a"))]
        );
    }

    #[test]
    fn test_resource_bundles_and_app_host() {
        let p = project("/p", "P")
            .with_target(
                target("App", Product::App)
                    .with_dependency(Dependency::target("Strings"))
                    .with_dependency(Dependency::target("Assets")),
            )
            .with_target(target("Strings", Product::Bundle))
            .with_target(target("Assets", Product::Bundle))
            .with_target(target("AppTests", Product::UnitTests).with_dependency(Dependency::target("App")));
        let graph = load(vec![p], &MockFileSystem::new(), &StaticInspector::default());

        let bundles: Vec<&str> = graph
            .resource_bundle_dependencies(Path::new("/p"), "App")
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(bundles, vec!["Assets", "Strings"]);
        assert_eq!(
            graph.app_dependency(Path::new("/p"), "AppTests").map(|t| t.name()),
            Some("App")
        );
    }

    #[test]
    fn test_find_all_for_project() {
        let a = project("/a", "A").with_target(
            target("App", Product::App)
                .with_dependency(Dependency::project("Core", "/b"))
                .with_dependency(Dependency::sdk("UIKit.framework", SdkStatus::Required)),
        );
        let b = project("/b", "B").with_target(
            target("Core", Product::Framework).with_dependency(Dependency::target("Base")),
        )
        .with_target(target("Base", Product::StaticLibrary));
        let graph = load(vec![a, b], &MockFileSystem::new(), &StaticInspector::default());

        let nodes: Vec<String> = graph
            .find_all_for_project(Path::new("/a"))
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            nodes,
            vec![
                "Core (framework)",
                "Base (static-library)",
                "UIKit.framework (sdk)",
            ]
        );
    }
}

//! Graph construction from loaded projects.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::dependency::Dependency;
use crate::core::loader::Projects;
use crate::core::target::Target;
use crate::util::fs::FileSystem;

use super::errors::GraphError;
use super::linking::BinaryInspector;
use super::node::{
    framework_binary_path, GraphNode, Linking, NodeKey, PrecompiledKind, PrecompiledNode,
    SdkNode, TargetNode,
};
use super::Graph;

/// Builds a [`Graph`] from a set of loaded projects.
pub struct GraphLoader<'a> {
    fs: &'a dyn FileSystem,
    inspector: &'a dyn BinaryInspector,
}

struct Builder {
    graph: DiGraph<GraphNode, ()>,
    index: HashMap<NodeKey, NodeIndex>,
}

impl Builder {
    fn node(&mut self, node: GraphNode) -> NodeIndex {
        let key = node.key();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    fn edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, ());
        }
    }
}

impl<'a> GraphLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem, inspector: &'a dyn BinaryInspector) -> Self {
        GraphLoader { fs, inspector }
    }

    /// Build the graph of every target of `projects`.
    pub fn load(&self, projects: Projects) -> Result<Graph, GraphError> {
        let mut builder = Builder {
            graph: DiGraph::new(),
            index: HashMap::new(),
        };

        for (path, project) in &projects {
            for target in &project.targets {
                let from = builder.node(target_node(path, target));
                for dependency in &target.dependencies {
                    let to = self.dependency_node(&mut builder, &projects, path, target, dependency)?;
                    builder.edge(from, to);
                }
            }
        }

        detect_cycles(&builder.graph)?;

        tracing::debug!(
            "graph has {} nodes and {} edges",
            builder.graph.node_count(),
            builder.graph.edge_count()
        );

        Ok(Graph::new(builder.graph, builder.index, projects))
    }

    fn dependency_node(
        &self,
        builder: &mut Builder,
        projects: &Projects,
        project_path: &Path,
        target: &Target,
        dependency: &Dependency,
    ) -> Result<NodeIndex, GraphError> {
        match dependency {
            Dependency::Target { name } => {
                let node = resolve_target(projects, project_path, name, &target.name)?;
                Ok(builder.node(node))
            }

            Dependency::Project { target: name, path } => {
                if !projects.contains_key(path) {
                    return Err(GraphError::MissingProject {
                        path: path.clone(),
                        referenced_by: target.name.clone(),
                    });
                }
                let node = resolve_target(projects, path, name, &target.name)?;
                Ok(builder.node(node))
            }

            Dependency::Framework { path } => {
                self.precompiled_node(builder, path, PrecompiledKind::Framework, &target.name)
            }

            Dependency::Library {
                path,
                public_headers,
                swift_module_map,
            } => self.precompiled_node(
                builder,
                path,
                PrecompiledKind::Library {
                    public_headers: public_headers.clone(),
                    swift_module_map: swift_module_map.clone(),
                },
                &target.name,
            ),

            Dependency::Sdk { name, status } => {
                let path = SdkNode::sdk_path(name).ok_or_else(|| GraphError::InvalidSdk {
                    name: name.clone(),
                    referenced_by: target.name.clone(),
                })?;
                Ok(builder.node(GraphNode::Sdk(SdkNode {
                    name: name.clone(),
                    path,
                    status: *status,
                })))
            }
        }
    }

    fn precompiled_node(
        &self,
        builder: &mut Builder,
        path: &Path,
        kind: PrecompiledKind,
        referenced_by: &str,
    ) -> Result<NodeIndex, GraphError> {
        if let Some(&idx) = builder.index.get(&NodeKey::Precompiled(path.to_path_buf())) {
            return Ok(idx);
        }

        if !self.fs.exists(path) {
            return Err(GraphError::MissingPrecompiled {
                path: path.to_path_buf(),
                referenced_by: referenced_by.to_string(),
            });
        }

        let binary = framework_binary_path(path, &kind);
        let linking = self.inspector.linking(&binary).unwrap_or(match kind {
            PrecompiledKind::Framework => Linking::Dynamic,
            PrecompiledKind::Library { .. } => Linking::Static,
        });
        tracing::debug!("{} links {}", path.display(), linking);

        Ok(builder.node(GraphNode::Precompiled(PrecompiledNode {
            path: path.to_path_buf(),
            kind,
            linking,
        })))
    }
}

fn target_node(project_path: &Path, target: &Target) -> GraphNode {
    GraphNode::Target(TargetNode {
        project_path: project_path.to_path_buf(),
        target: target.clone(),
    })
}

fn resolve_target(
    projects: &Projects,
    project_path: &Path,
    name: &str,
    referenced_by: &str,
) -> Result<GraphNode, GraphError> {
    let project = projects
        .get(project_path)
        .ok_or_else(|| GraphError::MissingProject {
            path: project_path.to_path_buf(),
            referenced_by: referenced_by.to_string(),
        })?;

    let target = project
        .target(name)
        .ok_or_else(|| GraphError::MissingTarget {
            name: name.to_string(),
            project: project_path.to_path_buf(),
            referenced_by: referenced_by.to_string(),
            available: project.target_names().iter().map(|n| n.to_string()).collect(),
        })?;

    Ok(target_node(project_path, target))
}

/// Reject self references and strongly connected groups of targets.
fn detect_cycles(graph: &DiGraph<GraphNode, ()>) -> Result<(), GraphError> {
    let mut components: Vec<Vec<NodeIndex>> = kosaraju_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .collect();

    if components.is_empty() {
        return Ok(());
    }

    for scc in &mut components {
        scc.sort();
    }
    components.sort();

    let cycle = cycle_path(graph, &components[0]);
    Err(GraphError::CycleDetected {
        cycle: cycle.into_iter().map(|idx| node_label(&graph[idx])).collect(),
    })
}

/// The shortest closed walk through a strongly connected component,
/// starting and ending at its lowest node.
fn cycle_path(graph: &DiGraph<GraphNode, ()>, scc: &[NodeIndex]) -> Vec<NodeIndex> {
    let members: HashSet<NodeIndex> = scc.iter().copied().collect();
    let start = scc[0];

    let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let mut neighbors: Vec<NodeIndex> = graph
            .neighbors(current)
            .filter(|n| members.contains(n))
            .collect();
        neighbors.sort();

        for next in neighbors {
            if next == start {
                let mut walk = Vec::new();
                let mut node = current;
                while node != start {
                    walk.push(node);
                    match parents.get(&node) {
                        Some(&parent) => node = parent,
                        None => break,
                    }
                }
                walk.reverse();

                let mut path = vec![start];
                path.extend(walk);
                path.push(start);
                return path;
            }
            if !parents.contains_key(&next) {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    vec![start, start]
}

fn node_label(node: &GraphNode) -> String {
    match node {
        GraphNode::Target(target) => target.name().to_string(),
        other => other.to_string(),
    }
}

//! Implementation of `dockyard graph`.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::{json, Value};

use crate::core::dependency::SdkStatus;
use crate::graph::{Graph, GraphNode, PrecompiledKind};
use crate::util::fs::relative_string;

/// Render the targets of every project with their direct dependencies as
/// a tree.
pub fn format_tree(graph: &Graph, root: &Path) -> String {
    let mut out = String::new();
    for (path, project) in graph.projects() {
        let _ = writeln!(out, "{} ({})", project.name, display_path(root, path));

        let count = project.targets.len();
        for (i, target) in project.targets.iter().enumerate() {
            let last = i + 1 == count;
            let _ = writeln!(
                out,
                "{}{} [{}, {}]",
                if last { "└── " } else { "├── " },
                target.name,
                target.product,
                target.platform
            );

            let dependencies = graph.direct_dependencies(path, &target.name);
            let indent = if last { "    " } else { "│   " };
            for (j, node) in dependencies.iter().enumerate() {
                let marker = if j + 1 == dependencies.len() { "└── " } else { "├── " };
                let _ = writeln!(out, "{}{}{}", indent, marker, describe(node, path, root));
            }
        }
    }
    out
}

fn display_path(root: &Path, path: &Path) -> String {
    let relative = relative_string(root, path);
    if relative.is_empty() {
        ".".to_string()
    } else {
        relative
    }
}

fn describe(node: &GraphNode, project_path: &Path, root: &Path) -> String {
    match node {
        GraphNode::Target(target) if target.project_path == project_path => {
            format!("{} [{}]", target.name(), target.product())
        }
        GraphNode::Target(target) => format!(
            "{} [{}] ({})",
            target.name(),
            target.product(),
            display_path(root, &target.project_path)
        ),
        GraphNode::Precompiled(precompiled) => {
            format!("{} [{}]", display_path(root, &precompiled.path), precompiled.linking)
        }
        GraphNode::Sdk(sdk) => match sdk.status {
            SdkStatus::Required => format!("{} [sdk]", sdk.name),
            SdkStatus::Optional => format!("{} [sdk, optional]", sdk.name),
        },
    }
}

/// The graph as JSON: projects, their targets and direct dependencies.
pub fn to_json(graph: &Graph) -> Value {
    let projects: Vec<Value> = graph
        .projects()
        .iter()
        .map(|(path, project)| {
            let targets: Vec<Value> = project
                .targets
                .iter()
                .map(|target| {
                    let dependencies: Vec<Value> = graph
                        .direct_dependencies(path, &target.name)
                        .into_iter()
                        .map(node_json)
                        .collect();
                    json!({
                        "name": target.name,
                        "product": target.product.to_string(),
                        "platform": target.platform.to_string(),
                        "dependencies": dependencies,
                    })
                })
                .collect();
            json!({
                "name": project.name,
                "path": path,
                "targets": targets,
            })
        })
        .collect();
    json!({ "projects": projects })
}

fn node_json(node: &GraphNode) -> Value {
    match node {
        GraphNode::Target(target) => json!({
            "kind": "target",
            "name": target.name(),
            "project": target.project_path,
        }),
        GraphNode::Precompiled(precompiled) => json!({
            "kind": match precompiled.kind {
                PrecompiledKind::Framework => "framework",
                PrecompiledKind::Library { .. } => "library",
            },
            "path": precompiled.path,
            "linking": precompiled.linking.to_string(),
        }),
        GraphNode::Sdk(sdk) => json!({
            "kind": "sdk",
            "name": sdk.name,
            "optional": sdk.status == SdkStatus::Optional,
        }),
    }
}

//! Generation of a workspace and every project it contains.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::workspace::Workspace;
use crate::graph::Graph;
use crate::util::config::Config;
use crate::util::fs::{relative_string, FileSystem};
use crate::xcode::{SchemeDocument, WorkspaceData, WorkspaceDataElement};

use super::errors::GeneratorError;
use super::project::{GeneratedProject, ProjectGenerator};
use super::scheme::{SchemeGenerator, SchemeTargets};
use super::workspace_structure::{StructureElement, WorkspaceStructureGenerator};

/// A generated workspace with its projects.
#[derive(Debug)]
pub struct GeneratedWorkspace {
    pub name: String,
    /// Path of the `.xcworkspace` container
    pub path: PathBuf,
    pub data: WorkspaceData,
    pub schemes: Vec<SchemeDocument>,
    /// Generated projects by project root
    pub projects: BTreeMap<PathBuf, GeneratedProject>,
}

pub struct WorkspaceGenerator<'a> {
    fs: &'a dyn FileSystem,
    config: &'a Config,
}

impl<'a> WorkspaceGenerator<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &'a Config) -> Self {
        WorkspaceGenerator { fs, config }
    }

    /// Generate every project of the graph, then the workspace around them.
    ///
    /// Projects reached only through dependencies are added to the
    /// workspace after the listed ones.
    pub fn generate(&self, workspace: &Workspace, graph: &Graph) -> Result<GeneratedWorkspace, GeneratorError> {
        tracing::info!("generating workspace `{}`", workspace.name);
        let project_generator = ProjectGenerator::new(self.fs, self.config);

        let mut projects = BTreeMap::new();
        let mut scheme_targets = SchemeTargets::new();
        for (path, project) in graph.projects() {
            let generated = project_generator.generate(project, graph)?;
            scheme_targets.add_project(project, &generated.path, &generated.targets);
            projects.insert(path.clone(), generated);
        }

        let mut members = workspace.projects.clone();
        for path in graph.projects().keys() {
            if !members.contains(path) {
                members.push(path.clone());
            }
        }

        let structure = WorkspaceStructureGenerator::new(self.fs).generate_structure(workspace, &members);
        let mut children = structure
            .contents
            .iter()
            .map(|element| data_element(&projects, element, &workspace.path))
            .collect::<Result<Vec<_>, _>>()?;
        children.sort_by(compare_elements);

        let schemes = SchemeGenerator::new(&scheme_targets, &workspace.path).generate_schemes(&workspace.schemes)?;

        Ok(GeneratedWorkspace {
            name: workspace.name.clone(),
            path: workspace.path.join(format!("{}.xcworkspace", workspace.name)),
            data: WorkspaceData::new(children),
            schemes,
            projects,
        })
    }
}

/// Convert a tree entry, with locations relative to `parent`.
fn data_element(
    projects: &BTreeMap<PathBuf, GeneratedProject>,
    element: &StructureElement,
    parent: &Path,
) -> Result<WorkspaceDataElement, GeneratorError> {
    match element {
        StructureElement::File { path } | StructureElement::FolderReference { path } => {
            Ok(WorkspaceDataElement::file(&relative_string(parent, path)))
        }
        StructureElement::Project { path } => {
            let generated = projects
                .get(path)
                .ok_or_else(|| GeneratorError::ProjectNotFound { path: path.clone() })?;
            Ok(WorkspaceDataElement::file(&relative_string(parent, &generated.path)))
        }
        StructureElement::Group { name, path, contents } => {
            let mut children = contents
                .iter()
                .map(|child| data_element(projects, child, path))
                .collect::<Result<Vec<_>, _>>()?;
            children.sort_by(compare_elements);
            Ok(WorkspaceDataElement::Group {
                location: format!("group:{}", relative_string(parent, path)),
                name: name.clone(),
                children,
            })
        }
    }
}

/// Files before groups; among files, projects last; then by location.
fn compare_elements(a: &WorkspaceDataElement, b: &WorkspaceDataElement) -> Ordering {
    let is_project = |e: &WorkspaceDataElement| e.location().ends_with(".xcodeproj");
    b.is_file()
        .cmp(&a.is_file())
        .then_with(|| match (a.is_file(), b.is_file()) {
            (true, true) => is_project(a).cmp(&is_project(b)),
            _ => Ordering::Equal,
        })
        .then_with(|| a.location().cmp(b.location()))
}

//! Generation of one project container.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::project::Project;
use crate::graph::Graph;
use crate::util::config::Config;
use crate::util::fs::{file_name, path_string, FileSystem};
use crate::xcode::{ObjectId, PbxObject, PbxProj, ProjectObject, SchemeDocument};

use super::config::ConfigGenerator;
use super::errors::GeneratorError;
use super::file_elements::ProjectFileElements;
use super::groups::ProjectGroups;
use super::scheme::{project_schemes, SchemeGenerator, SchemeTargets};
use super::target::{generate_target_dependencies, TargetGenerator};

/// Compatibility version written into the project object.
const COMPATIBILITY_VERSION: &str = "Xcode 10.0";

/// A generated project, ready to be written.
#[derive(Debug)]
pub struct GeneratedProject {
    pub name: String,
    /// Path of the `.xcodeproj` container
    pub path: PathBuf,
    pub pbxproj: PbxProj,
    /// Native target of every target, by target name
    pub targets: BTreeMap<String, ObjectId>,
    pub schemes: Vec<SchemeDocument>,
}

impl GeneratedProject {
    /// The container name without extension.
    pub fn file_name(&self) -> String {
        file_name(&self.path)
            .trim_end_matches(".xcodeproj")
            .to_string()
    }
}

pub struct ProjectGenerator<'a> {
    fs: &'a dyn FileSystem,
    config: &'a Config,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &'a Config) -> Self {
        ProjectGenerator { fs, config }
    }

    /// Path of the `.xcodeproj` generated for `project`.
    pub fn xcodeproj_path(&self, project: &Project) -> PathBuf {
        let name = match &project.file_name {
            Some(name) => name.clone(),
            None => self.config.project_file_name(&project.name),
        };
        project.path.join(format!("{}.xcodeproj", name))
    }

    pub fn generate(&self, project: &Project, graph: &Graph) -> Result<GeneratedProject, GeneratorError> {
        tracing::info!("generating project `{}`", project.name);
        let source_root = project.path.as_path();
        let mut proj = PbxProj::new();

        let mut groups = ProjectGroups::generate(&mut proj, project);
        let mut files = ProjectFileElements::new(self.fs);
        files.generate_project_files(&mut proj, &mut groups, project, graph, source_root);
        groups.attach_first_level(&mut proj);

        let configs = ConfigGenerator::new(self.config.swift_version());
        let configuration_list = configs.generate_project_config(&mut proj, project, &files)?;

        let target_generator = TargetGenerator::new(self.config);
        let mut targets = BTreeMap::new();
        let mut ordered = Vec::with_capacity(project.targets.len());
        for target in &project.targets {
            let native = target_generator.generate_target(&mut proj, project, target, &files, graph, source_root)?;
            ordered.push(native.clone());
            targets.insert(target.name.clone(), native);
        }
        generate_target_dependencies(&mut proj, project, &targets, graph)?;

        let root = proj.add(
            &format!("project:{}", path_string(&project.path)),
            PbxObject::Project(ProjectObject {
                name: project.name.clone(),
                build_configuration_list: configuration_list,
                compatibility_version: COMPATIBILITY_VERSION.to_string(),
                development_region: self.config.development_region().to_string(),
                has_scanned_for_encodings: false,
                known_regions: known_regions(self.config.development_region(), &files),
                main_group: groups.main.clone(),
                organization_name: self.config.generation.organization_name.clone(),
                product_ref_group: Some(groups.products.clone()),
                project_dir_path: String::new(),
                project_root: String::new(),
                targets: ordered,
            }),
        );
        proj.set_root_object(root);

        let path = self.xcodeproj_path(project);
        let mut scheme_targets = SchemeTargets::new();
        scheme_targets.add_project(project, &path, &targets);
        let schemes = SchemeGenerator::new(&scheme_targets, &project.path).generate_schemes(&project_schemes(project))?;

        tracing::debug!(
            "project `{}`: {} objects, {} targets, {} schemes",
            project.name,
            proj.len(),
            targets.len(),
            schemes.len()
        );
        Ok(GeneratedProject {
            name: project.name.clone(),
            path,
            pbxproj: proj,
            targets,
            schemes,
        })
    }
}

/// The development region, `Base`, then every locale found, without
/// duplicates.
fn known_regions(development_region: &str, files: &ProjectFileElements<'_>) -> Vec<String> {
    let mut regions = vec![development_region.to_string(), "Base".to_string()];
    for region in files.known_regions() {
        if !regions.iter().any(|r| r == region) {
            regions.push(region.to_string());
        }
    }
    regions
}

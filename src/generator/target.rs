//! Native targets and the dependencies between them.

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::action::ActionOrder;
use crate::core::project::Project;
use crate::core::target::Target;
use crate::graph::Graph;
use crate::util::config::Config;
use crate::util::fs::path_string;
use crate::xcode::{NativeTarget, ObjectId, PbxObject, PbxProj, TargetDependency};

use super::build_phase::{self, TargetContext};
use super::config::ConfigGenerator;
use super::errors::GeneratorError;
use super::file_elements::ProjectFileElements;
use super::link::LinkGenerator;

/// Generates the native target of every target of a project.
pub struct TargetGenerator<'a> {
    config: ConfigGenerator<'a>,
    link: LinkGenerator<'a>,
}

impl<'a> TargetGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        TargetGenerator {
            config: ConfigGenerator::new(config.swift_version()),
            link: LinkGenerator::new(config.embed_command()),
        }
    }

    /// Add a native target with its configurations and phases.
    ///
    /// Phases run in this order: pre actions, sources, resources, headers,
    /// embedding and linking, post actions.
    pub fn generate_target(
        &self,
        proj: &mut PbxProj,
        project: &Project,
        target: &Target,
        files: &ProjectFileElements<'_>,
        graph: &Graph,
        source_root: &Path,
    ) -> Result<ObjectId, GeneratorError> {
        let product_file = target.product_name_with_extension();
        let product = files
            .product(&product_file)
            .cloned()
            .ok_or(GeneratorError::MissingProduct { name: product_file })?;

        let native = proj.add(
            &format!("{}:{}", path_string(&project.path), target.name),
            PbxObject::NativeTarget(NativeTarget {
                name: target.name.clone(),
                product_name: target.product_name().to_string(),
                product_type: target.product.product_type().to_string(),
                product_reference: Some(product),
                build_configuration_list: None,
                build_phases: Vec::new(),
                build_rules: Vec::new(),
                dependencies: Vec::new(),
            }),
        );

        let ctx = TargetContext {
            project,
            target,
            native_target: &native,
            files,
            graph,
            source_root,
        };
        self.config.generate_target_config(proj, &ctx)?;
        build_phase::generate_actions(proj, &ctx, ActionOrder::Pre);
        build_phase::generate_build_phases(proj, &ctx)?;
        self.link.generate_links(proj, &ctx)?;
        build_phase::generate_actions(proj, &ctx, ActionOrder::Post);

        tracing::debug!("generated target `{}` ({})", target.name, target.product);
        Ok(native)
    }
}

/// Declare the dependencies between the native targets of one project, in
/// the order the manifest lists them.
pub fn generate_target_dependencies(
    proj: &mut PbxProj,
    project: &Project,
    native_targets: &BTreeMap<String, ObjectId>,
    graph: &Graph,
) -> Result<(), GeneratorError> {
    for target in &project.targets {
        let Some(native) = native_targets.get(&target.name) else {
            continue;
        };

        let mut dependencies = Vec::new();
        for dependency in graph.target_dependencies(&project.path, &target.name) {
            let Some(dependency_native) = native_targets.get(dependency.name()) else {
                return Err(GeneratorError::MissingNativeTarget {
                    target: target.name.clone(),
                    dependency: dependency.name().to_string(),
                });
            };
            dependencies.push(proj.add(
                &format!("{}:{}:depends:{}", path_string(&project.path), target.name, dependency.name()),
                PbxObject::TargetDependency(TargetDependency {
                    name: dependency.name().to_string(),
                    target: dependency_native.clone(),
                }),
            ));
        }

        if let Some(native) = proj.native_target_mut(native) {
            native.dependencies.extend(dependencies);
        }
    }
    Ok(())
}

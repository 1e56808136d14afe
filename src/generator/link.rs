//! Embedding, search paths and link phases of native targets.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::dependency::SdkStatus;
use crate::core::settings::{BuildSettings, SettingValue, INHERITED};
use crate::graph::DependencyReference;
use crate::util::fs::{file_name, path_string, relative_string};
use crate::xcode::{
    subfolder, BuildFile, BuildPhase, CopyFilesBuildPhase, ObjectId, PbxObject, PbxProj,
    ShellScriptBuildPhase, DEFAULT_BUILD_ACTION_MASK,
};

use super::build_phase::TargetContext;
use super::errors::GeneratorError;

/// Script of the embed phase when nothing needs embedding.
pub const NOTHING_TO_EMBED: &str = "echo \"Skipping, nothing to be embedded.\"";

/// `buildActionMask` of the phony copy phase ordering static dependencies.
const COPY_PRODUCTS_ACTION_MASK: u32 = 8;

/// Generates the link related phases and settings of a target.
pub struct LinkGenerator<'a> {
    /// Command embed scripts invoke, e.g. `dockyard`
    embed_command: &'a str,
}

impl<'a> LinkGenerator<'a> {
    pub fn new(embed_command: &'a str) -> Self {
        LinkGenerator { embed_command }
    }

    pub fn generate_links(&self, proj: &mut PbxProj, ctx: &TargetContext<'_>) -> Result<(), GeneratorError> {
        let project_path = &ctx.project.path;
        let name = &ctx.target.name;
        let embeddable = ctx.graph.embeddable_frameworks(project_path, name);
        let linkable = ctx.graph.linkable_dependencies(project_path, name);

        self.generate_embed_phases(proj, ctx, &embeddable)?;
        self.setup_search_paths(proj, ctx, &linkable)?;
        self.generate_linking_phase(proj, ctx, &linkable)?;
        self.generate_copy_products_phase(proj, ctx)?;
        Ok(())
    }

    fn generate_embed_phases(
        &self,
        proj: &mut PbxProj,
        ctx: &TargetContext<'_>,
        dependencies: &[DependencyReference],
    ) -> Result<(), GeneratorError> {
        let mut script = Vec::new();
        let mut input_paths = Vec::new();
        let mut output_paths = Vec::new();
        let mut embedded = Vec::new();

        for dependency in dependencies {
            match dependency {
                DependencyReference::Absolute(path) => {
                    let relative = relative_string(ctx.source_root, path);
                    script.push(format!("{} embed {}", self.embed_command, relative));
                    input_paths.push(format!("$(SRCROOT)/{}", relative));
                    output_paths.push(format!(
                        "$(BUILT_PRODUCTS_DIR)/$(FRAMEWORKS_FOLDER_PATH)/{}",
                        file_name(path)
                    ));
                }
                DependencyReference::Product(product) => {
                    embedded.push((product, product_reference(ctx, product)?));
                }
                DependencyReference::Sdk { .. } => {}
            }
        }

        let shell_script = if script.is_empty() {
            NOTHING_TO_EMBED.to_string()
        } else {
            script.join("\n")
        };
        let mut precompiled = ShellScriptBuildPhase::new("Embed Precompiled Frameworks", shell_script);
        precompiled.input_paths = input_paths;
        precompiled.output_paths = output_paths;
        let id = proj.add(
            &ctx.key("embed-precompiled"),
            PbxObject::ShellScriptBuildPhase(precompiled),
        );
        ctx.push_phase(proj, id);

        let files = embedded
            .into_iter()
            .map(|(product, file_ref)| {
                let mut settings = BuildSettings::new();
                settings.insert(
                    "ATTRIBUTES".to_string(),
                    SettingValue::Array(vec!["CodeSignOnCopy".to_string()]),
                );
                proj.add(
                    &ctx.key(&format!("embed:{}", product)),
                    PbxObject::BuildFile(BuildFile { file_ref, settings }),
                )
            })
            .collect();
        let id = proj.add(
            &ctx.key("embed-frameworks"),
            PbxObject::CopyFilesBuildPhase(CopyFilesBuildPhase {
                name: "Embed Frameworks".to_string(),
                build_action_mask: DEFAULT_BUILD_ACTION_MASK,
                dst_path: String::new(),
                dst_subfolder_spec: subfolder::FRAMEWORKS,
                files,
                run_only_for_deployment_postprocessing: false,
            }),
        );
        ctx.push_phase(proj, id);
        Ok(())
    }

    fn setup_search_paths(
        &self,
        proj: &mut PbxProj,
        ctx: &TargetContext<'_>,
        linkable: &[DependencyReference],
    ) -> Result<(), GeneratorError> {
        let project_path = &ctx.project.path;
        let name = &ctx.target.name;

        let framework_paths: BTreeSet<PathBuf> = linkable
            .iter()
            .filter_map(|dependency| match dependency {
                DependencyReference::Absolute(path) => path.parent().map(Path::to_path_buf),
                _ => None,
            })
            .collect();
        let framework_paths: Vec<PathBuf> = framework_paths.into_iter().collect();

        for (setting, paths) in [
            ("FRAMEWORK_SEARCH_PATHS", framework_paths),
            (
                "HEADER_SEARCH_PATHS",
                ctx.graph.libraries_public_headers_folders(project_path, name),
            ),
            (
                "LIBRARY_SEARCH_PATHS",
                ctx.graph.libraries_search_paths(project_path, name),
            ),
            (
                "SWIFT_INCLUDE_PATHS",
                ctx.graph.libraries_swift_include_paths(project_path, name),
            ),
        ] {
            append_search_paths(proj, ctx, setting, &paths)?;
        }
        Ok(())
    }

    fn generate_linking_phase(
        &self,
        proj: &mut PbxProj,
        ctx: &TargetContext<'_>,
        dependencies: &[DependencyReference],
    ) -> Result<(), GeneratorError> {
        let mut resolved = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let entry = match dependency {
                DependencyReference::Absolute(path) => {
                    let file_ref = ctx.files.element(path).cloned().ok_or_else(|| {
                        GeneratorError::MissingFileReference { path: path.clone() }
                    })?;
                    (path_string(path), file_ref, None)
                }
                DependencyReference::Product(product) => {
                    (format!("product:{}", product), product_reference(ctx, product)?, None)
                }
                DependencyReference::Sdk { path, status } => {
                    let file_ref = ctx.files.sdk(path).cloned().ok_or_else(|| {
                        GeneratorError::MissingFileReference { path: path.clone() }
                    })?;
                    let attribute = (*status == SdkStatus::Optional).then_some("Weak");
                    (format!("sdk:{}", path_string(path)), file_ref, attribute)
                }
            };
            resolved.push(entry);
        }

        let files = resolved
            .into_iter()
            .map(|(key, file_ref, attribute)| {
                let mut settings = BuildSettings::new();
                if let Some(attribute) = attribute {
                    settings.insert(
                        "ATTRIBUTES".to_string(),
                        SettingValue::Array(vec![attribute.to_string()]),
                    );
                }
                proj.add(
                    &ctx.key(&format!("frameworks:{}", key)),
                    PbxObject::BuildFile(BuildFile { file_ref, settings }),
                )
            })
            .collect();
        let id = proj.add(
            &ctx.key("frameworks"),
            PbxObject::FrameworksBuildPhase(BuildPhase::new(files)),
        );
        ctx.push_phase(proj, id);
        Ok(())
    }

    /// A static product cannot link its static dependencies, so a copy phase
    /// that never runs makes the build wait for them instead.
    fn generate_copy_products_phase(
        &self,
        proj: &mut PbxProj,
        ctx: &TargetContext<'_>,
    ) -> Result<(), GeneratorError> {
        if !ctx.target.product.is_static() {
            return Ok(());
        }

        let dependencies = ctx
            .graph
            .static_dependencies(&ctx.project.path, &ctx.target.name);
        let mut resolved = Vec::new();
        for dependency in &dependencies {
            if let DependencyReference::Product(product) = dependency {
                resolved.push((product, product_reference(ctx, product)?));
            }
        }
        if resolved.is_empty() {
            return Ok(());
        }

        let files = resolved
            .into_iter()
            .map(|(product, file_ref)| {
                proj.add(
                    &ctx.key(&format!("dependencies:{}", product)),
                    PbxObject::BuildFile(BuildFile {
                        file_ref,
                        settings: Default::default(),
                    }),
                )
            })
            .collect();
        let id = proj.add(
            &ctx.key("dependencies"),
            PbxObject::CopyFilesBuildPhase(CopyFilesBuildPhase {
                name: "Dependencies".to_string(),
                build_action_mask: COPY_PRODUCTS_ACTION_MASK,
                dst_path: String::new(),
                dst_subfolder_spec: subfolder::PRODUCTS_DIRECTORY,
                files,
                run_only_for_deployment_postprocessing: true,
            }),
        );
        ctx.push_phase(proj, id);
        Ok(())
    }
}

fn product_reference(ctx: &TargetContext<'_>, product: &str) -> Result<ObjectId, GeneratorError> {
    ctx.files
        .product(product)
        .cloned()
        .ok_or_else(|| GeneratorError::MissingProduct {
            name: product.to_string(),
        })
}

/// Append `$(SRCROOT)` relative paths to a setting of every configuration
/// of the target.
fn append_search_paths(
    proj: &mut PbxProj,
    ctx: &TargetContext<'_>,
    setting: &str,
    paths: &[PathBuf],
) -> Result<(), GeneratorError> {
    let missing = || GeneratorError::MissingConfigurationList {
        target: ctx.target.name.clone(),
    };
    let list = proj
        .native_target(ctx.native_target)
        .and_then(|t| t.build_configuration_list.clone())
        .ok_or_else(missing)?;
    let configurations = proj
        .configuration_list(&list)
        .map(|l| l.build_configurations.clone())
        .ok_or_else(missing)?;

    if paths.is_empty() {
        return Ok(());
    }
    let value = paths
        .iter()
        .map(|p| format!("$(SRCROOT)/{}", relative_string(ctx.source_root, p)))
        .collect::<Vec<_>>()
        .join(" ");

    for id in &configurations {
        if let Some(configuration) = proj.build_configuration_mut(id) {
            let existing = configuration
                .build_settings
                .get(setting)
                .and_then(SettingValue::as_str)
                .unwrap_or(INHERITED)
                .to_string();
            configuration.build_settings.insert(
                setting.to_string(),
                SettingValue::String(format!("{} {}", existing, value)),
            );
        }
    }
    Ok(())
}

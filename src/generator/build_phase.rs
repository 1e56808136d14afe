//! Sources, resources, headers and script phases of native targets.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::action::{ActionOrder, TargetAction};
use crate::core::project::Project;
use crate::core::settings::{BuildSettings, SettingValue};
use crate::core::target::Target;
use crate::graph::Graph;
use crate::util::fs::{extension, file_name, path_string, relative_string};
use crate::xcode::{BuildFile, BuildPhase, ObjectId, PbxObject, PbxProj, ShellScriptBuildPhase};

use super::errors::GeneratorError;
use super::file_elements::ProjectFileElements;

static ASSET_CATALOG_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+/.+\.xcassets/.+").unwrap());

static LOCALIZED_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+\.lproj)/.+").unwrap());

/// Everything a phase of one target is generated from.
pub struct TargetContext<'a> {
    pub project: &'a Project,
    pub target: &'a Target,
    pub native_target: &'a ObjectId,
    pub files: &'a ProjectFileElements<'a>,
    pub graph: &'a Graph,
    pub source_root: &'a Path,
}

impl TargetContext<'_> {
    /// Key prefix of objects owned by the target.
    pub fn key(&self, suffix: &str) -> String {
        format!(
            "{}:{}:{}",
            path_string(&self.project.path),
            self.target.name,
            suffix
        )
    }

    /// Append a phase to the target's phase list.
    pub fn push_phase(&self, proj: &mut PbxProj, phase: ObjectId) {
        if let Some(native) = proj.native_target_mut(self.native_target) {
            native.build_phases.push(phase);
        }
    }
}

/// A build file that resolved but is not in the arena yet.
struct PendingFile {
    key: String,
    file_ref: ObjectId,
    settings: BuildSettings,
}

impl PendingFile {
    fn new(key: impl Into<String>, file_ref: ObjectId) -> Self {
        PendingFile {
            key: key.into(),
            file_ref,
            settings: BuildSettings::new(),
        }
    }

    fn with_attribute(mut self, attribute: &str) -> Self {
        self.settings.insert(
            "ATTRIBUTES".to_string(),
            SettingValue::Array(vec![attribute.to_string()]),
        );
        self
    }
}

/// Add the build files and then the phase. Callers resolve every entry
/// before calling, so a failed lookup never leaves a partial phase behind.
fn commit_phase(
    proj: &mut PbxProj,
    ctx: &TargetContext<'_>,
    name: &str,
    entries: Vec<PendingFile>,
    phase: fn(BuildPhase) -> PbxObject,
) -> ObjectId {
    let files = entries
        .into_iter()
        .map(|entry| {
            proj.add(
                &ctx.key(&format!("{}:{}", name, entry.key)),
                PbxObject::BuildFile(BuildFile {
                    file_ref: entry.file_ref,
                    settings: entry.settings,
                }),
            )
        })
        .collect();
    let id = proj.add(&ctx.key(name), phase(BuildPhase::new(files)));
    ctx.push_phase(proj, id.clone());
    id
}

/// Add the sources, resources and headers phases of a target.
pub fn generate_build_phases(proj: &mut PbxProj, ctx: &TargetContext<'_>) -> Result<(), GeneratorError> {
    generate_sources(proj, ctx)?;
    generate_resources(proj, ctx)?;
    generate_headers(proj, ctx)?;
    Ok(())
}

fn generate_sources(proj: &mut PbxProj, ctx: &TargetContext<'_>) -> Result<ObjectId, GeneratorError> {
    let mut sources: Vec<_> = ctx.target.sources.iter().collect();
    sources.sort_by(|a, b| a.path.cmp(&b.path));

    let mut entries = Vec::with_capacity(sources.len());
    for source in sources {
        let file_ref = lookup(ctx, &source.path)?;
        let mut entry = PendingFile::new(path_string(&source.path), file_ref);
        if let Some(flags) = &source.compiler_flags {
            entry
                .settings
                .insert("COMPILER_FLAGS".to_string(), SettingValue::from(flags.as_str()));
        }
        entries.push(entry);
    }

    Ok(commit_phase(proj, ctx, "sources", entries, PbxObject::SourcesBuildPhase))
}

fn generate_resources(proj: &mut PbxProj, ctx: &TargetContext<'_>) -> Result<ObjectId, GeneratorError> {
    let mut resources: Vec<&PathBuf> = ctx.target.resources.iter().collect();
    resources.sort();

    let mut entries = Vec::new();
    let mut seen = BTreeSet::new();
    for path in resources {
        let path_str = path_string(path);
        if ASSET_CATALOG_CONTENT.is_match(&path_str) || extension(path) == Some("lproj") {
            continue;
        }

        let element_path = match LOCALIZED_FILE.captures(&path_str) {
            Some(captures) => {
                let lproj = Path::new(&captures[1]);
                lproj.parent().unwrap_or(lproj).join(file_name(path))
            }
            None => path.clone(),
        };
        if !seen.insert(element_path.clone()) {
            continue;
        }

        let file_ref = ctx
            .files
            .element(&element_path)
            .cloned()
            .ok_or_else(|| GeneratorError::MissingFileReference { path: path.clone() })?;
        entries.push(PendingFile::new(path_string(&element_path), file_ref));
    }

    let mut folders: Vec<&PathBuf> = ctx.target.folder_references.iter().collect();
    folders.sort();
    for path in folders {
        if !seen.insert(path.clone()) {
            continue;
        }
        entries.push(PendingFile::new(path_string(path), lookup(ctx, path)?));
    }

    for bundle in ctx
        .graph
        .resource_bundle_dependencies(&ctx.project.path, &ctx.target.name)
    {
        let name = bundle.target.product_name_with_extension();
        let file_ref = ctx
            .files
            .product(&name)
            .cloned()
            .ok_or_else(|| GeneratorError::MissingProduct { name: name.clone() })?;
        entries.push(PendingFile::new(format!("product:{}", name), file_ref));
    }

    let mut models: Vec<_> = ctx.target.core_data_models.iter().collect();
    models.sort_by(|a, b| a.path.cmp(&b.path));
    let mut bindings = Vec::with_capacity(models.len());
    for model in models {
        let version_group = lookup(ctx, &model.path)?;
        let current = lookup(ctx, &model.current_version_path())?;
        bindings.push((version_group.clone(), current));
        entries.push(PendingFile::new(path_string(&model.path), version_group));
    }

    for (version_group, current) in &bindings {
        proj.bind_current_version(version_group, current);
    }
    Ok(commit_phase(proj, ctx, "resources", entries, PbxObject::ResourcesBuildPhase))
}

fn generate_headers(proj: &mut PbxProj, ctx: &TargetContext<'_>) -> Result<Option<ObjectId>, GeneratorError> {
    let Some(headers) = ctx.target.headers.as_ref().filter(|h| !h.is_empty()) else {
        return Ok(None);
    };

    let mut entries = Vec::new();
    for (paths, attribute) in [
        (&headers.private, "Private"),
        (&headers.public, "Public"),
        (&headers.project, "Project"),
    ] {
        let mut paths: Vec<&PathBuf> = paths.iter().collect();
        paths.sort();
        for path in paths {
            let file_ref = lookup(ctx, path)?;
            entries.push(PendingFile::new(path_string(path), file_ref).with_attribute(attribute));
        }
    }

    Ok(Some(commit_phase(proj, ctx, "headers", entries, PbxObject::HeadersBuildPhase)))
}

/// Add one script phase per action of the given order.
pub fn generate_actions(proj: &mut PbxProj, ctx: &TargetContext<'_>, order: ActionOrder) {
    for (index, action) in ctx
        .target
        .actions
        .iter()
        .filter(|a| a.order == order)
        .enumerate()
    {
        let mut phase = ShellScriptBuildPhase::new(&action.name, shell_script(action, ctx.source_root));
        phase.input_paths = action
            .input_paths
            .iter()
            .map(|p| relative_string(ctx.source_root, p))
            .collect();
        phase.output_paths = action
            .output_paths
            .iter()
            .map(|p| relative_string(ctx.source_root, p))
            .collect();

        let key = ctx.key(&format!("action:{:?}:{}:{}", order, index, action.name));
        let id = proj.add(&key, PbxObject::ShellScriptBuildPhase(phase));
        ctx.push_phase(proj, id);
    }
}

/// The script a target action runs.
pub fn shell_script(action: &TargetAction, source_root: &Path) -> String {
    if let Some(script) = &action.script {
        return script.clone();
    }

    let command = match (&action.tool, &action.path) {
        (Some(tool), _) => tool.clone(),
        (None, Some(path)) => format!("$(SRCROOT)/{}", relative_string(source_root, path)),
        (None, None) => String::new(),
    };
    let mut script = format!("\"{}\"", command);
    if !action.arguments.is_empty() {
        script.push(' ');
        script.push_str(&action.arguments.join(" "));
    }
    script
}

fn lookup(ctx: &TargetContext<'_>, path: &Path) -> Result<ObjectId, GeneratorError> {
    ctx.files
        .element(path)
        .cloned()
        .ok_or_else(|| GeneratorError::MissingFileReference {
            path: path.to_path_buf(),
        })
}

//! Project.toml and Workspace.toml parsing and schema.
//!
//! Manifests are deserialized into raw structs first and then converted into
//! the typed model. Conversion resolves every path against the manifest
//! directory, expands globs and checks that literal paths exist.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::action::{ActionOrder, TargetAction};
use crate::core::dependency::{Dependency, SdkStatus};
use crate::core::project::Project;
use crate::core::scheme::{
    Arguments, BuildAction, ExecutionAction, RunAction, Scheme, TargetReference, TestAction,
};
use crate::core::settings::{BuildConfiguration, BuildSettings, Configuration, Settings};
use crate::core::target::{
    CoreDataModel, DeploymentTarget, Device, Headers, Platform, Product, SourceFile, Target,
};
use crate::core::workspace::{FileElement, Workspace};
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::{glob_files, glob_resources, is_glob_pattern, normalize_path, FileSystem};

/// File name of a project manifest.
pub const PROJECT_MANIFEST: &str = "Project.toml";

/// File name of a workspace manifest.
pub const WORKSPACE_MANIFEST: &str = "Workspace.toml";

/// Error while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no manifest found at {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("malformed manifest {}: {detail}", .path.display())]
    MalformedManifest { path: PathBuf, detail: String },

    #[error("file not found: {}", .path.display())]
    MissingFile { path: PathBuf, manifest: PathBuf },

    #[error("CoreData model {} has no version named `{current_version}`", .path.display())]
    InvalidCoreDataModel {
        path: PathBuf,
        current_version: String,
    },
}

impl ManifestError {
    fn malformed(path: &Path, detail: impl Into<String>) -> Self {
        ManifestError::MalformedManifest {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::ManifestNotFound { path } => {
                Diagnostic::error(format!("could not find a manifest in {}", path.display()))
                    .with_context(format!(
                        "looked for {} and {}",
                        PROJECT_MANIFEST, WORKSPACE_MANIFEST
                    ))
                    .with_suggestion(suggestions::NO_MANIFEST)
            }

            ManifestError::MalformedManifest { path, detail } => {
                Diagnostic::error("failed to parse manifest")
                    .with_location(path)
                    .with_context(detail.trim().to_string())
                    .with_suggestion(suggestions::MALFORMED_MANIFEST)
            }

            ManifestError::MissingFile { path, manifest } => {
                Diagnostic::error(format!("file not found: {}", path.display()))
                    .with_location(manifest)
                    .with_context("literal paths must exist; use a glob for optional files")
                    .with_suggestion("Fix the path or remove the entry from the manifest")
            }

            ManifestError::InvalidCoreDataModel {
                path,
                current_version,
            } => Diagnostic::error(format!(
                "CoreData model `{}` has no version `{}`",
                path.display(),
                current_version
            ))
            .with_context(format!(
                "expected {}",
                path.join(format!("{}.xcdatamodel", current_version)).display()
            ))
            .with_suggestion("Set `current-version` to one of the model's versions"),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawProjectManifest {
    project: RawProjectSection,

    #[serde(default)]
    settings: Option<RawSettings>,

    #[serde(default)]
    targets: Vec<RawTarget>,

    #[serde(default)]
    schemes: Vec<RawScheme>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawProjectSection {
    name: String,

    #[serde(default)]
    file_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    base: BuildSettings,

    #[serde(default)]
    debug: Option<RawConfiguration>,

    #[serde(default)]
    release: Option<RawConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    settings: BuildSettings,

    #[serde(default)]
    xcconfig: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawTarget {
    name: String,
    platform: Platform,
    product: Product,
    bundle_id: String,

    #[serde(default)]
    info_plist: Option<String>,

    #[serde(default)]
    entitlements: Option<String>,

    #[serde(default)]
    settings: Option<RawSettings>,

    #[serde(default)]
    sources: Vec<RawSource>,

    #[serde(default)]
    resources: Vec<RawFileElement>,

    #[serde(default)]
    headers: Option<RawHeaders>,

    #[serde(default)]
    core_data_models: Vec<RawCoreDataModel>,

    #[serde(default)]
    dependencies: Vec<RawDependency>,

    #[serde(default)]
    environment: BTreeMap<String, String>,

    #[serde(default)]
    deployment_target: Option<RawDeploymentTarget>,

    #[serde(default)]
    actions: Vec<RawAction>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSource {
    Pattern(String),
    #[serde(rename_all = "kebab-case")]
    Detailed {
        glob: String,
        #[serde(default)]
        compiler_flags: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawHeaders {
    #[serde(default)]
    public: Vec<String>,

    #[serde(default)]
    private: Vec<String>,

    #[serde(default)]
    project: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawCoreDataModel {
    path: String,
    current_version: String,
}

/// Dependency shapes. `Project` must come before `Target` since both carry a
/// `target` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Project {
        project: String,
        target: String,
    },
    Target {
        target: String,
    },
    Framework {
        framework: String,
    },
    #[serde(rename_all = "kebab-case")]
    Library {
        library: String,
        public_headers: String,
        #[serde(default)]
        swift_module_map: Option<String>,
    },
    Sdk {
        sdk: String,
        #[serde(default)]
        status: SdkStatus,
    },
}

#[derive(Debug, Deserialize)]
struct RawDeploymentTarget {
    version: String,

    #[serde(default)]
    devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawAction {
    name: String,
    order: ActionOrder,

    #[serde(default)]
    tool: Option<String>,

    #[serde(default)]
    path: Option<String>,

    #[serde(default)]
    script: Option<String>,

    #[serde(default)]
    arguments: Vec<String>,

    #[serde(default)]
    input_paths: Vec<String>,

    #[serde(default)]
    output_paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawScheme {
    name: String,

    #[serde(default = "default_true")]
    shared: bool,

    #[serde(default)]
    build: Option<RawBuildAction>,

    #[serde(default)]
    test: Option<RawTestAction>,

    #[serde(default)]
    run: Option<RawRunAction>,
}

fn default_true() -> bool {
    true
}

/// A scheme target: a bare name inside a project manifest, or a
/// `{ project, target }` table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSchemeTarget {
    Name(String),
    Qualified { project: String, target: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawBuildAction {
    #[serde(default)]
    targets: Vec<RawSchemeTarget>,

    #[serde(default)]
    pre_actions: Vec<RawExecutionAction>,

    #[serde(default)]
    post_actions: Vec<RawExecutionAction>,
}

#[derive(Debug, Deserialize)]
struct RawExecutionAction {
    title: String,
    script: String,

    #[serde(default)]
    target: Option<RawSchemeTarget>,
}

#[derive(Debug, Deserialize)]
struct RawTestAction {
    #[serde(default)]
    targets: Vec<RawSchemeTarget>,

    #[serde(default)]
    config: Option<BuildConfiguration>,

    #[serde(default)]
    coverage: bool,

    #[serde(default)]
    arguments: Vec<String>,

    #[serde(default)]
    environment: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawRunAction {
    #[serde(default)]
    config: Option<BuildConfiguration>,

    #[serde(default)]
    executable: Option<RawSchemeTarget>,

    #[serde(default)]
    arguments: Vec<String>,

    #[serde(default)]
    environment: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawWorkspaceManifest {
    workspace: RawWorkspaceSection,

    #[serde(default)]
    schemes: Vec<RawScheme>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawWorkspaceSection {
    name: String,

    #[serde(default)]
    projects: Vec<String>,

    #[serde(default)]
    additional_files: Vec<RawFileElement>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFileElement {
    Glob(String),
    #[serde(rename_all = "kebab-case")]
    FolderReference { folder_reference: String },
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Converts raw manifests into model objects, relative to one manifest.
struct Converter<'a> {
    fs: &'a dyn FileSystem,
    manifest_path: &'a Path,
    dir: PathBuf,
}

impl<'a> Converter<'a> {
    fn new(fs: &'a dyn FileSystem, manifest_path: &'a Path) -> Self {
        let dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Converter {
            fs,
            manifest_path,
            dir,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        normalize_path(&self.dir.join(path))
    }

    /// Resolve a literal path that must exist.
    fn existing(&self, path: &str) -> Result<PathBuf, ManifestError> {
        let resolved = self.resolve(path);
        if self.fs.exists(&resolved) {
            Ok(resolved)
        } else {
            Err(ManifestError::MissingFile {
                path: resolved,
                manifest: self.manifest_path.to_path_buf(),
            })
        }
    }

    /// Expand a glob, or check a literal path.
    fn expand(&self, pattern: &str, resources: bool) -> Result<Vec<PathBuf>, ManifestError> {
        if !is_glob_pattern(pattern) {
            return Ok(vec![self.existing(pattern)?]);
        }

        let result = if resources {
            glob_resources(self.fs, &self.dir, pattern)
        } else {
            glob_files(self.fs, &self.dir, pattern)
        };
        let files = result.map_err(|e| ManifestError::malformed(self.manifest_path, format!("{:#}", e)))?;

        if files.is_empty() {
            tracing::warn!(
                "no files found at: {}",
                self.dir.join(pattern).display()
            );
        }
        Ok(files.into_iter().map(|f| normalize_path(&f)).collect())
    }

    fn expand_all(&self, patterns: &[String], resources: bool) -> Result<Vec<PathBuf>, ManifestError> {
        let mut files = Vec::new();
        for pattern in patterns {
            for file in self.expand(pattern, resources)? {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        Ok(files)
    }

    fn settings(&self, raw: Option<RawSettings>) -> Result<Settings, ManifestError> {
        let raw = raw.unwrap_or_default();
        Ok(Settings {
            base: raw.base,
            debug: raw.debug.map(|c| self.configuration(c)).transpose()?,
            release: raw.release.map(|c| self.configuration(c)).transpose()?,
        })
    }

    fn configuration(&self, raw: RawConfiguration) -> Result<Configuration, ManifestError> {
        Ok(Configuration {
            settings: raw.settings,
            xcconfig: raw.xcconfig.map(|x| self.existing(&x)).transpose()?,
        })
    }

    fn target(&self, raw: RawTarget) -> Result<Target, ManifestError> {
        let mut target = Target::new(raw.name, raw.platform, raw.product, raw.bundle_id);

        target.info_plist = raw.info_plist.map(|p| self.existing(&p)).transpose()?;
        target.entitlements = raw.entitlements.map(|p| self.existing(&p)).transpose()?;
        if raw.settings.is_some() {
            target.settings = Some(self.settings(raw.settings)?);
        }

        for source in raw.sources {
            let (pattern, flags) = match source {
                RawSource::Pattern(pattern) => (pattern, None),
                RawSource::Detailed {
                    glob,
                    compiler_flags,
                } => (glob, compiler_flags),
            };
            for path in self.expand(&pattern, false)? {
                if target.sources.iter().any(|s| s.path == path) {
                    continue;
                }
                target.sources.push(SourceFile {
                    path,
                    compiler_flags: flags.clone(),
                });
            }
        }

        for resource in raw.resources {
            match resource {
                RawFileElement::Glob(pattern) => {
                    for path in self.expand(&pattern, true)? {
                        if !target.resources.contains(&path) {
                            target.resources.push(path);
                        }
                    }
                }
                RawFileElement::FolderReference { folder_reference } => {
                    let path = self.existing(&folder_reference)?;
                    if !target.folder_references.contains(&path) {
                        target.folder_references.push(path);
                    }
                }
            }
        }

        if let Some(headers) = raw.headers {
            target.headers = Some(Headers {
                public: self.expand_all(&headers.public, false)?,
                private: self.expand_all(&headers.private, false)?,
                project: self.expand_all(&headers.project, false)?,
            });
        }

        for model in raw.core_data_models {
            target.core_data_models.push(self.core_data_model(model)?);
        }

        for dependency in raw.dependencies {
            target.dependencies.push(self.dependency(&target.name, dependency)?);
        }

        for action in raw.actions {
            target.actions.push(self.action(&target.name, action)?);
        }

        target.environment = raw.environment;
        target.deployment_target = raw
            .deployment_target
            .map(|d| DeploymentTarget::new(d.version).with_devices(d.devices));

        Ok(target)
    }

    fn core_data_model(&self, raw: RawCoreDataModel) -> Result<CoreDataModel, ManifestError> {
        let path = self.existing(&raw.path)?;
        let pattern = path.join("*.xcdatamodel");
        let mut versions = self
            .fs
            .glob(&pattern.to_string_lossy())
            .map_err(|e| ManifestError::malformed(self.manifest_path, format!("{:#}", e)))?;
        versions.sort();

        let model = CoreDataModel {
            path,
            versions,
            current_version: raw.current_version,
        };
        if !model.has_current_version() {
            return Err(ManifestError::InvalidCoreDataModel {
                path: model.path,
                current_version: model.current_version,
            });
        }
        Ok(model)
    }

    fn dependency(&self, target: &str, raw: RawDependency) -> Result<Dependency, ManifestError> {
        Ok(match raw {
            RawDependency::Target { target } => Dependency::Target { name: target },
            RawDependency::Project { project, target } => Dependency::Project {
                target,
                path: self.resolve(&project),
            },
            RawDependency::Framework { framework } => Dependency::Framework {
                path: self.resolve(&framework),
            },
            RawDependency::Library {
                library,
                public_headers,
                swift_module_map,
            } => Dependency::Library {
                path: self.resolve(&library),
                public_headers: self.resolve(&public_headers),
                swift_module_map: swift_module_map.map(|m| self.resolve(&m)),
            },
            RawDependency::Sdk { sdk, status } => {
                if !(sdk.ends_with(".framework") || sdk.ends_with(".tbd")) {
                    return Err(ManifestError::malformed(
                        self.manifest_path,
                        format!(
                            "target `{}`: sdk `{}` must end in `.framework` or `.tbd`",
                            target, sdk
                        ),
                    ));
                }
                Dependency::Sdk { name: sdk, status }
            }
        })
    }

    fn action(&self, target: &str, raw: RawAction) -> Result<TargetAction, ManifestError> {
        let kinds = [raw.tool.is_some(), raw.path.is_some(), raw.script.is_some()];
        if kinds.iter().filter(|k| **k).count() != 1 {
            return Err(ManifestError::malformed(
                self.manifest_path,
                format!(
                    "target `{}`: action `{}` needs exactly one of `tool`, `path` or `script`",
                    target, raw.name
                ),
            ));
        }

        Ok(TargetAction {
            name: raw.name,
            order: raw.order,
            tool: raw.tool,
            path: raw.path.map(|p| self.resolve(&p)),
            script: raw.script,
            arguments: raw.arguments,
            input_paths: raw.input_paths.iter().map(|p| self.resolve(p)).collect(),
            output_paths: raw.output_paths.iter().map(|p| self.resolve(p)).collect(),
        })
    }

    /// `default_project` is the project bare target names refer to; `None`
    /// inside workspace manifests.
    fn scheme_target(
        &self,
        raw: RawSchemeTarget,
        default_project: Option<&Path>,
    ) -> Result<TargetReference, ManifestError> {
        match raw {
            RawSchemeTarget::Qualified { project, target } => {
                Ok(TargetReference::new(self.resolve(&project), target))
            }
            RawSchemeTarget::Name(name) => match default_project {
                Some(project) => Ok(TargetReference::new(project, name)),
                None => Err(ManifestError::malformed(
                    self.manifest_path,
                    format!(
                        "scheme target `{}` must be written as {{ project = \"...\", target = \"{}\" }}",
                        name, name
                    ),
                )),
            },
        }
    }

    fn scheme_targets(
        &self,
        raw: Vec<RawSchemeTarget>,
        default_project: Option<&Path>,
    ) -> Result<Vec<TargetReference>, ManifestError> {
        raw.into_iter()
            .map(|t| self.scheme_target(t, default_project))
            .collect()
    }

    fn execution_actions(
        &self,
        raw: Vec<RawExecutionAction>,
        default_project: Option<&Path>,
    ) -> Result<Vec<ExecutionAction>, ManifestError> {
        raw.into_iter()
            .map(|a| {
                Ok(ExecutionAction {
                    title: a.title,
                    script: a.script,
                    target: a
                        .target
                        .map(|t| self.scheme_target(t, default_project))
                        .transpose()?,
                })
            })
            .collect()
    }

    fn scheme(&self, raw: RawScheme, default_project: Option<&Path>) -> Result<Scheme, ManifestError> {
        let build_action = match raw.build {
            Some(build) => Some(BuildAction {
                targets: self.scheme_targets(build.targets, default_project)?,
                pre_actions: self.execution_actions(build.pre_actions, default_project)?,
                post_actions: self.execution_actions(build.post_actions, default_project)?,
            }),
            None => None,
        };

        let test_action = match raw.test {
            Some(test) => Some(TestAction {
                targets: self.scheme_targets(test.targets, default_project)?,
                configuration: test.config.unwrap_or(BuildConfiguration::Debug),
                coverage: test.coverage,
                arguments: arguments(test.environment, test.arguments),
            }),
            None => None,
        };

        let run_action = match raw.run {
            Some(run) => Some(RunAction {
                configuration: run.config.unwrap_or(BuildConfiguration::Debug),
                executable: run
                    .executable
                    .map(|t| self.scheme_target(t, default_project))
                    .transpose()?,
                arguments: arguments(run.environment, run.arguments),
            }),
            None => None,
        };

        Ok(Scheme {
            name: raw.name,
            shared: raw.shared,
            build_action,
            test_action,
            run_action,
        })
    }

    fn file_element(&self, raw: RawFileElement) -> Result<Vec<FileElement>, ManifestError> {
        match raw {
            RawFileElement::FolderReference { folder_reference } => {
                Ok(vec![FileElement::FolderReference {
                    path: self.resolve(&folder_reference),
                }])
            }
            RawFileElement::Glob(pattern) => {
                let full = self.dir.join(&pattern);
                let paths = self
                    .fs
                    .glob(&full.to_string_lossy())
                    .map_err(|e| ManifestError::malformed(self.manifest_path, format!("{:#}", e)))?;
                if paths.is_empty() {
                    tracing::warn!("no files found at: {}", full.display());
                }
                Ok(paths
                    .into_iter()
                    .map(|p| FileElement::File {
                        path: normalize_path(&p),
                    })
                    .collect())
            }
        }
    }

    /// Directories of member projects. Globs keep only directories holding a
    /// project manifest; literal entries must hold one.
    fn project_paths(&self, patterns: &[String]) -> Result<Vec<PathBuf>, ManifestError> {
        let mut projects = Vec::new();
        for pattern in patterns {
            if is_glob_pattern(pattern) {
                let full = self.dir.join(pattern);
                let matches = self
                    .fs
                    .glob(&full.to_string_lossy())
                    .map_err(|e| ManifestError::malformed(self.manifest_path, format!("{:#}", e)))?;
                let found: Vec<PathBuf> = matches
                    .into_iter()
                    .filter(|p| self.fs.is_file(&p.join(PROJECT_MANIFEST)))
                    .map(|p| normalize_path(&p))
                    .collect();
                if found.is_empty() {
                    tracing::warn!("no projects found at: {}", full.display());
                }
                projects.extend(found);
            } else {
                let path = self.resolve(pattern);
                if !self.fs.is_file(&path.join(PROJECT_MANIFEST)) {
                    return Err(ManifestError::ManifestNotFound { path });
                }
                projects.push(path);
            }
        }

        let mut unique = Vec::new();
        for project in projects {
            if !unique.contains(&project) {
                unique.push(project);
            }
        }
        Ok(unique)
    }
}

fn arguments(environment: BTreeMap<String, String>, launch: Vec<String>) -> Option<Arguments> {
    if environment.is_empty() && launch.is_empty() {
        None
    } else {
        Some(Arguments {
            environment,
            launch,
        })
    }
}

fn read_manifest(fs: &dyn FileSystem, path: &Path) -> Result<String, ManifestError> {
    if !fs.is_file(path) {
        return Err(ManifestError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    fs.read_to_string(path)
        .map_err(|e| ManifestError::malformed(path, format!("{:#}", e)))
}

/// Load `Project.toml` from a project directory.
pub fn load_project(fs: &dyn FileSystem, dir: &Path) -> Result<Project, ManifestError> {
    let manifest_path = dir.join(PROJECT_MANIFEST);
    let content = read_manifest(fs, &manifest_path)?;
    parse_project(fs, &content, &manifest_path)
}

/// Load `Workspace.toml` from a workspace directory.
pub fn load_workspace(fs: &dyn FileSystem, dir: &Path) -> Result<Workspace, ManifestError> {
    let manifest_path = dir.join(WORKSPACE_MANIFEST);
    let content = read_manifest(fs, &manifest_path)?;
    parse_workspace(fs, &content, &manifest_path)
}

/// Parse project manifest content located at `manifest_path`.
pub fn parse_project(
    fs: &dyn FileSystem,
    content: &str,
    manifest_path: &Path,
) -> Result<Project, ManifestError> {
    let raw: RawProjectManifest = toml::from_str(content)
        .map_err(|e| ManifestError::malformed(manifest_path, e.to_string()))?;

    let converter = Converter::new(fs, manifest_path);
    let mut project = Project::new(converter.dir.clone(), raw.project.name);
    project.file_name = raw.project.file_name;
    project.settings = converter.settings(raw.settings)?;

    for raw_target in raw.targets {
        let target = converter.target(raw_target)?;
        if project.target(&target.name).is_some() {
            return Err(ManifestError::malformed(
                manifest_path,
                format!("duplicate target `{}`", target.name),
            ));
        }
        project.targets.push(target);
    }

    let project_path = project.path.clone();
    for raw_scheme in raw.schemes {
        project
            .schemes
            .push(converter.scheme(raw_scheme, Some(&project_path))?);
    }

    tracing::debug!(
        "loaded project `{}` with {} targets",
        project.name,
        project.targets.len()
    );
    Ok(project)
}

/// Parse workspace manifest content located at `manifest_path`.
pub fn parse_workspace(
    fs: &dyn FileSystem,
    content: &str,
    manifest_path: &Path,
) -> Result<Workspace, ManifestError> {
    let raw: RawWorkspaceManifest = toml::from_str(content)
        .map_err(|e| ManifestError::malformed(manifest_path, e.to_string()))?;

    let converter = Converter::new(fs, manifest_path);
    let mut workspace = Workspace::new(converter.dir.clone(), raw.workspace.name);
    workspace.projects = converter.project_paths(&raw.workspace.projects)?;

    for element in raw.workspace.additional_files {
        workspace
            .additional_files
            .extend(converter.file_element(element)?);
    }

    for raw_scheme in raw.schemes {
        workspace.schemes.push(converter.scheme(raw_scheme, None)?);
    }

    Ok(workspace)
}

/// Generate a starter Project.toml.
pub fn generate_project_manifest(name: &str, platform: Platform) -> String {
    let bundle_prefix = name.to_lowercase().replace(|c: char| !c.is_ascii_alphanumeric(), "");
    format!(
        r#"[project]
name = "{name}"

[[targets]]
name = "{name}"
platform = "{platform}"
product = "app"
bundle-id = "io.{bundle_prefix}.{name}"
info-plist = "Info.plist"
sources = ["Sources/**/*.swift"]
resources = ["Resources/**"]

[[targets]]
name = "{name}Tests"
platform = "{platform}"
product = "unit-tests"
bundle-id = "io.{bundle_prefix}.{name}Tests"
sources = ["Tests/**/*.swift"]
dependencies = [{{ target = "{name}" }}]
"#,
        platform = platform.display_name().to_lowercase(),
    )
}

//! Implementation of `dockyard generate`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::loader::{load_projects, ModelLoader, TomlManifestLoader};
use crate::core::manifest::WORKSPACE_MANIFEST;
use crate::core::workspace::Workspace;
use crate::generator::{GeneratedWorkspace, WorkspaceGenerator};
use crate::graph::{BinaryInspector, Graph, GraphLoader, MachOInspector};
use crate::ops::writer;
use crate::util::config::{load_config_for, Config};
use crate::util::fs::{file_name, DiskFileSystem, FileSystem};

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Directory holding `Workspace.toml` or `Project.toml`
    pub path: PathBuf,

    /// Generate without writing anything
    pub dry_run: bool,
}

/// What a generate run produced.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub workspace: PathBuf,
    pub projects: Vec<PathBuf>,
    pub targets: usize,
    pub schemes: usize,
    /// Containers written to disk; empty for dry runs
    pub written: Vec<PathBuf>,
}

/// A workspace with the graph of every project it reaches.
#[derive(Debug)]
pub struct LoadedWorkspace {
    pub workspace: Workspace,
    pub graph: Graph,
}

/// Load the workspace rooted at `path` and build its graph.
///
/// A directory with a `Workspace.toml` loads that workspace; otherwise the
/// `Project.toml` of the directory is wrapped in a workspace of its own.
pub fn load_workspace(
    fs: Arc<dyn FileSystem>,
    inspector: &dyn BinaryInspector,
    path: &Path,
) -> Result<LoadedWorkspace> {
    let loader = TomlManifestLoader::new(Arc::clone(&fs));

    let declared = if fs.is_file(&path.join(WORKSPACE_MANIFEST)) {
        Some(loader.load_workspace(path)?)
    } else {
        None
    };
    let entries = match &declared {
        Some(workspace) => workspace.projects.clone(),
        None => vec![path.to_path_buf()],
    };

    let projects = load_projects(&loader, &entries)?;
    tracing::info!("loaded {} project(s)", projects.len());

    let workspace = match declared {
        Some(workspace) => workspace,
        None => {
            let name = projects
                .get(path)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| file_name(path));
            Workspace::for_project(path, name)
        }
    };

    let graph = GraphLoader::new(fs.as_ref(), inspector).load(projects)?;
    Ok(LoadedWorkspace { workspace, graph })
}

/// Load and generate the workspace rooted at `path` without writing it.
pub fn generate_workspace(
    fs: Arc<dyn FileSystem>,
    inspector: &dyn BinaryInspector,
    path: &Path,
    config: &Config,
) -> Result<GeneratedWorkspace> {
    let loaded = load_workspace(Arc::clone(&fs), inspector, path)?;
    let generated = WorkspaceGenerator::new(fs.as_ref(), config).generate(&loaded.workspace, &loaded.graph)?;
    Ok(generated)
}

/// Generate and write the workspace of `opts.path`.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateResult> {
    let path = opts
        .path
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", opts.path.display()))?;
    let config = load_config_for(&path);

    let generated = generate_workspace(Arc::new(DiskFileSystem), &MachOInspector, &path, &config)?;

    let written = if opts.dry_run {
        Vec::new()
    } else {
        writer::write_workspace(&generated)?
    };

    Ok(GenerateResult {
        workspace: generated.path.clone(),
        projects: generated.projects.values().map(|p| p.path.clone()).collect(),
        targets: generated.projects.values().map(|p| p.targets.len()).sum(),
        schemes: generated.schemes.len()
            + generated
                .projects
                .values()
                .map(|p| p.schemes.len())
                .sum::<usize>(),
        written,
    })
}

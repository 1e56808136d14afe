//! `dockyard graph` command
//!
//! Prints the dependency graph of a workspace.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{GraphArgs, GraphFormat};
use dockyard::graph::MachOInspector;
use dockyard::ops::generate::load_workspace;
use dockyard::ops::graph::{format_tree, to_json};
use dockyard::util::fs::DiskFileSystem;

pub fn execute(args: GraphArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let path = path
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", path.display()))?;

    let loaded = load_workspace(Arc::new(DiskFileSystem), &MachOInspector, &path)?;

    match args.format {
        GraphFormat::Text => print!("{}", format_tree(&loaded.graph, &path)),
        GraphFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&loaded.graph))?),
    }

    Ok(())
}

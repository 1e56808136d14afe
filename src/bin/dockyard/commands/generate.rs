//! `dockyard generate` command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GenerateArgs;
use dockyard::ops::generate::{generate, GenerateOptions};
use dockyard::util::shell::{Shell, Status};

pub fn execute(args: GenerateArgs, shell: &Arc<Shell>) -> Result<()> {
    let opts = GenerateOptions {
        path: args.path.unwrap_or_else(|| PathBuf::from(".")),
        dry_run: args.dry_run,
    };

    let span = shell.span(Status::Generating, opts.path.display());
    let result = generate(&opts)?;

    for path in &result.written {
        shell.status(Status::Created, path.display());
    }

    span.finish_with_message(format!(
        "{} project(s), {} target(s), {} scheme(s)",
        result.projects.len(),
        result.targets,
        result.schemes
    ));

    if opts.dry_run {
        shell.status(Status::Skipped, format!("writing {} (dry run)", result.workspace.display()));
    }

    Ok(())
}

//! Dockyard CLI - generates Xcode projects and workspaces from TOML manifests

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use dockyard::core::manifest::ManifestError;
use dockyard::generator::GeneratorError;
use dockyard::graph::GraphError;
use dockyard::util::diagnostic::{emit, Diagnostic};
use dockyard::util::shell::{ColorChoice, Shell};

fn main() {
    let cli = Cli::parse();

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Arc::new(Shell::from_flags(cli.quiet, cli.verbose, color));

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("dockyard=debug")
    } else if cli.quiet {
        EnvFilter::new("dockyard=error")
    } else {
        EnvFilter::new("dockyard=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(shell.use_color())
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli.command, &shell) {
        match diagnostic(&e) {
            Some(diagnostic) => emit(&diagnostic, shell.use_color()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(command: Commands, shell: &Arc<Shell>) -> Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, shell),
        Commands::Graph(args) => commands::graph::execute(args),
        Commands::Embed(args) => commands::embed::execute(args, shell),
        Commands::Init(args) => commands::init::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// The rendered diagnostic of the first typed error in the chain.
fn diagnostic(err: &anyhow::Error) -> Option<Diagnostic> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ManifestError>() {
            Some(e.to_diagnostic())
        } else if let Some(e) = cause.downcast_ref::<GraphError>() {
            Some(e.to_diagnostic())
        } else {
            cause.downcast_ref::<GeneratorError>().map(GeneratorError::to_diagnostic)
        }
    })
}

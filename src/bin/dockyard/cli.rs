//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;
use dockyard::core::target::Platform;

/// Dockyard - generates Xcode projects and workspaces from TOML manifests
#[derive(Parser)]
#[command(name = "dockyard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the projects and the workspace of a directory
    Generate(GenerateArgs),

    /// Display the dependency graph
    Graph(GraphArgs),

    /// Copy a precompiled framework into the built product (run by build phases)
    Embed(EmbedArgs),

    /// Create a Project.toml with an app and a test target
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory holding Workspace.toml or Project.toml (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Generate without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Directory holding Workspace.toml or Project.toml (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = GraphFormat::Text)]
    pub format: GraphFormat,
}

#[derive(Args)]
pub struct EmbedArgs {
    /// Framework to embed, relative to $SRCROOT
    pub path: PathBuf,
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Project name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Platform of the generated targets
    #[arg(long, default_value = "ios")]
    pub platform: Platform,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

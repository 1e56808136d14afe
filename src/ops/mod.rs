//! High-level operations.
//!
//! This module contains the implementation of Dockyard commands.

pub mod embed;
pub mod generate;
pub mod graph;
pub mod init;
pub mod writer;

pub use embed::{embed, EmbedEnvironment};
pub use generate::{generate, generate_workspace, load_workspace, GenerateOptions, GenerateResult, LoadedWorkspace};
pub use graph::{format_tree, to_json};
pub use init::{init_project, InitOptions};
pub use writer::{write_project, write_workspace};

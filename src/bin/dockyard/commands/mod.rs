//! Command implementations

pub mod completions;
pub mod embed;
pub mod generate;
pub mod graph;
pub mod init;

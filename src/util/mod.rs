//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod hash;
pub mod shell;

pub use config::Config;
pub use diagnostic::Diagnostic;
pub use fs::{DiskFileSystem, FileSystem};

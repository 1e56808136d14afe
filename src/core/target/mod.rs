//! Target definitions - what gets built.
//!
//! A Target represents a buildable artifact of a project: an app, a
//! framework, a library, a bundle or a test bundle.

mod core;
mod platform;
mod product;

pub use self::core::{CoreDataModel, Headers, SourceFile, Target};
pub use self::platform::{DeploymentTarget, Device, Platform};
pub use self::product::Product;

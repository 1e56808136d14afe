//! `dockyard init` command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::cli::InitArgs;
use dockyard::ops::init::{init_project, InitOptions};
use dockyard::util::shell::{Shell, Status};

/// Determines the project name from the arguments or directory.
///
/// This is extracted for testability.
pub fn determine_project_name(name: &Option<String>, path: &Path) -> String {
    name.clone().unwrap_or_else(|| {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string()
    })
}

/// Validates a project name.
///
/// Names end up as target names, module names and bundle identifiers, so
/// they must start with a letter and hold only letters, digits, hyphens and
/// underscores.
pub fn validate_project_name(name: &str) -> Result<(), &'static str> {
    let Some(first) = name.chars().next() else {
        return Err("project name cannot be empty");
    };

    if !first.is_ascii_alphabetic() {
        return Err("project name must start with a letter");
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
            return Err("project name contains invalid characters");
        }
    }

    Ok(())
}

pub fn execute(args: InitArgs, shell: &Arc<Shell>) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let path = if path == Path::new(".") {
        std::env::current_dir()?
    } else {
        path
    };

    let name = determine_project_name(&args.name, &path);
    validate_project_name(&name).map_err(|e| anyhow!("invalid project name `{}`: {}", name, e))?;

    let opts = InitOptions {
        name: name.clone(),
        platform: args.platform,
    };
    init_project(&path, &opts)?;

    shell.status(
        Status::Created,
        format!("{} project `{}`", args.platform.display_name(), name),
    );
    shell.note("run `dockyard generate` to create the Xcode project");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dockyard::core::target::Platform;

    /// Helper to parse InitArgs from command-line strings.
    fn parse_init_args(args: &[&str]) -> InitArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            init: InitArgs,
        }
        let cli = TestCli::parse_from(args);
        cli.init
    }

    // =========================================================================
    // InitArgs Tests
    // =========================================================================

    #[test]
    fn test_init_args_defaults() {
        let args = parse_init_args(&["test"]);

        assert!(args.name.is_none());
        assert!(args.path.is_none());
        assert_eq!(args.platform, Platform::Ios);
    }

    #[test]
    fn test_init_with_name_and_path() {
        let args = parse_init_args(&["test", "--name", "Demo", "mydir"]);
        assert_eq!(args.name, Some("Demo".to_string()));
        assert_eq!(args.path, Some(PathBuf::from("mydir")));
    }

    #[test]
    fn test_init_platform() {
        let args = parse_init_args(&["test", "--platform", "macos"]);
        assert_eq!(args.platform, Platform::Macos);

        let args = parse_init_args(&["test", "--platform", "tvOS"]);
        assert_eq!(args.platform, Platform::Tvos);
    }

    #[test]
    fn test_init_rejects_unknown_platform() {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            init: InitArgs,
        }
        assert!(TestCli::try_parse_from(["test", "--platform", "linux"]).is_err());
    }

    // =========================================================================
    // determine_project_name Tests
    // =========================================================================

    #[test]
    fn test_determine_name_from_flag() {
        let name = determine_project_name(&Some("Demo".to_string()), Path::new("/tmp/other"));
        assert_eq!(name, "Demo");
    }

    #[test]
    fn test_determine_name_from_directory() {
        let name = determine_project_name(&None, Path::new("/Users/dev/MyApp"));
        assert_eq!(name, "MyApp");
    }

    #[test]
    fn test_determine_name_from_root() {
        let name = determine_project_name(&None, Path::new("/"));
        assert_eq!(name, "unnamed");
    }

    // =========================================================================
    // validate_project_name Tests
    // =========================================================================

    #[test]
    fn test_validate_valid_names() {
        assert!(validate_project_name("App").is_ok());
        assert!(validate_project_name("my-app").is_ok());
        assert!(validate_project_name("Core_Kit2").is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        assert_eq!(validate_project_name(""), Err("project name cannot be empty"));
    }

    #[test]
    fn test_validate_leading_character() {
        assert!(validate_project_name("2App").is_err());
        assert!(validate_project_name("-app").is_err());
        assert!(validate_project_name("_app").is_err());
        assert!(validate_project_name(".app").is_err());
    }

    #[test]
    fn test_validate_invalid_characters() {
        assert!(validate_project_name("my app").is_err());
        assert!(validate_project_name("app.kit").is_err());
        assert!(validate_project_name("app@1").is_err());
    }
}

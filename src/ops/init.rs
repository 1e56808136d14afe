//! Implementation of `dockyard init`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::manifest::{generate_project_manifest, PROJECT_MANIFEST};
use crate::core::target::Platform;
use crate::util::fs::write_string;

/// Options for scaffolding a project.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project name
    pub name: String,

    pub platform: Platform,
}

/// Create a `Project.toml` with an app and a unit test target, plus the
/// files it references.
pub fn init_project(path: &Path, opts: &InitOptions) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(PROJECT_MANIFEST);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", PROJECT_MANIFEST, path.display());
    }

    write_string(&manifest_path, &generate_project_manifest(&opts.name, opts.platform))?;
    write_string(&path.join("Info.plist"), INFO_PLIST)?;
    write_string(
        &path.join("Sources").join("AppDelegate.swift"),
        &app_delegate(opts.platform),
    )?;
    write_string(
        &path.join("Tests").join(format!("{}Tests.swift", opts.name)),
        &unit_test(&opts.name),
    )?;
    fs::create_dir_all(path.join("Resources")).with_context(|| "failed to create Resources directory")?;

    let gitignore = r#"# Generated containers
*.xcodeproj/
*.xcworkspace/

# Xcode
DerivedData/
xcuserdata/
"#;
    write_string(&path.join(".gitignore"), gitignore)?;

    Ok(())
}

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleExecutable</key>
	<string>$(EXECUTABLE_NAME)</string>
	<key>CFBundleIdentifier</key>
	<string>$(PRODUCT_BUNDLE_IDENTIFIER)</string>
	<key>CFBundleName</key>
	<string>$(PRODUCT_NAME)</string>
	<key>CFBundlePackageType</key>
	<string>APPL</string>
	<key>CFBundleShortVersionString</key>
	<string>1.0</string>
	<key>CFBundleVersion</key>
	<string>1</string>
</dict>
</plist>
"#;

fn app_delegate(platform: Platform) -> String {
    match platform {
        Platform::Macos => r#"import Cocoa

@NSApplicationMain
final class AppDelegate: NSObject, NSApplicationDelegate {
    func applicationDidFinishLaunching(_ notification: Notification) {}
}
"#
        .to_string(),
        _ => r#"import UIKit

@UIApplicationMain
final class AppDelegate: UIResponder, UIApplicationDelegate {
    var window: UIWindow?
}
"#
        .to_string(),
    }
}

fn unit_test(name: &str) -> String {
    format!(
        r#"import XCTest
@testable import {name}

final class {name}Tests: XCTestCase {{
    func testExample() {{
        XCTAssertTrue(true)
    }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::load_project;
    use crate::core::target::Product;
    use crate::util::fs::DiskFileSystem;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffold_loads() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Demo");
        let opts = InitOptions {
            name: "Demo".to_string(),
            platform: Platform::Ios,
        };

        init_project(&dir, &opts).unwrap();
        assert!(dir.join(PROJECT_MANIFEST).is_file());
        assert!(dir.join("Sources/AppDelegate.swift").is_file());
        assert!(dir.join("Tests/DemoTests.swift").is_file());

        let project = load_project(&DiskFileSystem, &dir).unwrap();
        assert_eq!(project.name, "Demo");
        assert_eq!(project.targets.len(), 2);
        assert_eq!(project.targets[1].product, Product::UnitTests);
        assert_eq!(project.targets[0].sources.len(), 1);
    }

    #[test]
    fn test_init_refuses_existing_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(PROJECT_MANIFEST), "").unwrap();
        let opts = InitOptions {
            name: "Demo".to_string(),
            platform: Platform::Macos,
        };
        let err = init_project(tmp.path(), &opts).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}

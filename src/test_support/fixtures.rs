//! Test fixtures for common test scenarios.
//!
//! Model builders for graph and generator tests, a binary inspector with
//! canned answers, and a project tree that can be written to a
//! [`MockFileSystem`](super::MockFileSystem).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::core::action::TargetAction;
use crate::core::dependency::Dependency;
use crate::core::project::Project;
use crate::core::scheme::Scheme;
use crate::core::settings::Settings;
use crate::core::target::{Headers, Platform, Product, SourceFile, Target};
use crate::graph::{BinaryInspector, Linking};

/// A project with no targets.
pub fn project(path: impl Into<PathBuf>, name: &str) -> Project {
    Project::new(path, name)
}

/// An iOS target with bundle id `io.dockyard.<name>`.
pub fn target(name: &str, product: Product) -> Target {
    Target::new(name, Platform::Ios, product, format!("io.dockyard.{}", name))
}

impl Project {
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

impl Target {
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_sources<P: Into<PathBuf>>(mut self, sources: impl IntoIterator<Item = P>) -> Self {
        self.sources
            .extend(sources.into_iter().map(SourceFile::new));
        self
    }

    pub fn with_resources<P: Into<PathBuf>>(mut self, resources: impl IntoIterator<Item = P>) -> Self {
        self.resources
            .extend(resources.into_iter().map(Into::into));
        self
    }

    pub fn with_folder_reference(mut self, path: impl Into<PathBuf>) -> Self {
        self.folder_references.push(path.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_action(mut self, action: TargetAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_info_plist(mut self, path: impl Into<PathBuf>) -> Self {
        self.info_plist = Some(path.into());
        self
    }
}

/// A [`BinaryInspector`] answering from a fixed table of binary paths.
#[derive(Debug, Clone, Default)]
pub struct StaticInspector {
    linkings: HashMap<PathBuf, Linking>,
}

impl StaticInspector {
    pub fn with(mut self, binary: impl Into<PathBuf>, linking: Linking) -> Self {
        self.linkings.insert(binary.into(), linking);
        self
    }
}

impl BinaryInspector for StaticInspector {
    fn linking(&self, binary: &Path) -> Option<Linking> {
        self.linkings.get(binary).copied()
    }
}

/// A project directory: a `Project.toml` plus files, relative to the
/// project root.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    pub name: String,
    pub manifest: String,
    pub files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// An iOS app with one source file and a unit test target.
    pub fn app(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = format!(
            r#"[project]
name = "{name}"

[[targets]]
name = "{name}"
platform = "ios"
product = "app"
bundle-id = "io.dockyard.{name}"
info-plist = "Info.plist"
sources = ["Sources/**/*.swift"]

[[targets]]
name = "{name}Tests"
platform = "ios"
product = "unit-tests"
bundle-id = "io.dockyard.{name}Tests"
sources = ["Tests/**/*.swift"]
dependencies = [{{ target = "{name}" }}]
"#
        );

        ProjectFixture::new(name.clone(), manifest)
            .with_file("Info.plist", sources::info_plist())
            .with_file("Sources/AppDelegate.swift", sources::swift_type("AppDelegate"))
            .with_file(
                format!("Tests/{}Tests.swift", name),
                sources::swift_type(&format!("{}Tests", name)),
            )
    }

    /// A dynamic iOS framework with one source file.
    pub fn framework(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = format!(
            r#"[project]
name = "{name}"

[[targets]]
name = "{name}"
platform = "ios"
product = "framework"
bundle-id = "io.dockyard.{name}"
sources = ["Sources/**/*.swift"]
"#
        );

        ProjectFixture::new(name.clone(), manifest)
            .with_file(format!("Sources/{}.swift", name), sources::swift_type(&name))
    }

    pub fn new(name: impl Into<String>, manifest: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            manifest: manifest.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write the project into a mock filesystem at `base_path/<name>`.
    pub fn write_to_mock(&self, fs: &mut super::MockFileSystem, base_path: &Path) -> PathBuf {
        let project_path = base_path.join(&self.name);
        fs.add_dir(&project_path);
        fs.add_file(
            project_path.join(crate::core::manifest::PROJECT_MANIFEST),
            self.manifest.as_bytes(),
        );
        for (rel_path, content) in &self.files {
            fs.add_file(project_path.join(rel_path), content.as_bytes());
        }
        project_path
    }
}

/// Common manifest templates.
pub mod manifests {
    /// A workspace manifest listing project globs.
    pub fn workspace(name: &str, projects: &[&str]) -> String {
        let projects = projects
            .iter()
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"[workspace]
name = "{name}"
projects = [{projects}]
"#
        )
    }
}

/// Common file contents.
pub mod sources {
    pub fn swift_type(name: &str) -> String {
        format!("import Foundation\n\nfinal class {name} {{}}\n")
    }

    pub fn info_plist() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict/>
</plist>
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::load_project;
    use crate::test_support::MockFileSystem;
    use crate::util::fs::FileSystem;

    #[test]
    fn test_app_fixture_loads() {
        let mut fs = MockFileSystem::new();
        let path = ProjectFixture::app("App").write_to_mock(&mut fs, Path::new("/w"));

        assert!(fs.exists(Path::new("/w/App/Sources/AppDelegate.swift")));
        let project = load_project(&fs, &path).unwrap();
        assert_eq!(project.target_names(), vec!["App", "AppTests"]);
        assert_eq!(project.targets[0].sources.len(), 1);
    }

    #[test]
    fn test_static_inspector() {
        let inspector = StaticInspector::default().with("/a/Foo", Linking::Static);
        assert_eq!(inspector.linking(Path::new("/a/Foo")), Some(Linking::Static));
        assert_eq!(inspector.linking(Path::new("/a/Bar")), None);
    }

    #[test]
    fn test_workspace_template() {
        let ws = manifests::workspace("W", &["App", "Libs/*"]);
        assert!(ws.contains("projects = [\"App\", \"Libs/*\"]"));
    }
}

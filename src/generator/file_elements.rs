//! The file tree of a generated project.
//!
//! Every path any target of the project refers to is mapped onto exactly one
//! element of a group tree that mirrors the directories below the source
//! root. Localized files collapse into variant groups, CoreData models into
//! version groups, and target products live in their own table keyed by
//! product file name. Folder references stay single elements and are never
//! descended into.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use crate::core::project::Project;
use crate::core::target::Target;
use crate::graph::{Graph, GraphNode, SdkNode};
use crate::util::fs::{
    closest_relative_element_path, extension, file_name, is_file_package, normalize_path,
    path_string, relative_path, FileSystem,
};
use crate::xcode::{
    last_known_file_type, FileReference, Group, ObjectId, PbxObject, PbxProj, SourceTree,
    VersionGroup,
};

use super::groups::ProjectGroups;

/// An element on the way to a path, as returned by [`ProjectFileElements::add_element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedElement {
    pub id: ObjectId,
    /// Absolute path the element stands for
    pub path: PathBuf,
    /// Whether further path components can be added below it
    pub is_group: bool,
}

/// Element caches of one project generation.
pub struct ProjectFileElements<'a> {
    fs: &'a dyn FileSystem,
    elements: HashMap<PathBuf, ObjectId>,
    groups: HashMap<PathBuf, ObjectId>,
    /// `.lproj` directories already split into variant groups
    lprojs: HashSet<PathBuf>,
    folder_references: HashSet<PathBuf>,
    products: HashMap<String, ObjectId>,
    sdks: BTreeMap<PathBuf, ObjectId>,
    known_regions: BTreeSet<String>,
}

impl<'a> ProjectFileElements<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        ProjectFileElements {
            fs,
            elements: HashMap::new(),
            groups: HashMap::new(),
            lprojs: HashSet::new(),
            folder_references: HashSet::new(),
            products: HashMap::new(),
            sdks: BTreeMap::new(),
            known_regions: BTreeSet::new(),
        }
    }

    /// Create the elements of every file, product, playground and
    /// dependency of `project`.
    pub fn generate_project_files(
        &mut self,
        proj: &mut PbxProj,
        groups: &mut ProjectGroups,
        project: &Project,
        graph: &Graph,
        source_root: &Path,
    ) {
        self.folder_references.extend(
            project
                .targets
                .iter()
                .flat_map(|t| t.folder_references.iter().cloned()),
        );
        let files = project_files(project);
        tracing::debug!("{} files referenced by `{}`", files.len(), project.name);
        for path in &files {
            self.generate_path(proj, groups, path, source_root);
        }

        let mut targets: Vec<&Target> = project.targets.iter().collect();
        targets.sort_by_cached_key(|t| t.product_name_with_extension());
        for target in targets {
            self.add_product(proj, groups, target);
        }

        self.generate_playgrounds(proj, groups, project);

        for node in graph.find_all_for_project(&project.path) {
            match node {
                GraphNode::Target(target) => {
                    if target.project_path == project.path {
                        continue;
                    }
                    self.add_product(proj, groups, &target.target);
                }
                GraphNode::Precompiled(precompiled) => {
                    self.generate_path(proj, groups, &precompiled.path, source_root);
                }
                GraphNode::Sdk(sdk) => {
                    self.add_sdk(proj, groups, sdk);
                }
            }
        }
    }

    /// Add the element of `path` and every group above it.
    pub fn generate_path(
        &mut self,
        proj: &mut PbxProj,
        groups: &ProjectGroups,
        path: &Path,
        source_root: &Path,
    ) {
        if self.elements.contains_key(path) {
            return;
        }

        let closest = closest_relative_element_path(path, source_root);
        let closest_absolute = normalize_path(&source_root.join(&closest));
        let is_leaf = closest == relative_path(source_root, path);

        let Some(first) = self.add_element(proj, &closest, is_leaf, source_root, &groups.main) else {
            return;
        };
        if closest_absolute == path || !first.is_group {
            return;
        }

        let mut group = first.id;
        let mut last_path = first.path;
        let components: Vec<PathBuf> = relative_path(&last_path, path)
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(PathBuf::from(name)),
                _ => None,
            })
            .collect();
        let count = components.len();

        for (index, component) in components.iter().enumerate() {
            let Some(element) =
                self.add_element(proj, component, index + 1 == count, &last_path, &group)
            else {
                return;
            };
            if !element.is_group {
                return;
            }
            group = element.id;
            last_path = element.path;
        }
    }

    /// Add the element for `relative` below `from` into the group `into`.
    ///
    /// Returns the element with `is_group` telling whether further components
    /// can be added below it. Variant groups are keyed by their localized
    /// files rather than by the `.lproj` directory, so adding one returns
    /// `None`. Adding the same path twice returns the cached element.
    pub fn add_element(
        &mut self,
        proj: &mut PbxProj,
        relative: &Path,
        is_leaf: bool,
        from: &Path,
        into: &ObjectId,
    ) -> Option<AddedElement> {
        let absolute = normalize_path(&from.join(relative));
        if let Some(id) = self.groups.get(&absolute) {
            return Some(AddedElement {
                id: id.clone(),
                path: absolute,
                is_group: true,
            });
        }
        if let Some(id) = self.elements.get(&absolute) {
            return Some(AddedElement {
                id: id.clone(),
                path: absolute,
                is_group: false,
            });
        }

        let name = if relative.components().count() != 1 {
            Some(file_name(relative))
        } else {
            None
        };
        let relative_string = path_string(relative);

        if self.folder_references.contains(&absolute) {
            let reference = FileReference::new(relative_string, SourceTree::Group)
                .with_name(name)
                .with_file_type(Some("folder"));
            return Some(self.add_file(proj, into, absolute, reference));
        }

        match extension(&absolute) {
            Some("lproj") => {
                self.add_variant_group(proj, &absolute, into);
                None
            }
            Some("xcdatamodeld") => {
                let id = proj.add(
                    &path_string(&absolute),
                    PbxObject::VersionGroup(VersionGroup {
                        name,
                        path: relative_string,
                        source_tree: SourceTree::Group,
                        children: Vec::new(),
                        current_version: None,
                        version_group_type: "wrapper.xcdatamodel".to_string(),
                    }),
                );
                self.register_group(proj, into, &absolute, &id);
                Some(AddedElement {
                    id,
                    path: absolute,
                    is_group: true,
                })
            }
            ext if self.is_group(&absolute, ext, is_leaf) => {
                let id = proj.add(
                    &path_string(&absolute),
                    PbxObject::Group(Group::new(name, Some(relative_string))),
                );
                self.register_group(proj, into, &absolute, &id);
                Some(AddedElement {
                    id,
                    path: absolute,
                    is_group: true,
                })
            }
            _ => {
                let file = FileReference::new(relative_string, SourceTree::Group)
                    .with_name(name)
                    .with_file_type(last_known_file_type(&absolute));
                Some(self.add_file(proj, into, absolute, file))
            }
        }
    }

    fn add_file(
        &mut self,
        proj: &mut PbxProj,
        into: &ObjectId,
        path: PathBuf,
        reference: FileReference,
    ) -> AddedElement {
        let id = proj.add(&path_string(&path), PbxObject::FileReference(reference));
        proj.add_child(into, id.clone());
        tracing::debug!("file element {}", path.display());
        self.elements.insert(path.clone(), id.clone());
        AddedElement {
            id,
            path,
            is_group: false,
        }
    }

    fn is_group(&self, path: &Path, ext: Option<&str>, is_leaf: bool) -> bool {
        if is_leaf {
            ext.is_none() && self.fs.is_dir(path)
        } else {
            !is_file_package(path)
        }
    }

    fn register_group(&mut self, proj: &mut PbxProj, into: &ObjectId, path: &Path, id: &ObjectId) {
        proj.add_child(into, id.clone());
        self.groups.insert(path.to_path_buf(), id.clone());
        self.elements.insert(path.to_path_buf(), id.clone());
    }

    /// Group the localized files of an `.lproj` directory by file name.
    fn add_variant_group(&mut self, proj: &mut PbxProj, lproj: &Path, into: &ObjectId) {
        if !self.lprojs.insert(lproj.to_path_buf()) {
            return;
        }
        let mut children = match self.fs.read_dir(lproj) {
            Ok(children) => children,
            Err(e) => {
                tracing::warn!("cannot list {}: {:#}", lproj.display(), e);
                return;
            }
        };

        children.sort();

        let lproj_name = file_name(lproj);
        let locale = lproj_name
            .split('.')
            .next()
            .unwrap_or(lproj_name.as_str())
            .to_string();
        self.known_regions.insert(locale.clone());
        let parent = lproj.parent().unwrap_or(lproj);

        for localized in children {
            if self.elements.contains_key(&localized) {
                continue;
            }
            let localized_name = file_name(&localized);
            let variant_path = parent.join(&localized_name);

            let variant_group = match self.elements.get(&variant_path) {
                Some(id) => id.clone(),
                None => {
                    let id = proj.add(
                        &path_string(&variant_path),
                        PbxObject::VariantGroup(Group::new(Some(localized_name.clone()), None)),
                    );
                    proj.add_child(into, id.clone());
                    self.elements.insert(variant_path, id.clone());
                    id
                }
            };

            let reference = FileReference::new(
                format!("{}/{}", lproj_name, localized_name),
                SourceTree::Group,
            )
            .with_name(Some(locale.clone()))
            .with_file_type(last_known_file_type(&localized));
            let id = proj.add(&path_string(&localized), PbxObject::FileReference(reference));
            proj.add_child(&variant_group, id.clone());
            self.elements.insert(localized, id);
        }
    }

    /// Add the product reference of a target unless one with the same
    /// product file name exists.
    pub fn add_product(&mut self, proj: &mut PbxProj, groups: &ProjectGroups, target: &Target) -> ObjectId {
        let name = target.product_name_with_extension();
        if let Some(id) = self.products.get(&name) {
            return id.clone();
        }

        let reference = FileReference {
            name: None,
            path: Some(name.clone()),
            source_tree: SourceTree::BuiltProductsDir,
            last_known_file_type: None,
            explicit_file_type: Some(target.product.explicit_file_type().to_string()),
            include_in_index: Some(false),
        };
        let id = proj.add(&format!("product:{}", name), PbxObject::FileReference(reference));
        proj.add_child(&groups.products, id.clone());
        self.products.insert(name, id.clone());
        id
    }

    fn add_sdk(&mut self, proj: &mut PbxProj, groups: &ProjectGroups, sdk: &SdkNode) {
        if self.sdks.contains_key(&sdk.path) {
            return;
        }
        let relative = path_string(&sdk.path).trim_start_matches('/').to_string();
        let reference = FileReference::new(relative, SourceTree::SdkRoot)
            .with_name(Some(sdk.name.clone()))
            .with_file_type(last_known_file_type(&sdk.path));
        let id = proj.add(&format!("sdk:{}", sdk.name), PbxObject::FileReference(reference));
        proj.add_child(&groups.frameworks, id.clone());
        self.sdks.insert(sdk.path.clone(), id);
    }

    fn generate_playgrounds(&mut self, proj: &mut PbxProj, groups: &mut ProjectGroups, project: &Project) {
        let playgrounds = match self.fs.glob(&project.playgrounds_pattern()) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("cannot look for playgrounds: {:#}", e);
                return;
            }
        };
        if playgrounds.is_empty() {
            return;
        }

        let group = groups.playgrounds(proj);
        for path in playgrounds {
            let reference = FileReference::new(file_name(&path), SourceTree::Group)
                .with_file_type(Some("file.playground"));
            let id = proj.add(&path_string(&path), PbxObject::FileReference(reference));
            proj.add_child(&group, id.clone());
            self.elements.insert(path, id);
        }
    }

    /// The element created for an absolute path.
    pub fn element(&self, path: &Path) -> Option<&ObjectId> {
        self.elements.get(path)
    }

    /// The product reference of a product file name, e.g. `libCore.a`.
    pub fn product(&self, name: &str) -> Option<&ObjectId> {
        self.products.get(name)
    }

    /// The reference of an SDK binary.
    pub fn sdk(&self, path: &Path) -> Option<&ObjectId> {
        self.sdks.get(path)
    }

    pub fn products_len(&self) -> usize {
        self.products.len()
    }

    /// Locales of every `.lproj` directory seen.
    pub fn known_regions(&self) -> impl Iterator<Item = &str> {
        self.known_regions.iter().map(String::as_str)
    }
}

/// Every file of a project that needs an element, sorted.
fn project_files(project: &Project) -> BTreeSet<PathBuf> {
    let mut files: BTreeSet<PathBuf> = project
        .targets
        .iter()
        .flat_map(|t| t.referenced_files())
        .map(Path::to_path_buf)
        .collect();
    files.extend(project.settings.xcconfigs().map(Path::to_path_buf));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency::{Dependency, SdkStatus};
    use crate::core::loader::Projects;
    use crate::core::target::{CoreDataModel, Product};
    use crate::graph::GraphLoader;
    use crate::test_support::{project, target, MockFileSystem, StaticInspector};

    fn graph_for(projects: Vec<Project>, fs: &MockFileSystem) -> Graph {
        let projects: Projects = projects.into_iter().map(|p| (p.path.clone(), p)).collect();
        GraphLoader::new(fs, &StaticInspector::default())
            .load(projects)
            .unwrap()
    }

    fn name_of(proj: &PbxProj, id: &ObjectId) -> String {
        proj.get(id)
            .and_then(PbxObject::display_name)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_add_element_is_idempotent() {
        let fs = MockFileSystem::new().with_file("/p/Sources/a.swift");
        let mut proj = PbxProj::new();
        let groups = ProjectGroups::generate(&mut proj, &project("/p", "P"));
        let mut files = ProjectFileElements::new(&fs);

        let first = files
            .add_element(&mut proj, Path::new("Sources"), false, Path::new("/p"), &groups.main)
            .unwrap();
        let count = proj.len();
        let second = files
            .add_element(&mut proj, Path::new("Sources"), false, Path::new("/p"), &groups.main)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(proj.len(), count);
        assert_eq!(proj.child_names(&groups.main), vec!["Sources"]);

        let file = files
            .add_element(&mut proj, Path::new("a.swift"), true, &first.path, &first.id)
            .unwrap();
        let count = proj.len();
        let again = files
            .add_element(&mut proj, Path::new("a.swift"), true, &first.path, &first.id)
            .unwrap();

        assert_eq!(file, again);
        assert!(!file.is_group);
        assert_eq!(file.path, PathBuf::from("/p/Sources/a.swift"));
        assert_eq!(files.element(&file.path), Some(&file.id));
        assert_eq!(proj.len(), count);
        assert_eq!(proj.child_names(&first.id), vec!["a.swift"]);
    }

    #[test]
    fn test_generate_path_builds_nested_groups_once() {
        let fs = MockFileSystem::new()
            .with_file("/p/Sources/Feature/a.swift")
            .with_file("/p/Sources/Feature/b.swift");
        let mut proj = PbxProj::new();
        let groups = ProjectGroups::generate(&mut proj, &project("/p", "P"));
        let mut files = ProjectFileElements::new(&fs);

        files.generate_path(&mut proj, &groups, Path::new("/p/Sources/Feature/a.swift"), Path::new("/p"));
        files.generate_path(&mut proj, &groups, Path::new("/p/Sources/Feature/b.swift"), Path::new("/p"));
        files.generate_path(&mut proj, &groups, Path::new("/p/Sources/Feature/a.swift"), Path::new("/p"));

        let sources = files.element(Path::new("/p/Sources")).unwrap().clone();
        let feature = files.element(Path::new("/p/Sources/Feature")).unwrap().clone();
        assert_eq!(proj.child_names(&groups.main), vec!["Sources"]);
        assert_eq!(proj.child_names(&sources), vec!["Feature"]);
        assert_eq!(proj.child_names(&feature), vec!["a.swift", "b.swift"]);
        assert_eq!(proj.count("PBXFileReference"), 2);
    }

    #[test]
    fn test_files_outside_source_root() {
        let fs = MockFileSystem::new().with_dir("/a/framework/framework.framework");
        let mut proj = PbxProj::new();
        let groups = ProjectGroups::generate(&mut proj, &project("/a/b/c/project", "P"));
        let mut files = ProjectFileElements::new(&fs);

        files.generate_path(
            &mut proj,
            &groups,
            Path::new("/a/framework/framework.framework"),
            Path::new("/a/b/c/project"),
        );

        let group_id = files.element(Path::new("/a/framework")).unwrap().clone();
        match proj.get(&group_id) {
            Some(PbxObject::Group(group)) => {
                assert_eq!(group.path.as_deref(), Some("../../../framework"));
                assert_eq!(group.name.as_deref(), Some("framework"));
            }
            other => panic!("unexpected element: {other:?}"),
        }
        assert_eq!(proj.child_names(&group_id), vec!["framework.framework"]);
    }

    #[test]
    fn test_localized_files_share_variant_group() {
        let fs = MockFileSystem::new()
            .with_file("/p/Resources/en.lproj/Main.storyboard")
            .with_file("/p/Resources/fr.lproj/Main.storyboard")
            .with_file("/p/Resources/en.lproj/Localizable.strings");
        let mut proj = PbxProj::new();
        let groups = ProjectGroups::generate(&mut proj, &project("/p", "P"));
        let mut files = ProjectFileElements::new(&fs);

        for path in [
            "/p/Resources/en.lproj/Localizable.strings",
            "/p/Resources/en.lproj/Main.storyboard",
            "/p/Resources/fr.lproj/Main.storyboard",
        ] {
            files.generate_path(&mut proj, &groups, Path::new(path), Path::new("/p"));
        }

        let variant = files.element(Path::new("/p/Resources/Main.storyboard")).unwrap().clone();
        match proj.get(&variant) {
            Some(PbxObject::VariantGroup(group)) => {
                assert_eq!(group.name.as_deref(), Some("Main.storyboard"));
                let children: Vec<_> = group
                    .children
                    .iter()
                    .filter_map(|c| proj.file_reference(c))
                    .map(|f| (f.name.clone().unwrap(), f.path.clone().unwrap()))
                    .collect();
                assert_eq!(
                    children,
                    vec![
                        ("en".to_string(), "en.lproj/Main.storyboard".to_string()),
                        ("fr".to_string(), "fr.lproj/Main.storyboard".to_string()),
                    ]
                );
            }
            other => panic!("unexpected element: {other:?}"),
        }

        let resources = files.element(Path::new("/p/Resources")).unwrap().clone();
        assert_eq!(
            proj.child_names(&resources),
            vec!["Localizable.strings", "Main.storyboard"]
        );
        assert_eq!(files.known_regions().collect::<Vec<_>>(), vec!["en", "fr"]);
    }

    #[test]
    fn test_lproj_directory_is_listed_once() {
        let fs = MockFileSystem::new()
            .with_file("/p/Resources/en.lproj/Main.storyboard")
            .with_file("/p/Resources/en.lproj/Localizable.strings");
        let mut proj = PbxProj::new();
        let groups = ProjectGroups::generate(&mut proj, &project("/p", "P"));
        let mut files = ProjectFileElements::new(&fs);

        for path in [
            "/p/Resources/en.lproj/Localizable.strings",
            "/p/Resources/en.lproj",
            "/p/Resources/en.lproj/Main.storyboard",
            "/p/Resources/en.lproj",
        ] {
            files.generate_path(&mut proj, &groups, Path::new(path), Path::new("/p"));
        }

        assert_eq!(
            fs.listed_dirs(),
            vec![PathBuf::from("/p/Resources/en.lproj")]
        );
        assert_eq!(proj.count("PBXVariantGroup"), 2);
        assert_eq!(proj.count("PBXFileReference"), 2);
    }

    #[test]
    fn test_folder_reference_is_not_descended() {
        let fs = MockFileSystem::new()
            .with_file("/p/Fixtures/users.json")
            .with_file("/p/Fixtures/Nested/orders.json");
        let p = project("/p", "P")
            .with_target(target("App", Product::App).with_folder_reference("/p/Fixtures"));
        let graph = graph_for(vec![p.clone()], &fs);

        let mut proj = PbxProj::new();
        let mut groups = ProjectGroups::generate(&mut proj, &p);
        let mut files = ProjectFileElements::new(&fs);
        files.generate_project_files(&mut proj, &mut groups, &p, &graph, Path::new("/p"));
        files.generate_path(&mut proj, &groups, Path::new("/p/Fixtures/users.json"), Path::new("/p"));

        let folder = files.element(Path::new("/p/Fixtures")).unwrap();
        let reference = proj.file_reference(folder).unwrap();
        assert_eq!(reference.path.as_deref(), Some("Fixtures"));
        assert_eq!(reference.last_known_file_type.as_deref(), Some("folder"));
        assert_eq!(reference.source_tree, SourceTree::Group);
        assert_eq!(proj.child_names(&groups.main), vec!["Fixtures"]);
        assert!(files.element(Path::new("/p/Fixtures/users.json")).is_none());
        assert_eq!(proj.count("PBXGroup"), 3);
    }

    #[test]
    fn test_product_table_is_keyed_by_file_name() {
        let fs = MockFileSystem::new();
        let mut proj = PbxProj::new();
        let groups = ProjectGroups::generate(&mut proj, &project("/p", "P"));
        let mut files = ProjectFileElements::new(&fs);

        let library = files.add_product(&mut proj, &groups, &target("Core", Product::StaticLibrary));
        let again = files.add_product(&mut proj, &groups, &target("Core", Product::StaticLibrary));
        let framework = files.add_product(&mut proj, &groups, &target("Core", Product::Framework));

        assert_eq!(library, again);
        assert_ne!(library, framework);
        assert_eq!(files.products_len(), 2);
        assert_eq!(files.product("libCore.a"), Some(&library));
        assert_eq!(files.product("Core.framework"), Some(&framework));
        assert_eq!(files.product("Core"), None);
        let reference = proj.file_reference(&library).unwrap();
        assert_eq!(reference.path.as_deref(), Some("libCore.a"));
        assert_eq!(reference.source_tree, SourceTree::BuiltProductsDir);
    }

    #[test]
    fn test_products_with_shared_target_name() {
        let fs = MockFileSystem::new().with_file("/w/Other/Project.toml");
        let p = project("/w/App", "App")
            .with_target(
                target("App", Product::App)
                    .with_dependency(Dependency::target("Core"))
                    .with_dependency(Dependency::project("Core", "/w/Other")),
            )
            .with_target(target("Core", Product::StaticLibrary));
        let other = project("/w/Other", "Other").with_target(target("Core", Product::Framework));
        let graph = graph_for(vec![p.clone(), other], &fs);

        let mut proj = PbxProj::new();
        let mut groups = ProjectGroups::generate(&mut proj, &p);
        let mut files = ProjectFileElements::new(&fs);
        files.generate_project_files(&mut proj, &mut groups, &p, &graph, Path::new("/w/App"));

        assert_eq!(
            proj.child_names(&groups.products),
            vec!["App.app", "libCore.a", "Core.framework"]
        );
        assert_eq!(files.products_len(), 3);
    }

    #[test]
    fn test_generate_project_files() {
        let fs = MockFileSystem::new()
            .with_file("/p/Info.plist")
            .with_file("/p/Sources/AppDelegate.swift")
            .with_file("/p/Resources/Assets.xcassets/Contents.json")
            .with_dir("/p/Model.xcdatamodeld/Model.xcdatamodel")
            .with_dir("/p/Playgrounds/Try.playground")
            .with_dir("/p/Vendor/Foo.framework")
            .with_file("/s/Project.toml");

        let mut app = target("App", Product::App)
            .with_info_plist("/p/Info.plist")
            .with_sources(["/p/Sources/AppDelegate.swift"])
            .with_resources(["/p/Resources/Assets.xcassets"])
            .with_dependency(Dependency::framework("/p/Vendor/Foo.framework"))
            .with_dependency(Dependency::project("Shared", "/s"))
            .with_dependency(Dependency::sdk("ARKit.framework", SdkStatus::Required));
        app.core_data_models.push(CoreDataModel {
            path: PathBuf::from("/p/Model.xcdatamodeld"),
            versions: vec![PathBuf::from("/p/Model.xcdatamodeld/Model.xcdatamodel")],
            current_version: "Model".to_string(),
        });
        let p = project("/p", "P").with_target(app);
        let s = project("/s", "S").with_target(target("Shared", Product::Framework));
        let graph = graph_for(vec![p.clone(), s], &fs);

        let mut proj = PbxProj::new();
        let mut groups = ProjectGroups::generate(&mut proj, &p);
        let mut files = ProjectFileElements::new(&fs);
        files.generate_project_files(&mut proj, &mut groups, &p, &graph, Path::new("/p"));
        groups.attach_first_level(&mut proj);

        assert_eq!(
            proj.child_names(&groups.main),
            vec![
                "Info.plist",
                "Model.xcdatamodeld",
                "Resources",
                "Sources",
                "Vendor",
                "Playgrounds",
                "Frameworks",
                "Products",
            ]
        );
        assert_eq!(proj.child_names(&groups.products), vec!["App.app", "Shared.framework"]);
        assert_eq!(proj.child_names(&groups.frameworks), vec!["ARKit.framework"]);

        let sdk = files
            .sdk(Path::new("/System/Library/Frameworks/ARKit.framework"))
            .unwrap();
        let sdk = proj.file_reference(sdk).unwrap();
        assert_eq!(sdk.path.as_deref(), Some("System/Library/Frameworks/ARKit.framework"));
        assert_eq!(sdk.source_tree, SourceTree::SdkRoot);

        let resources = files.element(Path::new("/p/Resources")).unwrap();
        assert_eq!(proj.child_names(resources), vec!["Assets.xcassets"]);

        let model = files.element(Path::new("/p/Model.xcdatamodeld")).unwrap();
        assert_eq!(proj.child_names(model), vec!["Model.xcdatamodel"]);
        assert!(files
            .element(Path::new("/p/Model.xcdatamodeld/Model.xcdatamodel"))
            .is_some());

        let playgrounds = proj.get(&groups.main).and_then(PbxObject::children).unwrap()[5].clone();
        assert_eq!(name_of(&proj, &playgrounds), "Playgrounds");
        assert_eq!(proj.child_names(&playgrounds), vec!["Try.playground"]);
    }
}

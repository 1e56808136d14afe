//! Scheme documents for projects and workspaces.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::core::project::Project;
use crate::core::scheme::{
    Arguments, BuildAction, ExecutionAction, RunAction, Scheme, TargetReference, TestAction,
};
use crate::core::settings::BuildConfiguration;
use crate::util::fs::relative_string;
use crate::xcode::{
    BuildActionDocument, BuildActionEntry, BuildableReference, ExecutionActionDocument,
    LaunchActionDocument, ObjectId, SchemeDocument, TestActionDocument, Testable,
};

use super::errors::GeneratorError;

/// Version written into scheme documents.
const SCHEME_VERSION: &str = "1.3";

/// A generated native target as schemes see it.
#[derive(Debug, Clone)]
struct SchemeTarget {
    id: ObjectId,
    buildable_name: String,
    xcodeproj: PathBuf,
}

/// Every generated target a scheme may reference.
#[derive(Debug, Clone, Default)]
pub struct SchemeTargets {
    targets: HashMap<TargetReference, SchemeTarget>,
}

impl SchemeTargets {
    pub fn new() -> Self {
        SchemeTargets::default()
    }

    /// Register the native targets generated for `project` into `xcodeproj`.
    pub fn add_project(&mut self, project: &Project, xcodeproj: &Path, native_targets: &BTreeMap<String, ObjectId>) {
        for target in &project.targets {
            let Some(id) = native_targets.get(&target.name) else {
                continue;
            };
            self.targets.insert(
                TargetReference::new(&project.path, &target.name),
                SchemeTarget {
                    id: id.clone(),
                    buildable_name: target.product_name_with_extension(),
                    xcodeproj: xcodeproj.to_path_buf(),
                },
            );
        }
    }
}

/// Turns schemes into documents, resolving targets relative to the
/// container the scheme is written into.
pub struct SchemeGenerator<'a> {
    targets: &'a SchemeTargets,
    /// Directory holding the `.xcodeproj` or `.xcworkspace`
    container_root: &'a Path,
}

impl<'a> SchemeGenerator<'a> {
    pub fn new(targets: &'a SchemeTargets, container_root: &'a Path) -> Self {
        SchemeGenerator {
            targets,
            container_root,
        }
    }

    pub fn generate_schemes(&self, schemes: &[Scheme]) -> Result<Vec<SchemeDocument>, GeneratorError> {
        schemes.iter().map(|s| self.generate_scheme(s)).collect()
    }

    pub fn generate_scheme(&self, scheme: &Scheme) -> Result<SchemeDocument, GeneratorError> {
        tracing::debug!("generating scheme `{}`", scheme.name);
        Ok(SchemeDocument {
            name: scheme.name.clone(),
            shared: scheme.shared,
            version: SCHEME_VERSION.to_string(),
            build_action: scheme
                .build_action
                .as_ref()
                .map(|action| self.build_action(scheme, action))
                .transpose()?,
            test_action: scheme
                .test_action
                .as_ref()
                .map(|action| self.test_action(scheme, action))
                .transpose()?,
            launch_action: scheme
                .run_action
                .as_ref()
                .map(|action| self.launch_action(scheme, action))
                .transpose()?,
        })
    }

    fn buildable(&self, scheme: &Scheme, reference: &TargetReference) -> Result<BuildableReference, GeneratorError> {
        let target = self
            .targets
            .targets
            .get(reference)
            .ok_or_else(|| GeneratorError::UnknownSchemeTarget {
                scheme: scheme.name.clone(),
                target: reference.name.clone(),
                project: reference.project_path.clone(),
            })?;

        Ok(BuildableReference {
            blueprint_identifier: target.id.clone(),
            buildable_name: target.buildable_name.clone(),
            blueprint_name: reference.name.clone(),
            referenced_container: format!(
                "container:{}",
                relative_string(self.container_root, &target.xcodeproj)
            ),
        })
    }

    fn build_action(&self, scheme: &Scheme, action: &BuildAction) -> Result<BuildActionDocument, GeneratorError> {
        let entries = action
            .targets
            .iter()
            .map(|t| self.buildable(scheme, t).map(BuildActionEntry::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BuildActionDocument {
            parallelize_buildables: true,
            build_implicit_dependencies: true,
            entries,
            pre_actions: self.execution_actions(scheme, &action.pre_actions)?,
            post_actions: self.execution_actions(scheme, &action.post_actions)?,
        })
    }

    fn execution_actions(
        &self,
        scheme: &Scheme,
        actions: &[ExecutionAction],
    ) -> Result<Vec<ExecutionActionDocument>, GeneratorError> {
        actions
            .iter()
            .map(|action| {
                Ok(ExecutionActionDocument {
                    title: action.title.clone(),
                    script_text: action.script.clone(),
                    environment_buildable: action
                        .target
                        .as_ref()
                        .map(|t| self.buildable(scheme, t))
                        .transpose()?,
                })
            })
            .collect()
    }

    fn test_action(&self, scheme: &Scheme, action: &TestAction) -> Result<TestActionDocument, GeneratorError> {
        let testables = action
            .targets
            .iter()
            .map(|t| {
                self.buildable(scheme, t).map(|buildable_reference| Testable {
                    skipped: false,
                    buildable_reference,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let arguments = action.arguments.clone().unwrap_or_default();

        Ok(TestActionDocument {
            build_configuration: action.configuration.name().to_string(),
            code_coverage_enabled: action.coverage,
            should_use_launch_scheme_args_env: action.arguments.is_none(),
            testables,
            command_line_arguments: arguments.launch,
            environment_variables: arguments.environment,
        })
    }

    fn launch_action(&self, scheme: &Scheme, action: &RunAction) -> Result<LaunchActionDocument, GeneratorError> {
        let arguments = action.arguments.clone().unwrap_or_default();
        Ok(LaunchActionDocument {
            build_configuration: action.configuration.name().to_string(),
            buildable_product_runnable: action
                .executable
                .as_ref()
                .map(|t| self.buildable(scheme, t))
                .transpose()?,
            command_line_arguments: arguments.launch,
            environment_variables: arguments.environment,
        })
    }
}

/// The declared schemes of a project followed by one shared scheme per
/// target that has no scheme of its own name.
pub fn project_schemes(project: &Project) -> Vec<Scheme> {
    let mut schemes = project.schemes.clone();
    for target in &project.targets {
        if project.schemes.iter().any(|s| s.name == target.name) {
            continue;
        }

        let reference = TargetReference::new(&project.path, &target.name);
        let arguments = Arguments {
            environment: target.environment.clone(),
            launch: Vec::new(),
        };
        let mut scheme = Scheme::new(&target.name);
        scheme.build_action = Some(BuildAction {
            targets: vec![reference.clone()],
            ..BuildAction::default()
        });
        if target.product.is_tests_bundle() {
            scheme.test_action = Some(TestAction {
                targets: vec![reference.clone()],
                configuration: BuildConfiguration::Debug,
                coverage: false,
                arguments: Some(arguments.clone()),
            });
        }
        scheme.run_action = Some(RunAction {
            configuration: BuildConfiguration::Debug,
            executable: Some(reference),
            arguments: Some(arguments),
        });
        schemes.push(scheme);
    }
    schemes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::Product;
    use crate::test_support::{project, target};

    fn targets_for(p: &Project) -> SchemeTargets {
        let ids: BTreeMap<String, ObjectId> = p
            .targets
            .iter()
            .map(|t| (t.name.clone(), ObjectId::new(format!("ID{}", t.name))))
            .collect();
        let mut targets = SchemeTargets::new();
        targets.add_project(p, &p.path.join("App.xcodeproj"), &ids);
        targets
    }

    #[test]
    fn test_automatic_schemes() {
        let mut app = target("App", Product::App);
        app.environment.insert("LOG".to_string(), "1".to_string());
        let mut declared = Scheme::new("AppTests");
        declared.shared = false;
        let p = project("/w/App", "App")
            .with_target(app)
            .with_target(target("AppTests", Product::UnitTests))
            .with_target(target("Core", Product::Framework))
            .with_scheme(declared);

        let schemes = project_schemes(&p);
        let names: Vec<_> = schemes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["AppTests", "App", "Core"]);
        assert!(!schemes[0].shared);
        assert!(schemes[1].shared);
        assert!(schemes[1].test_action.is_none());

        let run = schemes[1].run_action.as_ref().unwrap();
        assert_eq!(run.configuration, BuildConfiguration::Debug);
        assert_eq!(run.arguments.as_ref().unwrap().environment["LOG"], "1");
    }

    #[test]
    fn test_scheme_document_references_targets() {
        let p = project("/w/App", "App")
            .with_target(target("App", Product::App))
            .with_target(target("AppTests", Product::UnitTests));
        let targets = targets_for(&p);
        let schemes = project_schemes(&p);

        let generator = SchemeGenerator::new(&targets, Path::new("/w/App"));
        let docs = generator.generate_schemes(&schemes).unwrap();
        let tests = &docs[1];
        let entry = &tests.build_action.as_ref().unwrap().entries[0];
        assert_eq!(entry.buildable_reference.buildable_name, "AppTests.xctest");
        assert_eq!(entry.buildable_reference.referenced_container, "container:App.xcodeproj");
        assert_eq!(entry.buildable_reference.blueprint_identifier, ObjectId::new("IDAppTests"));
        let test_action = tests.test_action.as_ref().unwrap();
        assert_eq!(test_action.testables.len(), 1);
        assert!(!test_action.should_use_launch_scheme_args_env);

        let workspace = SchemeGenerator::new(&targets, Path::new("/w"));
        let doc = workspace.generate_scheme(&schemes[0]).unwrap();
        let launch = doc.launch_action.unwrap();
        assert_eq!(
            launch.buildable_product_runnable.unwrap().referenced_container,
            "container:App/App.xcodeproj"
        );
    }

    #[test]
    fn test_unknown_scheme_target() {
        let p = project("/w/App", "App").with_target(target("App", Product::App));
        let targets = targets_for(&p);
        let mut scheme = Scheme::new("Broken");
        scheme.build_action = Some(BuildAction {
            targets: vec![TargetReference::new("/w/App", "Missing")],
            ..BuildAction::default()
        });

        let err = SchemeGenerator::new(&targets, Path::new("/w/App"))
            .generate_scheme(&scheme)
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::UnknownSchemeTarget { ref target, .. } if target == "Missing"
        ));
    }
}

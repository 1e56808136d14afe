//! Build configurations of projects and targets.

use std::path::Path;

use crate::core::project::Project;
use crate::core::settings::{merge_settings, BuildConfiguration, BuildSettings, Settings, SettingValue};
use crate::core::target::{Platform, Product};
use crate::util::fs::{path_string, relative_string};
use crate::xcode::{BuildConfigurationObject, ConfigurationList, ObjectId, PbxObject, PbxProj};

use super::build_phase::TargetContext;
use super::errors::GeneratorError;
use super::file_elements::ProjectFileElements;
use super::settings_provider::DefaultSettingsProvider;

/// Configuration selected when none is specified.
const DEFAULT_CONFIGURATION: BuildConfiguration = BuildConfiguration::Release;

/// Generates configuration lists.
pub struct ConfigGenerator<'a> {
    provider: DefaultSettingsProvider,
    /// `SWIFT_VERSION` of targets that do not set one
    swift_version: &'a str,
}

impl<'a> ConfigGenerator<'a> {
    pub fn new(swift_version: &'a str) -> Self {
        ConfigGenerator {
            provider: DefaultSettingsProvider,
            swift_version,
        }
    }

    /// Add the configuration list of a project.
    pub fn generate_project_config(
        &self,
        proj: &mut PbxProj,
        project: &Project,
        files: &ProjectFileElements<'_>,
    ) -> Result<ObjectId, GeneratorError> {
        let key = path_string(&project.path);
        let mut configurations = Vec::with_capacity(BuildConfiguration::ALL.len());

        for config in BuildConfiguration::ALL {
            let mut settings = self.provider.project_settings(config);
            let base_configuration = apply_user_settings(&mut settings, &project.settings, config, files)?;
            configurations.push(proj.add(
                &format!("{}:config:{}", key, config.name()),
                PbxObject::BuildConfiguration(BuildConfigurationObject {
                    name: config.name().to_string(),
                    build_settings: settings,
                    base_configuration_reference: base_configuration,
                }),
            ));
        }

        Ok(add_list(proj, &format!("{}:configs", key), configurations))
    }

    /// Add the configuration list of a target and attach it to the target.
    pub fn generate_target_config(&self, proj: &mut PbxProj, ctx: &TargetContext<'_>) -> Result<ObjectId, GeneratorError> {
        let target = ctx.target;
        let user = target.settings.clone().unwrap_or_default();
        let mut configurations = Vec::with_capacity(BuildConfiguration::ALL.len());

        for config in BuildConfiguration::ALL {
            let mut settings = self.provider.target_settings(target, config);
            let base_configuration = apply_user_settings(&mut settings, &user, config, ctx.files)?;
            self.force_target_settings(&mut settings, ctx);

            configurations.push(proj.add(
                &ctx.key(&format!("config:{}", config.name())),
                PbxObject::BuildConfiguration(BuildConfigurationObject {
                    name: config.name().to_string(),
                    build_settings: settings,
                    base_configuration_reference: base_configuration,
                }),
            ));
        }

        let list = add_list(proj, &ctx.key("configs"), configurations);
        if let Some(native) = proj.native_target_mut(ctx.native_target) {
            native.build_configuration_list = Some(list.clone());
        }
        Ok(list)
    }

    /// Settings derived from the target itself; they win over anything the
    /// manifest declares.
    fn force_target_settings(&self, settings: &mut BuildSettings, ctx: &TargetContext<'_>) {
        let target = ctx.target;
        let mut set = |key: &str, value: String| {
            settings.insert(key.to_string(), SettingValue::String(value));
        };

        set("PRODUCT_BUNDLE_IDENTIFIER", target.bundle_id.clone());
        if let Some(info_plist) = &target.info_plist {
            set("INFOPLIST_FILE", srcroot(ctx.source_root, info_plist));
        }
        if let Some(entitlements) = &target.entitlements {
            set("CODE_SIGN_ENTITLEMENTS", srcroot(ctx.source_root, entitlements));
        }
        set("SDKROOT", target.platform.sdk_root().to_string());
        set("SUPPORTED_PLATFORMS", target.platform.supported_platforms().to_string());
        if target.product == Product::StaticFramework {
            set("MACH_O_TYPE", "staticlib".to_string());
        }
        if let Some(deployment) = &target.deployment_target {
            set(target.platform.deployment_target_key(), deployment.version.clone());
            if target.platform == Platform::Ios && !deployment.devices.is_empty() {
                set("TARGETED_DEVICE_FAMILY", deployment.device_family());
            }
        }
        if target.product.is_tests_bundle() {
            if let Some(app) = ctx.graph.app_dependency(&ctx.project.path, &target.name) {
                set("TEST_TARGET_NAME", app.target.product_name().to_string());
                if target.product == Product::UnitTests {
                    set(
                        "TEST_HOST",
                        format!(
                            "$(BUILT_PRODUCTS_DIR)/{}/{}",
                            app.target.product_name_with_extension(),
                            app.target.product_name()
                        ),
                    );
                    set("BUNDLE_LOADER", "$(TEST_HOST)".to_string());
                }
            }
        }

        if !settings.contains_key("SWIFT_VERSION") {
            settings.insert(
                "SWIFT_VERSION".to_string(),
                SettingValue::from(self.swift_version),
            );
        }
    }
}

/// Merge the declared base and per-configuration settings onto `settings`,
/// returning the element of the configuration's xcconfig file.
fn apply_user_settings(
    settings: &mut BuildSettings,
    user: &Settings,
    config: BuildConfiguration,
    files: &ProjectFileElements<'_>,
) -> Result<Option<ObjectId>, GeneratorError> {
    merge_settings(settings, &user.base);
    let Some(configuration) = user.configuration(config) else {
        return Ok(None);
    };
    merge_settings(settings, &configuration.settings);

    configuration
        .xcconfig
        .as_ref()
        .map(|xcconfig| {
            files
                .element(xcconfig)
                .cloned()
                .ok_or_else(|| GeneratorError::MissingFileReference {
                    path: xcconfig.clone(),
                })
        })
        .transpose()
}

fn add_list(proj: &mut PbxProj, key: &str, configurations: Vec<ObjectId>) -> ObjectId {
    proj.add(
        key,
        PbxObject::ConfigurationList(ConfigurationList {
            build_configurations: configurations,
            default_configuration_is_visible: false,
            default_configuration_name: DEFAULT_CONFIGURATION.name().to_string(),
        }),
    )
}

fn srcroot(source_root: &Path, path: &Path) -> String {
    format!("$(SRCROOT)/{}", relative_string(source_root, path))
}

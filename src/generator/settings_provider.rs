//! Default build settings of generated projects and targets.
//!
//! Defaults are applied first; everything a manifest declares is merged on
//! top of them.

use crate::core::settings::{BuildConfiguration, BuildSettings, SettingValue};
use crate::core::target::{Platform, Product, Target};

const PROJECT_ALL: &[(&str, &str)] = &[
    ("ALWAYS_SEARCH_USER_PATHS", "NO"),
    ("CLANG_ANALYZER_NONNULL", "YES"),
    ("CLANG_ANALYZER_NUMBER_OBJECT_CONVERSION", "YES_AGGRESSIVE"),
    ("CLANG_CXX_LANGUAGE_STANDARD", "gnu++14"),
    ("CLANG_CXX_LIBRARY", "libc++"),
    ("CLANG_ENABLE_MODULES", "YES"),
    ("CLANG_ENABLE_OBJC_ARC", "YES"),
    ("CLANG_ENABLE_OBJC_WEAK", "YES"),
    ("CLANG_WARN__DUPLICATE_METHOD_MATCH", "YES"),
    ("CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING", "YES"),
    ("CLANG_WARN_BOOL_CONVERSION", "YES"),
    ("CLANG_WARN_COMMA", "YES"),
    ("CLANG_WARN_CONSTANT_CONVERSION", "YES"),
    ("CLANG_WARN_DEPRECATED_OBJC_IMPLEMENTATIONS", "YES"),
    ("CLANG_WARN_DIRECT_OBJC_ISA_USAGE", "YES_ERROR"),
    ("CLANG_WARN_DOCUMENTATION_COMMENTS", "YES"),
    ("CLANG_WARN_EMPTY_BODY", "YES"),
    ("CLANG_WARN_ENUM_CONVERSION", "YES"),
    ("CLANG_WARN_INFINITE_RECURSION", "YES"),
    ("CLANG_WARN_INT_CONVERSION", "YES"),
    ("CLANG_WARN_NON_LITERAL_NULL_CONVERSION", "YES"),
    ("CLANG_WARN_OBJC_IMPLICIT_RETAIN_SELF", "YES"),
    ("CLANG_WARN_OBJC_LITERAL_CONVERSION", "YES"),
    ("CLANG_WARN_OBJC_ROOT_CLASS", "YES_ERROR"),
    ("CLANG_WARN_RANGE_LOOP_ANALYSIS", "YES"),
    ("CLANG_WARN_STRICT_PROTOTYPES", "YES"),
    ("CLANG_WARN_SUSPICIOUS_MOVE", "YES"),
    ("CLANG_WARN_UNGUARDED_AVAILABILITY", "YES_AGGRESSIVE"),
    ("CLANG_WARN_UNREACHABLE_CODE", "YES"),
    ("COPY_PHASE_STRIP", "NO"),
    ("ENABLE_STRICT_OBJC_MSGSEND", "YES"),
    ("GCC_C_LANGUAGE_STANDARD", "gnu11"),
    ("GCC_NO_COMMON_BLOCKS", "YES"),
    ("GCC_WARN_64_TO_32_BIT_CONVERSION", "YES"),
    ("GCC_WARN_ABOUT_RETURN_TYPE", "YES_ERROR"),
    ("GCC_WARN_UNDECLARED_SELECTOR", "YES"),
    ("GCC_WARN_UNINITIALIZED_AUTOS", "YES_AGGRESSIVE"),
    ("GCC_WARN_UNUSED_FUNCTION", "YES"),
    ("GCC_WARN_UNUSED_VARIABLE", "YES"),
    ("PRODUCT_NAME", "$(TARGET_NAME)"),
];

const PROJECT_DEBUG: &[(&str, &str)] = &[
    ("DEBUG_INFORMATION_FORMAT", "dwarf"),
    ("ENABLE_TESTABILITY", "YES"),
    ("GCC_DYNAMIC_NO_PIC", "NO"),
    ("GCC_OPTIMIZATION_LEVEL", "0"),
    ("MTL_ENABLE_DEBUG_INFO", "YES"),
    ("ONLY_ACTIVE_ARCH", "YES"),
];

const PROJECT_RELEASE: &[(&str, &str)] = &[
    ("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym"),
    ("ENABLE_NS_ASSERTIONS", "NO"),
    ("MTL_ENABLE_DEBUG_INFO", "NO"),
];

/// Supplies the settings every generated configuration starts from.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSettingsProvider;

impl DefaultSettingsProvider {
    /// Project level defaults: the settings shared by every configuration,
    /// then the configuration specific ones.
    pub fn project_settings(&self, config: BuildConfiguration) -> BuildSettings {
        let mut settings = BuildSettings::new();
        extend(&mut settings, PROJECT_ALL);
        match config {
            BuildConfiguration::Debug => {
                extend(&mut settings, PROJECT_DEBUG);
                settings.insert(
                    "GCC_PREPROCESSOR_DEFINITIONS".to_string(),
                    SettingValue::Array(vec!["DEBUG=1".to_string(), "$(inherited)".to_string()]),
                );
            }
            BuildConfiguration::Release => extend(&mut settings, PROJECT_RELEASE),
        }
        settings
    }

    /// Target level defaults for the target's platform, product and
    /// configuration.
    pub fn target_settings(&self, target: &Target, config: BuildConfiguration) -> BuildSettings {
        let mut settings = BuildSettings::new();
        let platform = target.platform;
        let product = target.product;

        settings.insert("SDKROOT".to_string(), SettingValue::from(platform.sdk_root()));
        match platform {
            Platform::Ios => extend(&mut settings, &[("CODE_SIGN_IDENTITY", "iPhone Developer")]),
            Platform::Macos => extend(&mut settings, &[("CODE_SIGN_IDENTITY", "-")]),
            Platform::Tvos | Platform::Watchos => {}
        }

        match config {
            BuildConfiguration::Debug => extend(
                &mut settings,
                &[
                    ("SWIFT_OPTIMIZATION_LEVEL", "-Onone"),
                    ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", "DEBUG"),
                ],
            ),
            BuildConfiguration::Release => {
                extend(&mut settings, &[("SWIFT_OPTIMIZATION_LEVEL", "-Owholemodule")]);
                if platform != Platform::Macos {
                    extend(&mut settings, &[("VALIDATE_PRODUCT", "YES")]);
                }
            }
        }

        extend(&mut settings, product_settings(platform, product));
        settings
    }
}

fn product_settings(platform: Platform, product: Product) -> &'static [(&'static str, &'static str)] {
    match (platform, product) {
        (Platform::Ios, Product::App) => &[
            ("ASSETCATALOG_COMPILER_APPICON_NAME", "AppIcon"),
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/Frameworks"),
            ("TARGETED_DEVICE_FAMILY", "1,2"),
        ],
        (Platform::Macos, Product::App) => &[
            ("ASSETCATALOG_COMPILER_APPICON_NAME", "AppIcon"),
            ("COMBINE_HIDPI_IMAGES", "YES"),
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/../Frameworks"),
        ],
        (Platform::Tvos, Product::App) => &[
            ("ASSETCATALOG_COMPILER_APPICON_NAME", "App Icon & Top Shelf Image"),
            ("ASSETCATALOG_COMPILER_LAUNCHIMAGE_NAME", "LaunchImage"),
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/Frameworks"),
            ("TARGETED_DEVICE_FAMILY", "3"),
        ],
        (Platform::Watchos, Product::App) => &[
            ("ALWAYS_EMBED_SWIFT_STANDARD_LIBRARIES", "YES"),
            ("SKIP_INSTALL", "YES"),
            ("TARGETED_DEVICE_FAMILY", "4"),
        ],
        (Platform::Macos, Product::Framework | Product::StaticFramework) => &[
            ("COMBINE_HIDPI_IMAGES", "YES"),
            ("DEFINES_MODULE", "YES"),
            ("DYLIB_INSTALL_NAME_BASE", "@rpath"),
            ("FRAMEWORK_VERSION", "A"),
            ("INSTALL_PATH", "$(LOCAL_LIBRARY_DIR)/Frameworks"),
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/../Frameworks @loader_path/Frameworks"),
            ("SKIP_INSTALL", "YES"),
        ],
        (_, Product::Framework | Product::StaticFramework) => &[
            ("CURRENT_PROJECT_VERSION", "1"),
            ("DEFINES_MODULE", "YES"),
            ("DYLIB_COMPATIBILITY_VERSION", "1"),
            ("DYLIB_CURRENT_VERSION", "1"),
            ("DYLIB_INSTALL_NAME_BASE", "@rpath"),
            ("INSTALL_PATH", "$(LOCAL_LIBRARY_DIR)/Frameworks"),
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/Frameworks @loader_path/Frameworks"),
            ("SKIP_INSTALL", "YES"),
            ("VERSIONING_SYSTEM", "apple-generic"),
        ],
        (Platform::Macos, Product::StaticLibrary) => &[
            ("EXECUTABLE_PREFIX", "lib"),
            ("SKIP_INSTALL", "YES"),
        ],
        (_, Product::StaticLibrary) => &[("OTHER_LDFLAGS", "-ObjC"), ("SKIP_INSTALL", "YES")],
        (_, Product::DynamicLibrary) => &[
            ("DYLIB_COMPATIBILITY_VERSION", "1"),
            ("DYLIB_CURRENT_VERSION", "1"),
            ("EXECUTABLE_PREFIX", "lib"),
            ("SKIP_INSTALL", "YES"),
        ],
        (Platform::Macos, Product::UnitTests | Product::UiTests) => &[
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/../Frameworks @loader_path/../Frameworks"),
        ],
        (_, Product::UnitTests | Product::UiTests) => &[
            ("LD_RUNPATH_SEARCH_PATHS", "$(inherited) @executable_path/Frameworks @loader_path/Frameworks"),
        ],
        (_, Product::Bundle) => &[("SKIP_INSTALL", "YES")],
    }
}

fn extend(settings: &mut BuildSettings, pairs: &[(&str, &str)]) {
    for (key, value) in pairs {
        settings.insert(key.to_string(), SettingValue::from(*value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::target;

    #[test]
    fn test_project_settings_per_configuration() {
        let provider = DefaultSettingsProvider;
        let debug = provider.project_settings(BuildConfiguration::Debug);
        let release = provider.project_settings(BuildConfiguration::Release);

        assert_eq!(debug["PRODUCT_NAME"], SettingValue::from("$(TARGET_NAME)"));
        assert_eq!(debug["DEBUG_INFORMATION_FORMAT"], SettingValue::from("dwarf"));
        assert_eq!(release["DEBUG_INFORMATION_FORMAT"], SettingValue::from("dwarf-with-dsym"));
        assert!(matches!(debug["GCC_PREPROCESSOR_DEFINITIONS"], SettingValue::Array(_)));
        assert!(!release.contains_key("GCC_PREPROCESSOR_DEFINITIONS"));
    }

    #[test]
    fn test_target_settings_for_ios_app() {
        let provider = DefaultSettingsProvider;
        let app = target("App", Product::App);

        let debug = provider.target_settings(&app, BuildConfiguration::Debug);
        assert_eq!(debug["SDKROOT"], SettingValue::from("iphoneos"));
        assert_eq!(debug["SWIFT_OPTIMIZATION_LEVEL"], SettingValue::from("-Onone"));
        assert_eq!(debug["TARGETED_DEVICE_FAMILY"], SettingValue::from("1,2"));
        assert!(!debug.contains_key("VALIDATE_PRODUCT"));

        let release = provider.target_settings(&app, BuildConfiguration::Release);
        assert_eq!(release["VALIDATE_PRODUCT"], SettingValue::from("YES"));
    }

    #[test]
    fn test_target_settings_for_static_library() {
        let provider = DefaultSettingsProvider;
        let lib = target("Core", Product::StaticLibrary);
        let settings = provider.target_settings(&lib, BuildConfiguration::Debug);
        assert_eq!(settings["SKIP_INSTALL"], SettingValue::from("YES"));
        assert_eq!(settings["OTHER_LDFLAGS"], SettingValue::from("-ObjC"));
    }
}

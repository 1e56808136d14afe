//! Product kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Product {
    /// Application bundle (.app)
    App,

    /// Dynamic framework (.framework)
    Framework,

    /// Static library (lib*.a)
    #[serde(alias = "staticLibrary")]
    StaticLibrary,

    /// Dynamic library (lib*.dylib)
    #[serde(alias = "dynamicLibrary")]
    DynamicLibrary,

    /// Static framework (.framework with a static binary)
    #[serde(alias = "staticFramework")]
    StaticFramework,

    /// Resource bundle (.bundle)
    Bundle,

    /// Unit test bundle (.xctest)
    #[serde(alias = "unitTests")]
    UnitTests,

    /// UI test bundle (.xctest)
    #[serde(alias = "uiTests")]
    UiTests,
}

impl Product {
    /// File extension of the built product, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Product::App => "app",
            Product::Framework | Product::StaticFramework => "framework",
            Product::StaticLibrary => "a",
            Product::DynamicLibrary => "dylib",
            Product::Bundle => "bundle",
            Product::UnitTests | Product::UiTests => "xctest",
        }
    }

    /// Prefix prepended to the target name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Product::StaticLibrary | Product::DynamicLibrary => "lib",
            _ => "",
        }
    }

    /// The product name on disk, e.g. `libCore.a`.
    pub fn file_name(&self, name: &str) -> String {
        format!("{}{}.{}", self.prefix(), name, self.extension())
    }

    /// Xcode product type identifier.
    pub fn product_type(&self) -> &'static str {
        match self {
            Product::App => "com.apple.product-type.application",
            Product::Framework | Product::StaticFramework => "com.apple.product-type.framework",
            Product::StaticLibrary => "com.apple.product-type.library.static",
            Product::DynamicLibrary => "com.apple.product-type.library.dynamic",
            Product::Bundle => "com.apple.product-type.bundle",
            Product::UnitTests => "com.apple.product-type.bundle.unit-test",
            Product::UiTests => "com.apple.product-type.bundle.ui-testing",
        }
    }

    /// File type of the product reference.
    pub fn explicit_file_type(&self) -> &'static str {
        match self {
            Product::App => "wrapper.application",
            Product::Framework | Product::StaticFramework => "wrapper.framework",
            Product::StaticLibrary => "archive.ar",
            Product::DynamicLibrary => "compiled.mach-o.dylib",
            Product::Bundle | Product::UnitTests | Product::UiTests => "wrapper.cfbundle",
        }
    }

    /// Whether the product is linked statically into its dependents.
    pub fn is_static(&self) -> bool {
        matches!(self, Product::StaticLibrary | Product::StaticFramework)
    }

    /// Whether the product is a test bundle.
    pub fn is_tests_bundle(&self) -> bool {
        matches!(self, Product::UnitTests | Product::UiTests)
    }

    /// Whether the product performs a final link and so absorbs its static
    /// dependencies.
    pub fn can_link_static_products(&self) -> bool {
        matches!(
            self,
            Product::App | Product::Framework | Product::UnitTests | Product::UiTests
        )
    }

    /// Whether the product can embed dynamic frameworks.
    pub fn can_embed_frameworks(&self) -> bool {
        matches!(self, Product::App | Product::UnitTests | Product::UiTests)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Product::App => "app",
            Product::Framework => "framework",
            Product::StaticLibrary => "static-library",
            Product::DynamicLibrary => "dynamic-library",
            Product::StaticFramework => "static-framework",
            Product::Bundle => "bundle",
            Product::UnitTests => "unit-tests",
            Product::UiTests => "ui-tests",
        };
        f.write_str(s)
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(Product::App),
            "framework" => Ok(Product::Framework),
            "static-library" | "staticLibrary" => Ok(Product::StaticLibrary),
            "dynamic-library" | "dynamicLibrary" => Ok(Product::DynamicLibrary),
            "static-framework" | "staticFramework" => Ok(Product::StaticFramework),
            "bundle" => Ok(Product::Bundle),
            "unit-tests" | "unitTests" => Ok(Product::UnitTests),
            "ui-tests" | "uiTests" => Ok(Product::UiTests),
            _ => Err(format!("unknown product `{}`", s)),
        }
    }
}

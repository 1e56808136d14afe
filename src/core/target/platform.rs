//! Platforms and deployment targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The platform a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "iOS")]
    Ios,
    #[serde(alias = "macOS")]
    Macos,
    #[serde(alias = "tvOS")]
    Tvos,
    #[serde(alias = "watchOS")]
    Watchos,
}

impl Platform {
    /// Value of the `SDKROOT` build setting.
    pub fn sdk_root(&self) -> &'static str {
        match self {
            Platform::Ios => "iphoneos",
            Platform::Macos => "macosx",
            Platform::Tvos => "appletvos",
            Platform::Watchos => "watchos",
        }
    }

    /// Value of the `SUPPORTED_PLATFORMS` build setting.
    pub fn supported_platforms(&self) -> &'static str {
        match self {
            Platform::Ios => "iphonesimulator iphoneos",
            Platform::Macos => "macosx",
            Platform::Tvos => "appletvsimulator appletvos",
            Platform::Watchos => "watchsimulator watchos",
        }
    }

    /// Build setting holding the minimum OS version.
    pub fn deployment_target_key(&self) -> &'static str {
        match self {
            Platform::Ios => "IPHONEOS_DEPLOYMENT_TARGET",
            Platform::Macos => "MACOSX_DEPLOYMENT_TARGET",
            Platform::Tvos => "TVOS_DEPLOYMENT_TARGET",
            Platform::Watchos => "WATCHOS_DEPLOYMENT_TARGET",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Macos => "macOS",
            Platform::Tvos => "tvOS",
            Platform::Watchos => "watchOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "macos" => Ok(Platform::Macos),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            _ => Err(format!(
                "unknown platform `{}`; expected ios, macos, tvos or watchos",
                s
            )),
        }
    }
}

/// A device family an iOS target runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Iphone,
    Ipad,
}

impl Device {
    /// `TARGETED_DEVICE_FAMILY` code.
    pub fn family(&self) -> u8 {
        match self {
            Device::Iphone => 1,
            Device::Ipad => 2,
        }
    }
}

/// Minimum OS version of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub version: String,
    /// Only meaningful on iOS.
    pub devices: Vec<Device>,
}

impl DeploymentTarget {
    pub fn new(version: impl Into<String>) -> Self {
        DeploymentTarget {
            version: version.into(),
            devices: Vec::new(),
        }
    }

    pub fn with_devices(mut self, devices: impl IntoIterator<Item = Device>) -> Self {
        self.devices = devices.into_iter().collect();
        self
    }

    /// Comma separated device family codes, e.g. `1,2`.
    pub fn device_family(&self) -> String {
        let mut families: Vec<u8> = self.devices.iter().map(Device::family).collect();
        families.sort_unstable();
        families.dedup();
        families
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_settings() {
        assert_eq!(Platform::Ios.sdk_root(), "iphoneos");
        assert_eq!(Platform::Tvos.supported_platforms(), "appletvsimulator appletvos");
        assert_eq!(
            Platform::Watchos.deployment_target_key(),
            "WATCHOS_DEPLOYMENT_TARGET"
        );
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("macos".parse::<Platform>().unwrap(), Platform::Macos);
        assert!("android".parse::<Platform>().is_err());
    }

    #[test]
    fn test_device_family() {
        let target = DeploymentTarget::new("13.0").with_devices([Device::Ipad, Device::Iphone]);
        assert_eq!(target.device_family(), "1,2");
        assert_eq!(DeploymentTarget::new("13.0").device_family(), "");
    }
}

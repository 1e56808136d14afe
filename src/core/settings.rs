//! Build settings.
//!
//! Settings are plain key/value maps layered per configuration. Values are
//! either a string or a list of strings, as in Xcode.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single build setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Array(Vec<String>),
}

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            SettingValue::Array(_) => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(v: Vec<String>) -> Self {
        SettingValue::Array(v)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Array(items) => f.write_str(&items.join(" ")),
        }
    }
}

/// Ordered build settings of one configuration.
pub type BuildSettings = BTreeMap<String, SettingValue>;

/// Marker that makes a setting extend the value it overrides.
pub const INHERITED: &str = "$(inherited)";

/// Merge `incoming` into `base`.
///
/// A later key replaces the earlier one, except that a string containing
/// `$(inherited)` is appended to an existing string value. Arrays are
/// always replaced.
pub fn merge_settings(base: &mut BuildSettings, incoming: &BuildSettings) {
    for (key, value) in incoming {
        let merged = match (base.get(key), value) {
            (Some(SettingValue::String(prior)), SettingValue::String(new))
                if new.contains(INHERITED) =>
            {
                SettingValue::String(format!("{} {}", prior, new))
            }
            _ => value.clone(),
        };
        base.insert(key.clone(), merged);
    }
}

/// The two build configurations every project has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    Debug,
    Release,
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 2] = [BuildConfiguration::Debug, BuildConfiguration::Release];

    /// Name as shown in Xcode.
    pub fn name(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
            BuildConfiguration::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings of a single configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub settings: BuildSettings,
    /// Optional `.xcconfig` used as the base configuration reference
    pub xcconfig: Option<PathBuf>,
}

/// Settings shared by all configurations plus per configuration overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub base: BuildSettings,
    pub debug: Option<Configuration>,
    pub release: Option<Configuration>,
}

impl Settings {
    pub fn configuration(&self, config: BuildConfiguration) -> Option<&Configuration> {
        match config {
            BuildConfiguration::Debug => self.debug.as_ref(),
            BuildConfiguration::Release => self.release.as_ref(),
        }
    }

    /// Every `.xcconfig` file referenced by these settings.
    pub fn xcconfigs(&self) -> impl Iterator<Item = &Path> {
        self.debug
            .iter()
            .chain(self.release.iter())
            .filter_map(|c| c.xcconfig.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> BuildSettings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SettingValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_merge_replaces_plain_values() {
        let mut base = settings(&[("A", "A_BASE"), ("B", "B_BASE")]);
        merge_settings(&mut base, &settings(&[("A", "A_DEBUG")]));
        assert_eq!(base["A"], SettingValue::from("A_DEBUG"));
        assert_eq!(base["B"], SettingValue::from("B_BASE"));
    }

    #[test]
    fn test_merge_appends_inherited() {
        let mut base = settings(&[("A", "A_BASE")]);
        merge_settings(&mut base, &settings(&[("A", "$(inherited) A_DEBUG")]));
        assert_eq!(base["A"], SettingValue::from("A_BASE $(inherited) A_DEBUG"));
    }

    #[test]
    fn test_merge_inherited_without_prior_is_kept() {
        let mut base = BuildSettings::new();
        merge_settings(&mut base, &settings(&[("A", "$(inherited) A")]));
        assert_eq!(base["A"], SettingValue::from("$(inherited) A"));
    }

    #[test]
    fn test_merge_never_concatenates_arrays() {
        let mut base = BuildSettings::new();
        base.insert("A".into(), SettingValue::Array(vec!["x".into()]));
        let mut incoming = BuildSettings::new();
        incoming.insert(
            "A".into(),
            SettingValue::Array(vec!["$(inherited)".into(), "y".into()]),
        );
        merge_settings(&mut base, &incoming);
        assert_eq!(
            base["A"],
            SettingValue::Array(vec!["$(inherited)".into(), "y".into()])
        );
    }

    #[test]
    fn test_xcconfigs() {
        let settings = Settings {
            debug: Some(Configuration {
                settings: BuildSettings::new(),
                xcconfig: Some(PathBuf::from("/p/Debug.xcconfig")),
            }),
            ..Settings::default()
        };
        let configs: Vec<&Path> = settings.xcconfigs().collect();
        assert_eq!(configs, vec![Path::new("/p/Debug.xcconfig")]);
    }
}

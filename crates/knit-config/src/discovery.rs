//! Settings file discovery for CLI use.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const SETTINGS_FILE: &str = "knit.toml";

/// Where project settings were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Toml(PathBuf),
    /// `knit` field of a package manifest
    PackageJson(PathBuf),
}

impl ConfigSource {
    /// Classify an explicitly given settings path by file name.
    pub fn from_path(path: PathBuf) -> Self {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            Self::PackageJson(path)
        } else {
            Self::Toml(path)
        }
    }
}

/// Searches a project root for knit settings.
///
/// # Example
///
/// ```no_run
/// use knit_config::ConfigDiscovery;
///
/// let source = ConfigDiscovery::new(".").find();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a settings source in the root directory
    ///
    /// Searches in this order:
    /// 1. knit.toml
    /// 2. package.json (knit field)
    pub fn find(&self) -> Option<ConfigSource> {
        let toml_path = self.root.join(SETTINGS_FILE);
        if toml_path.exists() {
            return Some(ConfigSource::Toml(toml_path));
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("knit").is_some_and(|v| !v.is_null()) {
                        return Some(ConfigSource::PackageJson(pkg_path));
                    }
                }
            }
        }

        None
    }

    /// The `knit` field of a package manifest.
    pub fn read_package_field(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidSettings {
                message: format!("invalid JSON in {}: {}", path.display(), e),
            })?;

        match parsed.get_mut("knit").map(Value::take) {
            Some(value @ Value::Object(_)) => Ok(value),
            _ => Err(ConfigError::SchemaValidation {
                message: format!("{} has no 'knit' object", path.display()),
                hint: Some("Add a 'knit' object to package.json or create knit.toml".to_string()),
            }),
        }
    }
}

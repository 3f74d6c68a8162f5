//! Dependency manifests (`package.json`).
//!
//! Only the key set of `dependencies` matters for composition; versions are
//! kept so the manifest round-trips in debug output.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// A parsed dependency manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Dependency name → version, in document order
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
}

impl Manifest {
    /// Read and parse a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::MalformedManifest` if it is not a valid manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let manifest = Self::parse(&content, path)?;
        tracing::debug!(
            "Loaded manifest {} ({} dependencies)",
            path.display(),
            manifest.dependencies.len()
        );
        Ok(manifest)
    }

    /// Parse manifest text. `origin` is only used for error messages.
    pub fn parse(content: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let value: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::MalformedManifest {
                path: origin.clone(),
                message: e.to_string(),
            })?;
        Self::from_value(value, origin)
    }

    /// Build from an already-parsed JSON document.
    ///
    /// Unrelated fields are ignored. A missing or `null` `dependencies` field
    /// yields an empty map.
    pub fn from_value(value: Value, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let Value::Object(mut doc) = value else {
            return Err(ConfigError::MalformedManifest {
                path: origin,
                message: "manifest root must be an object".to_string(),
            });
        };

        let name = match doc.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        };

        let dependencies = match doc.remove("dependencies") {
            None | Some(Value::Null) => IndexMap::new(),
            Some(deps) => serde_json::from_value(deps).map_err(|e| {
                ConfigError::MalformedManifest {
                    path: origin,
                    message: format!("invalid 'dependencies' field: {e}"),
                }
            })?,
        };

        Ok(Self { name, dependencies })
    }

    /// Dependency names in document order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }
}

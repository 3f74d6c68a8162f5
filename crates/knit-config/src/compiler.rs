//! Inherited compiler configuration (`.babelrc`).
//!
//! Every transform returns a new value; the inherited config can be reused
//! for several compositions (debug and production) without interference.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::plugin::PluginEntry;

/// Helper-injection plugin appended to the compiler's plugin list.
pub const EXTERNAL_HELPERS: &str = "external-helpers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<PluginEntry>,

    #[serde(default)]
    pub plugins: Vec<PluginEntry>,

    /// Per-directory config discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub babelrc: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_helpers: Option<bool>,

    /// Inherited keys knit does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompilerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::parse(&content, path)?;
        tracing::debug!(
            "Loaded compiler config {} ({} presets, {} plugins)",
            path.display(),
            config.presets.len(),
            config.plugins.len()
        );
        Ok(config)
    }

    pub fn parse(content: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::MalformedCompilerConfig {
            path: origin.into(),
            message: e.to_string(),
        })
    }

    pub fn with_plugins(self, plugins: Vec<PluginEntry>) -> Self {
        Self { plugins, ..self }
    }

    /// Put `entry` ahead of every other plugin.
    pub fn with_dedup(mut self, entry: PluginEntry) -> Self {
        self.plugins.insert(0, entry);
        self
    }

    pub fn with_helpers(mut self) -> Self {
        self.plugins.push(PluginEntry::named(EXTERNAL_HELPERS));
        self
    }

    /// Make this config the only one the compiler reads.
    ///
    /// Disables `.babelrc` discovery, enables runtime helpers, and turns off
    /// module-format conversion in the first preset.
    pub fn authoritative(mut self) -> Self {
        self.babelrc = Some(false);
        self.runtime_helpers = Some(true);

        if let Some(preset) = self.presets.first_mut() {
            match preset.args.first_mut() {
                Some(Value::Object(options)) => {
                    options.insert("modules".to_string(), Value::Bool(false));
                }
                None => {
                    let mut options = Map::new();
                    options.insert("modules".to_string(), Value::Bool(false));
                    preset.args.push(Value::Object(options));
                }
                Some(other) => {
                    tracing::warn!(
                        "First preset has non-object options ({}); module format left as is",
                        other
                    );
                }
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BABELRC: &str = r#"{
        "presets": [["env", {"targets": {"node": "6"}}]],
        "plugins": ["transform-flow-strip-types", "./resources/inline-invariant"],
        "env": {"test": {"plugins": ["istanbul"]}}
    }"#;

    #[test]
    fn unknown_keys_survive_round_trip() {
        let config = CompilerConfig::parse(BABELRC, ".babelrc").unwrap();
        assert!(config.extra.contains_key("env"));

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["env"], json!({"test": {"plugins": ["istanbul"]}}));
        assert!(value.get("babelrc").is_none());
    }

    #[test]
    fn missing_presets_stay_missing() {
        let config = CompilerConfig::parse(r#"{"plugins": ["syntax-async-functions"]}"#, ".babelrc")
            .unwrap()
            .authoritative();

        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("presets").is_none());
        assert_eq!(value["plugins"], json!(["syntax-async-functions"]));
    }

    #[test]
    fn malformed_config_is_fatal() {
        let err = CompilerConfig::parse(r#"{"plugins": 3}"#, ".babelrc").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedCompilerConfig { .. }));
    }

    #[test]
    fn dedup_goes_first_and_helpers_last() {
        let config = CompilerConfig::parse(BABELRC, ".babelrc")
            .unwrap()
            .with_dedup(PluginEntry::named("dedup"))
            .with_helpers();

        assert_eq!(config.plugins.first().and_then(PluginEntry::name), Some("dedup"));
        assert_eq!(
            config.plugins.last().and_then(PluginEntry::name),
            Some(EXTERNAL_HELPERS)
        );
        assert_eq!(config.plugins.len(), 4);
    }

    #[test]
    fn authoritative_disables_discovery_and_modules() {
        let config = CompilerConfig::parse(BABELRC, ".babelrc")
            .unwrap()
            .authoritative();

        assert_eq!(config.babelrc, Some(false));
        assert_eq!(config.runtime_helpers, Some(true));
        assert_eq!(
            serde_json::to_value(&config.presets).unwrap(),
            json!([["env", {"targets": {"node": "6"}, "modules": false}]])
        );
    }

    #[test]
    fn authoritative_adds_options_to_bare_preset() {
        let config = CompilerConfig::parse(r#"{"presets": ["env"]}"#, ".babelrc")
            .unwrap()
            .authoritative();

        assert_eq!(
            serde_json::to_value(&config.presets).unwrap(),
            json!([["env", {"modules": false}]])
        );
    }

    #[test]
    fn transforms_leave_the_base_untouched() {
        let base = CompilerConfig::parse(BABELRC, ".babelrc").unwrap();
        let _derived = base.clone().with_helpers().authoritative();
        assert_eq!(base.plugins.len(), 2);
        assert_eq!(base.babelrc, None);
    }
}

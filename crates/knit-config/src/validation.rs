//! Pluggable settings validation strategies
//!
//! Separates schema validation (pure) from filesystem validation (CLI use).

use std::path::{Path, PathBuf};

use crate::dedup::RewritePattern;
use crate::error::{ConfigError, Result};
use crate::plugin::LogicalPlugin;
use crate::settings::ProjectSettings;

/// Trait for pluggable settings validation strategies
pub trait ConfigValidator {
    fn validate(&self, settings: &ProjectSettings) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use knit_config::{ConfigValidator, ProjectSettings, SchemaValidator};
///
/// SchemaValidator.validate(&ProjectSettings::default()).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, settings: &ProjectSettings) -> Result<()> {
        if settings.entry.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "entry cannot be empty".to_string(),
                hint: Some("Set 'entry' to the bundle's entry module".to_string()),
            });
        }

        if settings.output.file.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "output file cannot be empty".to_string(),
                hint: Some("Set 'output.file' to the bundle path".to_string()),
            });
        }

        // Specifiers must be non-empty strings
        for specifier in &settings.deep_imports {
            if specifier.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "deep import specifiers cannot be empty".to_string(),
                    hint: Some("Remove empty strings from the 'deep_imports' array".to_string()),
                });
            }
        }

        for pattern in settings.commonjs_include.iter().chain(&settings.dedup.exclude) {
            if pattern.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "glob patterns cannot be empty".to_string(),
                    hint: Some(
                        "Check 'commonjs_include' and 'dedup.exclude' for empty strings"
                            .to_string(),
                    ),
                });
            }
        }

        for key in settings.replacements.keys() {
            key.parse::<LogicalPlugin>()?;
        }

        RewritePattern::new(&settings.dedup.mapping.source, settings.dedup.mapping.target.as_str())?;

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that every input file exists under
/// the project root.
#[derive(Debug, Clone)]
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn require(&self, path: &Path, what: &str) -> Result<()> {
        let full = self.root.join(path);
        if full.exists() {
            Ok(())
        } else {
            Err(ConfigError::SchemaValidation {
                message: format!("{what} not found: {}", full.display()),
                hint: Some(format!("Check the {what} path in knit.toml")),
            })
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, settings: &ProjectSettings) -> Result<()> {
        SchemaValidator.validate(settings)?;

        self.require(&settings.library_manifest, "library manifest")?;
        self.require(&settings.tool_manifest, "tool manifest")?;
        self.require(&settings.compiler_config, "compiler config")?;
        self.require(&settings.entry, "entry")?;

        // Module paths may omit the extension, as the compiler resolves them
        for (name, path) in &settings.replacements {
            let full = self.root.join(path);
            if !full.exists() && !full.with_extension("js").exists() {
                tracing::warn!(
                    "Replacement for '{}' not found at {}",
                    name,
                    full.display()
                );
            }
        }

        Ok(())
    }
}

pub fn validate_schema(settings: &ProjectSettings) -> Result<()> {
    SchemaValidator.validate(settings)
}

pub fn validate_fs(settings: &ProjectSettings, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(settings)
}

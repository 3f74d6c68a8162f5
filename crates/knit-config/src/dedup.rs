//! Import-deduplication plugin entry.
//!
//! The dedup transform runs first in the compiler's plugin list so it sees
//! the original import specifiers. It is told which paths to ignore, which
//! files are always new modules, which specifiers stay external, and how to
//! redirect library sources to their generated declaration counterparts.

use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::external::ExternalSet;
use crate::plugin::{LogicalPlugin, PluginEntry};

/// Source-path regex → declaration-path replacement (`$1` style captures).
#[derive(Debug, Clone)]
pub struct RewritePattern {
    source: Regex,
    target: String,
}

impl RewritePattern {
    pub fn new(source: &str, target: impl Into<String>) -> Result<Self> {
        let source = Regex::new(source).map_err(|e| ConfigError::InvalidRewritePattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source,
            target: target.into(),
        })
    }

    /// Anchor both sides under `root`. The root prefix of the source side is
    /// matched literally; `source` itself is a regex fragment.
    pub fn under_root(root: &Path, source: &str, target: &str) -> Result<Self> {
        let root_str = root.to_string_lossy();
        let prefix = regex::escape(root_str.trim_end_matches(MAIN_SEPARATOR));
        let separator = regex::escape(MAIN_SEPARATOR_STR);
        let target = root.join(target);
        Self::new(
            &format!("{prefix}{separator}{source}"),
            target.to_string_lossy(),
        )
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Declaration path for `path`, if the pattern applies to it.
    pub fn apply(&self, path: &str) -> Option<String> {
        self.source
            .is_match(path)
            .then(|| self.source.replace(path, self.target.as_str()).into_owned())
    }
}

/// Options handed to the dedup transform.
#[derive(Debug, Clone)]
pub struct DedupRule {
    /// Globs excluded from dedup analysis
    pub exclude: Vec<String>,
    /// Files always treated as newly introduced modules
    pub new_files: Vec<PathBuf>,
    /// Specifiers left unresolved; never folded
    pub external: ExternalSet,
    pub mapping: RewritePattern,
}

impl DedupRule {
    pub fn new(
        exclude: Vec<String>,
        new_files: Vec<PathBuf>,
        external: ExternalSet,
        mapping: RewritePattern,
    ) -> Self {
        Self {
            exclude,
            new_files,
            external,
            mapping,
        }
    }

    /// Options object in the shape the transform reads.
    pub fn options(&self) -> Value {
        let mut mapping = Map::new();
        mapping.insert(
            self.mapping.source().to_string(),
            Value::String(self.mapping.target().to_string()),
        );

        let mut options = Map::new();
        options.insert("exclude".to_string(), string_array(self.exclude.iter().cloned()));
        options.insert(
            "external".to_string(),
            string_array(self.external.iter().map(str::to_string)),
        );
        options.insert(
            "newFiles".to_string(),
            string_array(
                self.new_files
                    .iter()
                    .map(|p| p.to_string_lossy().into_owned()),
            ),
        );
        options.insert("mapping".to_string(), Value::Object(mapping));
        Value::Object(options)
    }

    /// The plugin entry, still under its logical name so the replacement
    /// table can resolve it like any other placeholder.
    pub fn to_entry(&self) -> PluginEntry {
        PluginEntry::with_args(LogicalPlugin::ImportDuplicate.key(), vec![self.options()])
    }
}

fn string_array(items: impl Iterator<Item = String>) -> Value {
    Value::Array(items.map(Value::String).collect())
}

/// Convenience wrapper over [`DedupRule::to_entry`].
pub fn build_dedup_entry(
    exclude: Vec<String>,
    new_files: Vec<PathBuf>,
    external: ExternalSet,
    mapping: RewritePattern,
) -> PluginEntry {
    DedupRule::new(exclude, new_files, external, mapping).to_entry()
}

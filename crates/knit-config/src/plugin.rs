//! Compiler plugin entries and logical-name replacement.
//!
//! An inherited compiler config lists plugins either as a bare name
//! (`"external-helpers"`) or as a name followed by positional options
//! (`["transform-import-duplicate", {...}]`). Some of those names are logical
//! placeholders that must be swapped for a concrete implementation before the
//! config is handed to the compiler.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Concrete plugin implementation, referenced by module path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRef {
    path: PathBuf,
}

impl ModuleRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The plugin half of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginRef {
    /// Plugin referenced by name; may be a logical placeholder
    Named(String),
    /// Concrete implementation substituted for a logical name
    Resolved(ModuleRef),
    /// Any other shape; carried through untouched
    Inline(Value),
}

impl PluginRef {
    fn into_value(self) -> Value {
        match self {
            Self::Named(name) => Value::String(name),
            Self::Resolved(module) => Value::String(module.path.to_string_lossy().into_owned()),
            Self::Inline(value) => value,
        }
    }
}

/// One element of a compiler plugin list.
///
/// Wire form: the plugin alone when there are no arguments, otherwise
/// `[plugin, ...args]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct PluginEntry {
    pub plugin: PluginRef,
    pub args: Vec<Value>,
}

impl PluginEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            plugin: PluginRef::Named(name.into()),
            args: Vec::new(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            plugin: PluginRef::Named(name.into()),
            args,
        }
    }

    /// The entry's name, if it is still referenced by a plain string.
    pub fn name(&self) -> Option<&str> {
        match &self.plugin {
            PluginRef::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.plugin, PluginRef::Resolved(_))
    }
}

impl From<Value> for PluginEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::named(name),
            Value::Array(mut items) if !items.is_empty() => {
                let plugin = match items.remove(0) {
                    Value::String(name) => PluginRef::Named(name),
                    other => PluginRef::Inline(other),
                };
                Self {
                    plugin,
                    args: items,
                }
            }
            other => Self {
                plugin: PluginRef::Inline(other),
                args: Vec::new(),
            },
        }
    }
}

impl From<PluginEntry> for Value {
    fn from(entry: PluginEntry) -> Self {
        let plugin = entry.plugin.into_value();
        if entry.args.is_empty() {
            plugin
        } else {
            let mut items = Vec::with_capacity(entry.args.len() + 1);
            items.push(plugin);
            items.extend(entry.args);
            Value::Array(items)
        }
    }
}

/// Logical plugin names the inherited compiler config may use as placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalPlugin {
    /// Source-tree invariant inliner referenced relative to the library
    InlineInvariant,
    /// Import deduplication transform
    ImportDuplicate,
}

impl LogicalPlugin {
    pub const ALL: [Self; 2] = [Self::InlineInvariant, Self::ImportDuplicate];

    /// The placeholder string used in compiler configs.
    pub fn key(self) -> &'static str {
        match self {
            Self::InlineInvariant => "./resources/inline-invariant",
            Self::ImportDuplicate => "transform-import-duplicate",
        }
    }
}

impl fmt::Display for LogicalPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LogicalPlugin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|logical| logical.key() == s)
            .ok_or_else(|| ConfigError::UnknownLogicalPlugin {
                name: s.to_string(),
            })
    }
}

/// Finite mapping from logical plugin to concrete implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: IndexMap<LogicalPlugin, ModuleRef>,
}

/// Result of rewriting a plugin list.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub plugins: Vec<PluginEntry>,
    /// Table keys that matched no entry. Tolerated, reported for drift checks.
    pub unmatched: Vec<LogicalPlugin>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string keys, resolving relative module paths against `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownLogicalPlugin` for any key that is not a
    /// known logical plugin name.
    pub fn from_paths<K, P>(map: impl IntoIterator<Item = (K, P)>, root: &Path) -> Result<Self>
    where
        K: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut table = Self::new();
        for (key, path) in map {
            let logical: LogicalPlugin = key.as_ref().parse()?;
            table.insert(logical, ModuleRef::new(root.join(path)));
        }
        Ok(table)
    }

    pub fn insert(&mut self, logical: LogicalPlugin, module: ModuleRef) -> Option<ModuleRef> {
        self.entries.insert(logical, module)
    }

    pub fn get(&self, logical: LogicalPlugin) -> Option<&ModuleRef> {
        self.entries.get(&logical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<(LogicalPlugin, &ModuleRef)> {
        let logical = name.parse::<LogicalPlugin>().ok()?;
        self.entries.get(&logical).map(|module| (logical, module))
    }

    /// Replace one entry if its name is a mapped logical plugin.
    pub fn rewrite_entry(&self, entry: &PluginEntry) -> PluginEntry {
        match entry.name().and_then(|name| self.lookup(name)) {
            Some((logical, module)) => {
                tracing::debug!("Replacing plugin '{}' with {}", logical, module.path.display());
                PluginEntry {
                    plugin: PluginRef::Resolved(module.clone()),
                    args: entry.args.clone(),
                }
            }
            None => entry.clone(),
        }
    }

    /// Rewrite a plugin list without touching the input.
    ///
    /// Entry order is preserved; only matching entries change. Resolved
    /// entries are never re-matched, so rewriting twice equals rewriting once.
    pub fn rewrite(&self, pipeline: &[PluginEntry]) -> Rewrite {
        let plugins: Vec<PluginEntry> = pipeline.iter().map(|e| self.rewrite_entry(e)).collect();

        let unmatched = self
            .entries
            .keys()
            .copied()
            .filter(|logical| {
                !pipeline
                    .iter()
                    .any(|entry| entry.name() == Some(logical.key()))
            })
            .collect();

        Rewrite { plugins, unmatched }
    }
}

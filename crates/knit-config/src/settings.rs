//! Project settings (`knit.toml`).
//!
//! Sources, lowest priority first: built-in defaults, the discovered config
//! file, `KNIT_*` environment variables, then caller overrides (CLI flags).
//! Relative paths are resolved against the project root.

use std::io;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assemble::OutputOptions;
use crate::discovery::{ConfigDiscovery, ConfigSource};
use crate::error::{ConfigError, Result};

/// Deep-import specifiers used directly by the library sources. Not
/// discoverable from manifest keys.
pub const DEFAULT_DEEP_IMPORTS: &[&str] = &[
    "rxjs/Observable",
    "rxjs/add/observable/fromPromise",
    // jsutils
    "graphql/jsutils/ObjMap",
    "graphql/type",
    "graphql/language",
    "graphql/language/source",
    "graphql/language/kinds",
    "graphql/language/parser",
    "graphql/language/ast",
    "graphql/error",
    "graphql/error/GraphQLError",
    "graphql/error/locatedError",
    "graphql/utilities",
    "graphql/type/schema",
    "graphql/jsutils/find",
    "graphql/jsutils/invariant",
    "graphql/jsutils/isNullish",
    "graphql/utilities/typeFromAST",
    "graphql/utilities/getOperationAST",
    "graphql/execution/values",
    "graphql/type/definition",
    "graphql/type/schema",
    "graphql/type/introspection",
    "graphql/type/directives",
    "graphql/type/scalars",
    "graphql/subscription",
    // validation rules
    "graphql/validation/validate",
    "graphql/validation/rules/ArgumentsOfCorrectType",
    "graphql/validation/rules/DefaultValuesOfCorrectType",
    "graphql/validation/rules/FieldsOnCorrectType",
    "graphql/validation/rules/FragmentsOnCompositeTypes",
    "graphql/validation/rules/KnownArgumentNames",
    "graphql/validation/rules/KnownDirectives",
    "graphql/validation/rules/KnownFragmentNames",
    "graphql/validation/rules/KnownTypeNames",
    "graphql/validation/rules/LoneAnonymousOperation",
    "graphql/validation/rules/NoFragmentCycles",
    "graphql/validation/rules/NoUndefinedVariables",
    "graphql/validation/rules/NoUnusedFragments",
    "graphql/validation/rules/NoUnusedVariables",
    "graphql/validation/rules/OverlappingFieldsCanBeMerged",
    "graphql/validation/rules/PossibleFragmentSpreads",
    "graphql/validation/rules/ProvidedNonNullArguments",
    "graphql/validation/rules/ScalarLeafs",
    "graphql/validation/rules/SingleFieldSubscriptions",
    "graphql/validation/rules/UniqueArgumentNames",
    "graphql/validation/rules/UniqueDirectivesPerLocation",
    "graphql/validation/rules/UniqueFragmentNames",
    "graphql/validation/rules/UniqueInputFieldNames",
    "graphql/validation/rules/UniqueOperationNames",
    "graphql/validation/rules/UniqueVariableNames",
    "graphql/validation/rules/VariablesAreInputTypes",
    "graphql/validation/rules/VariablesInAllowedPosition",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Bundle entry point
    pub entry: PathBuf,

    pub output: OutputOptions,

    /// Skip the production passes
    pub debug: bool,

    /// Manifest of the library being bundled
    pub library_manifest: PathBuf,

    /// Manifest of the bundling package itself
    pub tool_manifest: PathBuf,

    /// Inherited compiler config
    pub compiler_config: PathBuf,

    pub deep_imports: Vec<String>,

    /// Logical plugin name → implementation module path. Replaced as a
    /// whole by any layer that sets it.
    #[serde(default = "default_replacements")]
    pub replacements: IndexMap<String, PathBuf>,

    /// Dependency trees handled by the CommonJS interop shim
    pub commonjs_include: Vec<String>,

    pub dedup: DedupSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupSettings {
    pub exclude: Vec<String>,
    pub new_files: Vec<PathBuf>,
    pub mapping: MappingSettings,
}

/// Source regex fragment and replacement, both relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSettings {
    pub source: String,
    pub target: String,
}

fn default_replacements() -> IndexMap<String, PathBuf> {
    let mut replacements = IndexMap::new();
    replacements.insert(
        "./resources/inline-invariant".to_string(),
        PathBuf::from("graphql/resources/inline-invariant"),
    );
    replacements.insert(
        "transform-import-duplicate".to_string(),
        PathBuf::from("babel-plugin-transform-import-duplicate"),
    );
    replacements
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("src/index.js"),
            output: OutputOptions::default(),
            debug: false,
            library_manifest: PathBuf::from("graphql/package.json"),
            tool_manifest: PathBuf::from("package.json"),
            compiler_config: PathBuf::from("graphql/.babelrc"),
            deep_imports: DEFAULT_DEEP_IMPORTS.iter().map(|s| (*s).to_string()).collect(),
            replacements: default_replacements(),
            commonjs_include: vec![
                "node_modules/graphql/**".to_string(),
                "node_modules/iterall/**".to_string(),
                "node_modules/rxjs/**".to_string(),
            ],
            dedup: DedupSettings::default(),
        }
    }
}

impl Default for DedupSettings {
    fn default() -> Self {
        Self {
            exclude: vec!["node_modules/**".to_string()],
            new_files: vec![
                PathBuf::from("graphql/src/type/reactiveDirectives.js"),
                PathBuf::from("graphql/src/utilities/asyncIterator.js"),
                PathBuf::from("graphql/src/validation/rules/NoReactiveMutations.js"),
            ],
            mapping: MappingSettings {
                source: r"graphql/src/(.+?)\.js$".to_string(),
                target: "node_modules/graphql/$1.js.flow".to_string(),
            },
        }
    }
}

impl ProjectSettings {
    /// Layered figment for `root`. Callers may merge further providers on top
    /// before calling [`ProjectSettings::extract`].
    ///
    /// An explicit `config_file` replaces discovery.
    pub fn figment(root: &Path, config_file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::base_defaults()?));

        let source = match config_file {
            Some(path) => {
                let path = root.join(path);
                if !path.is_file() {
                    return Err(ConfigError::io(
                        &path,
                        io::Error::new(io::ErrorKind::NotFound, "settings file not found"),
                    ));
                }
                Some(ConfigSource::from_path(path))
            }
            None => ConfigDiscovery::new(root).find(),
        };

        match source {
            Some(ConfigSource::Toml(path)) => {
                tracing::debug!("Using settings file {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            Some(ConfigSource::PackageJson(path)) => {
                tracing::debug!("Using 'knit' field of {}", path.display());
                let value = ConfigDiscovery::read_package_field(&path)?;
                figment = figment.merge(Serialized::defaults(value));
            }
            None => tracing::debug!("No settings file found, using defaults"),
        }

        Ok(figment.merge(Env::prefixed("KNIT_").split("__")))
    }

    /// Defaults as a figment layer. `replacements` is left out so that a
    /// table from any other layer replaces the default one instead of being
    /// merged key by key; extraction fills it back in when nothing set it.
    fn base_defaults() -> Result<Value> {
        let mut defaults =
            serde_json::to_value(Self::default()).map_err(|e| ConfigError::InvalidSettings {
                message: e.to_string(),
            })?;
        if let Some(table) = defaults.as_object_mut() {
            table.remove("replacements");
        }
        Ok(defaults)
    }

    pub fn extract(figment: &Figment) -> Result<Self> {
        figment.extract().map_err(|e| ConfigError::InvalidSettings {
            message: e.to_string(),
        })
    }

    /// Load settings for `root` without overrides.
    pub fn load(root: &Path, config_file: Option<&Path>) -> Result<Self> {
        Self::extract(&Self::figment(root, config_file)?)
    }
}

//! Composes a single, fully-resolved bundler configuration for a library.
//!
//! Inputs are two dependency manifests (the library's and the bundling
//! package's), an inherited compiler config, and project settings. The output
//! is a [`BuildConfig`] ready to hand to the bundler.
//!
//! # Example
//!
//! ```no_run
//! use knit_config::{compose, ProjectSettings};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let settings = ProjectSettings::load(root, None).unwrap();
//! let composition = compose(&settings, root).unwrap();
//! println!("{}", serde_json::to_string_pretty(&composition.config).unwrap());
//! ```

pub mod assemble;
pub mod compiler;
pub mod compose;
pub mod dedup;
pub mod discovery;
pub mod error;
pub mod external;
pub mod manifest;
pub mod passes;
pub mod plugin;
pub mod settings;
pub mod validation;

// Re-export main types
pub use assemble::{Assembler, BuildConfig, OutputFormat, OutputOptions};
pub use compiler::{CompilerConfig, EXTERNAL_HELPERS};
pub use compose::{compose, Composer, Composition, Inputs};
pub use dedup::{build_dedup_entry, DedupRule, RewritePattern};
pub use error::{ConfigError, Result};
pub use external::ExternalSet;
pub use manifest::Manifest;
pub use passes::{select_passes, CleanupOptions, CommentPolicy, Pass};
pub use plugin::{LogicalPlugin, ModuleRef, PluginEntry, PluginRef, ReplacementTable, Rewrite};
pub use settings::{DedupSettings, MappingSettings, ProjectSettings, DEFAULT_DEEP_IMPORTS};

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, ConfigSource, SETTINGS_FILE};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};

//! End-to-end composition: inputs + settings → [`BuildConfig`].
//!
//! Stages, each returning a new value:
//! external set → plugin rewrite → dedup entry → mode passes → assembly.

use std::path::{Path, PathBuf};

use crate::assemble::{Assembler, BuildConfig};
use crate::compiler::CompilerConfig;
use crate::dedup::{DedupRule, RewritePattern};
use crate::error::Result;
use crate::external::ExternalSet;
use crate::manifest::Manifest;
use crate::passes::select_passes;
use crate::plugin::{LogicalPlugin, ReplacementTable};
use crate::settings::ProjectSettings;
use crate::validation::{ConfigValidator, SchemaValidator};

/// Documents read from disk before composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    pub library: Manifest,
    pub tool: Manifest,
    pub compiler: CompilerConfig,
}

impl Inputs {
    /// Read both manifests and the inherited compiler config. Any malformed
    /// document aborts the load.
    pub fn load(settings: &ProjectSettings, root: &Path) -> Result<Self> {
        Ok(Self {
            library: Manifest::load(root.join(&settings.library_manifest))?,
            tool: Manifest::load(root.join(&settings.tool_manifest))?,
            compiler: CompilerConfig::load(root.join(&settings.compiler_config))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub config: BuildConfig,
    /// Replacement-table entries that matched nothing
    pub unmatched: Vec<LogicalPlugin>,
}

/// Settings resolved against a project root, ready to compose.
#[derive(Debug, Clone)]
pub struct Composer {
    assembler: Assembler,
    table: ReplacementTable,
    deep_imports: Vec<String>,
    exclude: Vec<String>,
    new_files: Vec<PathBuf>,
    mapping: RewritePattern,
    debug: bool,
}

impl Composer {
    pub fn new(settings: &ProjectSettings, root: &Path) -> Result<Self> {
        SchemaValidator.validate(settings)?;

        let table = ReplacementTable::from_paths(&settings.replacements, root)?;
        let mapping = RewritePattern::under_root(
            root,
            &settings.dedup.mapping.source,
            &settings.dedup.mapping.target,
        )?;

        Ok(Self {
            assembler: Assembler::new(&settings.entry)
                .output(settings.output.clone())
                .commonjs_include(settings.commonjs_include.clone()),
            table,
            deep_imports: settings.deep_imports.clone(),
            exclude: settings.dedup.exclude.clone(),
            new_files: settings
                .dedup
                .new_files
                .iter()
                .map(|file| root.join(file))
                .collect(),
            mapping,
            debug: settings.debug,
        })
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn compose(&self, inputs: &Inputs) -> Composition {
        let external = ExternalSet::build(
            &inputs.library,
            &inputs.tool,
            self.deep_imports.as_slice(),
        );

        let rewrite = self.table.rewrite(&inputs.compiler.plugins);

        let dedup = DedupRule::new(
            self.exclude.clone(),
            self.new_files.clone(),
            external.clone(),
            self.mapping.clone(),
        );
        let dedup = self.table.rewrite_entry(&dedup.to_entry());

        let mut unmatched = rewrite.unmatched;
        if dedup.is_resolved() {
            unmatched.retain(|logical| *logical != LogicalPlugin::ImportDuplicate);
        }
        for logical in &unmatched {
            tracing::debug!("Replacement for '{}' matched no plugin entry", logical);
        }

        let compiler = inputs.compiler.clone().with_plugins(rewrite.plugins);
        let passes = select_passes(self.debug);
        let config = self.assembler.assemble(compiler, dedup, passes, external);

        Composition { config, unmatched }
    }
}

/// Load inputs for `root` and compose them with `settings`.
pub fn compose(settings: &ProjectSettings, root: &Path) -> Result<Composition> {
    let composer = Composer::new(settings, root)?;
    let inputs = Inputs::load(settings, root)?;
    Ok(composer.compose(&inputs))
}

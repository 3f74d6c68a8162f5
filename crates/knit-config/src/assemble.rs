//! Final build configuration handed to the bundler.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compiler::CompilerConfig;
use crate::external::ExternalSet;
use crate::passes::{CommonJsOptions, NodeResolveOptions, Pass};
use crate::plugin::PluginEntry;

/// Output module shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-file CommonJS module
    #[default]
    Cjs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub file: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from("dist/bundle.js"),
            format: OutputFormat::Cjs,
        }
    }
}

/// The composed configuration: `{ input, plugins, output, external }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub plugins: Vec<Pass>,
    pub output: OutputOptions,
    pub external: ExternalSet,
}

impl BuildConfig {
    /// The compiler pass, if present.
    pub fn compiler(&self) -> Option<&CompilerConfig> {
        self.plugins.iter().find_map(|pass| match pass {
            Pass::Babel(config) => Some(config),
            _ => None,
        })
    }
}

/// Fixed parts of the pipeline that do not depend on the inputs.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    entry: PathBuf,
    output: OutputOptions,
    commonjs_include: Vec<String>,
}

impl Assembler {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            ..Self::default()
        }
    }

    pub fn output(mut self, output: OutputOptions) -> Self {
        self.output = output;
        self
    }

    pub fn commonjs_include(mut self, include: Vec<String>) -> Self {
        self.commonjs_include = include;
        self
    }

    /// Compose the pipeline: reporting → resolution → interop shim →
    /// compiler (dedup first, helpers last) → mode passes.
    ///
    /// `compiler` must already have its logical plugins replaced.
    pub fn assemble(
        &self,
        compiler: CompilerConfig,
        dedup: PluginEntry,
        mode_passes: Vec<Pass>,
        external: ExternalSet,
    ) -> BuildConfig {
        let compiler = compiler.with_dedup(dedup).with_helpers().authoritative();

        let mut plugins = vec![
            Pass::Filesize,
            Pass::Progress,
            Pass::NodeResolve(NodeResolveOptions::default()),
            Pass::Commonjs(CommonJsOptions {
                include: self.commonjs_include.clone(),
            }),
            Pass::Babel(compiler),
        ];
        plugins.extend(mode_passes);

        tracing::info!(
            "Assembled {} passes, {} externals",
            plugins.len(),
            external.len()
        );

        BuildConfig {
            input: self.entry.clone(),
            plugins,
            output: self.output.clone(),
            external,
        }
    }
}

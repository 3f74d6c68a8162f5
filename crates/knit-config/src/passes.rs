//! Bundler plugin invocations and the production-only passes.

use serde::{Deserialize, Serialize};

use crate::compiler::CompilerConfig;

/// One bundler plugin call in the final pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options", rename_all = "kebab-case")]
pub enum Pass {
    /// Bundle size report
    Filesize,
    /// Build progress report
    Progress,
    NodeResolve(NodeResolveOptions),
    /// Interop shim for CommonJS-shaped dependencies
    Commonjs(CommonJsOptions),
    Babel(CompilerConfig),
    /// Dead-code stripping (debug statements, assertions)
    Strip,
    Cleanup(CleanupOptions),
    Uglify,
}

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Filesize => "filesize",
            Self::Progress => "progress",
            Self::NodeResolve(_) => "node-resolve",
            Self::Commonjs(_) => "commonjs",
            Self::Babel(_) => "babel",
            Self::Strip => "strip",
            Self::Cleanup(_) => "cleanup",
            Self::Uglify => "uglify",
        }
    }

    pub fn is_production_only(&self) -> bool {
        matches!(self, Self::Strip | Self::Cleanup(_) | Self::Uglify)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeResolveOptions {
    /// Prefer the `jsnext:main` field
    pub jsnext: bool,
    /// Prefer the `module` field
    pub module: bool,
}

impl Default for NodeResolveOptions {
    fn default() -> Self {
        Self {
            jsnext: true,
            module: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonJsOptions {
    /// Dependency trees (globs) converted by the shim
    pub include: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPolicy {
    /// Remove every comment
    #[default]
    None,
    /// Keep license headers only
    License,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupOptions {
    pub max_empty_lines: u32,
    pub comments: CommentPolicy,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            max_empty_lines: 1,
            comments: CommentPolicy::None,
        }
    }
}

/// Production-only passes, or none in debug mode.
///
/// Stripping runs before cleanup, and cleanup before minification.
pub fn select_passes(debug: bool) -> Vec<Pass> {
    if debug {
        tracing::debug!("Debug mode: skipping production passes");
        return Vec::new();
    }

    vec![
        Pass::Strip,
        Pass::Cleanup(CleanupOptions::default()),
        Pass::Uglify,
    ]
}

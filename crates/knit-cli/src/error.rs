//! Error handling for the knit CLI.
//!
//! `CliError` wraps library errors and the CLI's own failures. `main`
//! converts it to a miette report through [`cli_error_to_miette`].
//!
//! # Example
//!
//! ```rust,no_run
//! use knit_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_output(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings, manifests, compiler config, or composition failures
    #[error(transparent)]
    Config(#[from] knit_config::ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Replacement-table entries that matched no plugin, under `--strict`
    #[error("Replacement table entries matched no plugin: {}", .keys.join(", "))]
    Drift { keys: Vec<String> },
}

impl CliError {
    /// Actionable hint, if there is one.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(e) => e.hint().map(str::to_string),
            Self::FileNotFound(_) => Some("Check --root and the paths in knit.toml".to_string()),
            Self::InvalidArgument(_) => Some("See 'knit help' for the expected values".to_string()),
            Self::Drift { .. } => Some(
                "Update the replacement table or the compiler config so every entry is used"
                    .to_string(),
            ),
            _ => None,
        }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

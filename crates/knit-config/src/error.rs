//! Error types for manifest loading, settings extraction, and composition.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Input document errors
    #[error("malformed manifest {}: {message}", .path.display())]
    MalformedManifest { path: PathBuf, message: String },

    #[error("malformed compiler config {}: {message}", .path.display())]
    MalformedCompilerConfig { path: PathBuf, message: String },

    // Replacement table errors
    #[error("unknown logical plugin '{name}' in replacement table")]
    UnknownLogicalPlugin { name: String },

    #[error("invalid rewrite pattern '{pattern}': {message}")]
    InvalidRewritePattern { pattern: String, message: String },

    // Settings errors
    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Actionable hint for the user, when one exists.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::MalformedManifest { .. } => {
                Some("The manifest must be a JSON object whose 'dependencies' field maps names to version strings")
            }
            Self::UnknownLogicalPlugin { .. } => Some(
                "Known logical plugins are './resources/inline-invariant' and 'transform-import-duplicate'",
            ),
            Self::SchemaValidation { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_manifest_names_the_file() {
        let err = ConfigError::MalformedManifest {
            path: PathBuf::from("graphql/package.json"),
            message: "expected value at line 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("graphql/package.json"));
        assert!(msg.contains("expected value"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn schema_validation_carries_its_own_hint() {
        let err = ConfigError::SchemaValidation {
            message: "entry cannot be empty".to_string(),
            hint: Some("Set 'entry' in knit.toml".to_string()),
        };
        assert_eq!(err.hint(), Some("Set 'entry' in knit.toml"));
    }
}

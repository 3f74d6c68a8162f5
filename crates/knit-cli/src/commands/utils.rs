//! Project resolution shared by the commands.

use std::path::{Path, PathBuf};

use figment::Figment;
use knit_config::ProjectSettings;

use crate::cli::ProjectArgs;
use crate::error::{Result, ResultExt};

/// Absolute project root: `--root` if given, else the working directory.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = root.unwrap_or(Path::new("."));
    let resolved = std::fs::canonicalize(root).with_path(root)?;
    tracing::debug!("Project root: {}", resolved.display());
    Ok(resolved)
}

/// Root plus the settings figment, before any command-specific overrides.
pub fn project_figment(project: &ProjectArgs) -> Result<(PathBuf, Figment)> {
    let root = resolve_root(project.root.as_deref())?;
    let figment = ProjectSettings::figment(&root, project.config.as_deref())?;
    Ok((root, figment))
}

/// Root plus extracted settings with no overrides.
pub fn load_project(project: &ProjectArgs) -> Result<(PathBuf, ProjectSettings)> {
    let (root, figment) = project_figment(project)?;
    Ok((root, ProjectSettings::extract(&figment)?))
}

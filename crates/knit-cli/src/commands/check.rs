//! Check command implementation.
//!
//! Validates settings and inputs without writing anything.

use knit_config::{Composer, ConfigValidator, FsValidator, Inputs};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load settings and validate them against the project tree
/// 2. Parse both manifests and the inherited compiler config
/// 3. Compose, then report replacement entries that matched nothing
///
/// Drift is a warning unless `--strict` is given.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking settings...");
    let (root, settings) = utils::load_project(&args.project)?;
    FsValidator::new(&root).validate(&settings)?;
    ui::success("Settings are valid");

    ui::info("Reading manifests and compiler config...");
    let composer = Composer::new(&settings, &root)?;
    let inputs = Inputs::load(&settings, &root)?;
    ui::success(&format!(
        "{} library and {} tool dependencies, {} compiler plugins",
        inputs.library.dependencies.len(),
        inputs.tool.dependencies.len(),
        inputs.compiler.plugins.len()
    ));

    let composition = composer.compose(&inputs);
    ui::success(&format!(
        "Composed {} passes with {} externals",
        composition.config.plugins.len(),
        composition.config.external.len()
    ));

    if composition.unmatched.is_empty() {
        ui::success("Every replacement table entry is in use");
        return Ok(());
    }

    let keys: Vec<String> = composition
        .unmatched
        .iter()
        .map(|logical| logical.key().to_string())
        .collect();

    if args.strict {
        return Err(CliError::Drift { keys });
    }

    for key in &keys {
        ui::warning(&format!("Replacement for '{key}' matched no compiler plugin"));
    }
    Ok(())
}

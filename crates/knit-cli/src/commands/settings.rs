//! Settings command implementation.

use crate::cli::SettingsArgs;
use crate::commands::utils;
use crate::error::Result;

/// Print the effective settings (defaults, settings file and environment
/// merged) as TOML.
pub fn execute(args: SettingsArgs) -> Result<()> {
    let (_, settings) = utils::load_project(&args.project)?;
    print!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}

//! Externals command implementation.

use knit_config::{ExternalSet, Manifest, validate_schema};

use crate::cli::ExternalsArgs;
use crate::commands::utils;
use crate::error::Result;

/// Print the external set, one specifier per line, in bundler order.
///
/// Reads only the two manifests; the compiler config is not needed.
pub fn execute(args: ExternalsArgs) -> Result<()> {
    let (root, settings) = utils::load_project(&args.project)?;
    validate_schema(&settings)?;

    let library = Manifest::load(root.join(&settings.library_manifest))?;
    let tool = Manifest::load(root.join(&settings.tool_manifest))?;
    let external = ExternalSet::build(&library, &tool, settings.deep_imports.as_slice());

    for specifier in &external {
        println!("{specifier}");
    }

    Ok(())
}

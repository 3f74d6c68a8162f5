//! Command-line interface definition for knit.
//!
//! # Command Structure
//!
//! - `knit compose` - Write the composed bundler configuration as JSON
//! - `knit externals` - List the specifiers left out of the bundle
//! - `knit check` - Validate settings and inputs, report replacement drift
//! - `knit settings` - Print the effective project settings

mod commands;

use clap::Parser;

pub use commands::{CheckArgs, Command, ComposeArgs, ExternalsArgs, ProjectArgs, SettingsArgs};

/// knit - compose a bundler configuration for a library build
#[derive(Parser, Debug)]
#[command(
    name = "knit",
    version,
    about = "Compose a bundler configuration for a library build",
    long_about = "knit reads the library's and the bundling package's manifests plus the\n\
                  library's compiler config, and composes one fully-resolved bundler\n\
                  configuration: externals, rewritten compiler plugins, import\n\
                  deduplication, and the build-mode pass pipeline."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows per-entry plugin rewrites and external set sizes.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

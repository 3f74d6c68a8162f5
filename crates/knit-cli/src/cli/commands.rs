use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available knit subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the bundler configuration
    ///
    /// Loads settings, both manifests and the inherited compiler config, and
    /// writes the composed configuration as JSON.
    Compose(ComposeArgs),

    /// Print the external set, one specifier per line
    Externals(ExternalsArgs),

    /// Validate settings and inputs without writing anything
    ///
    /// Checks that every input file exists, that the inherited compiler
    /// config parses, and reports replacement-table entries that matched no
    /// plugin.
    Check(CheckArgs),

    /// Print the effective project settings as TOML
    Settings(SettingsArgs),
}

/// Where the project lives and which settings file to read.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root (default: current directory)
    ///
    /// Settings paths are resolved against this directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Settings file, relative to the root
    ///
    /// Defaults to knit.toml, then the "knit" field of package.json.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the compose command
#[derive(Args, Debug)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Debug build: skip strip, cleanup and uglify
    #[arg(long)]
    pub debug: bool,

    /// Write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the externals command
#[derive(Args, Debug)]
pub struct ExternalsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Treat unmatched replacement-table entries as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

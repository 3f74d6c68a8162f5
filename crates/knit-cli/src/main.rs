//! knit CLI entry point: argument parsing, logging setup, command dispatch.

use clap::Parser;
use knit_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Compose(compose_args) => commands::compose_execute(compose_args),
        cli::Command::Externals(externals_args) => commands::externals_execute(externals_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Settings(settings_args) => commands::settings_execute(settings_args),
    };

    // Failures are reported once, through miette
    result.map_err(error::cli_error_to_miette)
}

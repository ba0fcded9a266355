//! docsite CLI - module info for design-system documentation sites.
//!
//! Parses arguments, sets up logging and colors, then dispatches to the
//! selected command.

use clap::Parser;
use docsite_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    let result = match args.command {
        cli::Command::Info(info_args) => commands::info_execute(&args.site, info_args),
        cli::Command::Inject(inject_args) => commands::inject_execute(&args.site, inject_args),
        cli::Command::Alias => commands::alias_execute(&args.site),
    };

    result.map_err(error::cli_error_to_miette)
}

//! shopcheck - storefront checks from the command line.
//!
//! Parses arguments, sets up logging and colors, then dispatches to the
//! selected command.

use clap::Parser;
use miette::Result;
use shopcheck_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config_path = args.config.as_deref();
    let result = match args.command {
        cli::Command::Smoke(smoke_args) => commands::smoke_execute(smoke_args, config_path).await,
        cli::Command::Links(links_args) => commands::links_execute(links_args, config_path).await,
        cli::Command::Inspect(inspect_args) => {
            commands::inspect_execute(inspect_args, config_path).await
        }
    };

    result.map_err(error::cli_error_to_miette)
}

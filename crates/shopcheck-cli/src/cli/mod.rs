//! Command-line interface definition for shopcheck.
//!
//! - `shopcheck smoke` - open the home page and check title and logo
//! - `shopcheck links` - check every main-menu link over HTTP
//! - `shopcheck inspect` - open a visible, cleaned-up browser and wait

mod commands;
mod tests;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{Command, InspectArgs, LinksArgs, SmokeArgs};

/// shopcheck - end-to-end checks for the iDream storefront
#[derive(Parser, Debug)]
#[command(
    name = "shopcheck",
    version,
    about = "End-to-end checks for the iDream storefront",
    long_about = "shopcheck drives a real Chrome through the iDream storefront.\n\
                  It clears the cookie banner and marketing popups, then checks the\n\
                  home page, the main-menu links, or leaves the browser open for you."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a shopcheck.toml file
    ///
    /// Defaults to ./shopcheck.toml when it exists. SHOPCHECK_* environment
    /// variables override values from the file.
    #[arg(short, long, global = true, value_name = "PATH", env = "SHOPCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

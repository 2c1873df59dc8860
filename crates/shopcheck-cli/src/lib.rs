//! shopcheck CLI - smoke checks, link health and manual inspection for the
//! iDream storefront.
//!
//! The heavy lifting lives in `shopcheck-pages`; this crate turns it into
//! commands with readable terminal output.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - `smoke`, `links` and `inspect`
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - tracing setup driven by `--verbose`/`--quiet`/`RUST_LOG`
//! - [`ui`] - colored status lines

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};

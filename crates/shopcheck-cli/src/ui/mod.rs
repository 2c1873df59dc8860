//! Terminal output for command results.
//!
//! Logs go through `tracing`; these helpers print the short, colored status
//! lines a person running `shopcheck` actually reads.
//!
//! ```no_run
//! use shopcheck_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Home page title matches");
//! ui::error("Logo is not visible");
//! ```

mod format;
mod messages;

pub use format::{format_duration, print_link_summary};
pub use messages::{error, info, success, warning};

use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var_os("CI").is_some() || std::env::var_os("GITHUB_ACTIONS").is_some()
}

/// Turns colors on or off for everything printed through this module.
///
/// `--no-color` and `NO_COLOR` disable colors; otherwise the terminal
/// decides.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

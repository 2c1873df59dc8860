//! Logging setup for the shopcheck CLI.
//!
//! Page objects log every step through `tracing`. The CLI decides how much
//! of that reaches the terminal:
//!
//! 1. `--verbose`: debug for the shopcheck crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`, when set
//! 4. otherwise info for the shopcheck crates
//!
//! ```rust,no_run
//! use shopcheck_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Opening the storefront");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "shopcheck_cli=debug,shopcheck_pages=debug,shopcheck_browser=debug";
const QUIET_FILTER: &str = "shopcheck_cli=error,shopcheck_pages=error,shopcheck_browser=error";
const DEFAULT_FILTER: &str = "shopcheck_cli=info,shopcheck_pages=info,shopcheck_browser=info";

/// Picks the log filter for the given flags.
///
/// `verbose` wins over `quiet`; `RUST_LOG` is only consulted when neither
/// flag is set.
#[must_use]
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the global tracing subscriber. Call once, before logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Installs the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Whether stderr should get ANSI colors.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, and otherwise
/// the terminal decides.
#[must_use]
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

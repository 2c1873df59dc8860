//! Miette rendering for CLI errors.

use super::CliError;
use miette::Report;
use shopcheck_browser::BrowserError;
use shopcheck_pages::SuiteError;

/// Converts a CLI error into a miette report, adding a hint where the
/// underlying error has none.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Suite(SuiteError::Browser(e @ BrowserError::LaunchFailed { .. })) => {
            miette::miette!(
                "{}\n\nHint: Install Chrome or Chromium, or set SHOPCHECK_CHROME_PATH",
                e
            )
        }
        CliError::Suite(SuiteError::Browser(e)) if e.is_timeout() => miette::miette!(
            "{}\n\nHint: The storefront may be slow or its layout changed; rerun with --verbose",
            e
        ),
        CliError::Suite(SuiteError::Config(e)) => miette::miette!("Configuration error: {}", e),
        CliError::ChecksFailed { failed, total } => miette::miette!(
            "{} of {} checks failed\n\nHint: Failure screenshots are saved in the artifacts directory",
            failed,
            total
        ),
        other => miette::miette!("{}", other),
    }
}

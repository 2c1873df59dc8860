//! Error handling for the shopcheck CLI.
//!
//! Commands return [`CliError`]. Library failures arrive as
//! [`SuiteError`](shopcheck_pages::SuiteError) and keep their hints; `main`
//! renders everything through miette.

mod miette;

use shopcheck_browser::BrowserError;
use shopcheck_pages::{ConfigError, SuiteError};
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A page object, the browser or the configuration failed.
    #[error(transparent)]
    Suite(#[from] SuiteError),

    /// Some storefront checks did not pass.
    #[error("{failed} of {total} checks failed")]
    ChecksFailed {
        /// Number of failed checks
        failed: usize,
        /// Number of checks run
        total: usize,
    },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<BrowserError> for CliError {
    fn from(err: BrowserError) -> Self {
        CliError::Suite(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Suite(err.into())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_keep_their_hint() {
        let err: CliError = ConfigError::MissingField {
            field: "credentials".to_string(),
            hint: "Set SHOPCHECK_CREDENTIALS__EMAIL".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Suite(SuiteError::Config(_))));
        assert!(err.to_string().contains("Hint: Set SHOPCHECK_CREDENTIALS__EMAIL"));
    }

    #[test]
    fn browser_errors_are_wrapped_transparently() {
        let err: CliError = BrowserError::AlreadyClosed.into();
        assert_eq!(err.to_string(), BrowserError::AlreadyClosed.to_string());
    }

    #[test]
    fn checks_failed_message() {
        let err = CliError::ChecksFailed {
            failed: 2,
            total: 40,
        };
        assert_eq!(err.to_string(), "2 of 40 checks failed");
    }
}

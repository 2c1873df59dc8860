//! Error types for the storefront suite.
//!
//! [`SuiteError`] is what page objects, the link checker and the fixtures
//! return. Driver failures arrive wrapped from `shopcheck-browser`;
//! configuration problems carry a hint telling the user what to change.

use shopcheck_browser::BrowserError;
use thiserror::Error;

/// Top-level error for page objects and suite helpers.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The browser driver failed (timeouts, navigation, intercepted clicks).
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The suite configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Building the HTTP client for link checks failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// File system errors (artifacts directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A page-level expectation about the storefront did not hold.
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A social network name that has no button on the storefront.
    #[error("Unknown social network '{0}'\n\nHint: expected one of instagram, facebook, tiktok, youtube")]
    UnknownSocialNetwork(String),
}

impl SuiteError {
    /// Returns true if the underlying failure was a timeout or a failed
    /// retrying assertion.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, SuiteError::Browser(e) if e.is_timeout())
    }
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("Failed to load configuration: {0}\n\nHint: Check shopcheck.toml and SHOPCHECK_* environment variables")]
    Load(#[from] Box<figment::Error>),

    /// A value is present but unusable.
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// A value required by the requested operation is missing.
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}

/// Result type alias using `SuiteError` as the default error type.
pub type Result<T, E = SuiteError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn invalid_value_includes_hint() {
        let err = ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: "idream.pl".to_string(),
            hint: "URLs must start with http:// or https://".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'base_url'"));
        assert!(msg.contains("Hint: URLs must start"));
    }

    #[test]
    fn missing_field_includes_hint() {
        let err = ConfigError::MissingField {
            field: "credentials".to_string(),
            hint: "Set SHOPCHECK_CREDENTIALS__EMAIL and SHOPCHECK_CREDENTIALS__PASSWORD".to_string(),
        };
        assert!(err.to_string().contains("Missing required field: credentials"));
    }

    #[test]
    fn browser_timeouts_are_classified() {
        let err: SuiteError = BrowserError::WaitTimeout {
            condition: "popup window".into(),
            timeout: Duration::from_secs(1),
        }
        .into();
        assert!(err.is_timeout());

        let other: SuiteError = BrowserError::AlreadyClosed.into();
        assert!(!other.is_timeout());
    }

    #[test]
    fn unknown_social_network_message() {
        let err = SuiteError::UnknownSocialNetwork("myspace".into());
        assert!(err.to_string().contains("'myspace'"));
        assert!(err.to_string().contains("Hint:"));
    }
}

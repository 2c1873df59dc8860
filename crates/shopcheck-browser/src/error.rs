//! What can go wrong while driving Chrome against the storefront.
//!
//! Most failures on a live shop are timeouts: a banner that never shows, an
//! element that never becomes visible. [`BrowserError::is_timeout`] lets page
//! objects treat those as "not there" while still surfacing real driver
//! faults.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    /// Chrome could not be started. Usually a missing binary or a sandbox
    /// problem.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// A polled condition was still false at the deadline.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout { condition: String, timeout: Duration },

    /// An `expect(..)` assertion was retried until its deadline and never held.
    #[error("assertion '{assertion}' did not hold within {timeout:?}")]
    AssertionFailed { assertion: String, timeout: Duration },

    #[error("no element matches {selector}")]
    ElementNotFound { selector: String },

    /// The element under the click point was not the target, e.g. a
    /// marketing overlay.
    #[error("click on {target} failed: {interceptor} intercepts pointer events")]
    ClickIntercepted { target: String, interceptor: String },

    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    #[error("browser instance is already closed")]
    AlreadyClosed,

    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Writing screenshots, waiting for Ctrl+C.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Something did not happen in time, as opposed to the driver breaking.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            BrowserError::WaitTimeout { .. } | BrowserError::AssertionFailed { .. }
        )
    }

    #[must_use]
    pub fn is_click_intercepted(&self) -> bool {
        matches!(self, BrowserError::ClickIntercepted { .. })
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_classification() {
        let wait = BrowserError::WaitTimeout {
            condition: "selector '#x'".into(),
            timeout: Duration::from_secs(1),
        };
        let assertion = BrowserError::AssertionFailed {
            assertion: "css(#x) to be visible".into(),
            timeout: Duration::from_secs(1),
        };
        assert!(wait.is_timeout());
        assert!(assertion.is_timeout());
        assert!(!BrowserError::AlreadyClosed.is_timeout());
    }

    #[test]
    fn click_intercepted_message_names_interceptor() {
        let err = BrowserError::ClickIntercepted {
            target: "css(button.buy)".into(),
            interceptor: "<div id=\"bhr-items\">".into(),
        };
        assert!(err.is_click_intercepted());
        assert!(err.to_string().contains("intercepts pointer events"));
        assert!(err.to_string().contains("bhr-items"));
    }
}

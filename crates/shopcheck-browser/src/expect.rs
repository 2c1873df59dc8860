//! Retrying assertions over locators and pages.
//!
//! Each assertion polls until it holds and fails with
//! [`BrowserError::AssertionFailed`] when its timeout runs out. Driver errors
//! during polling are treated as "does not hold yet".

use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use crate::page::Page;
use crate::wait::{wait_for_result, WaitConfig};
use std::future::Future;
use std::time::Duration;

/// Starts an assertion on `locator`.
#[must_use]
pub fn expect(locator: &Locator) -> LocatorAssertions<'_> {
    LocatorAssertions { locator }
}

/// Starts an assertion on `page`.
#[must_use]
pub fn expect_page(page: &Page) -> PageAssertions<'_> {
    PageAssertions { page }
}

async fn poll<F, Fut>(assertion: String, timeout: Duration, condition: F) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    wait_for_result(condition, WaitConfig::with_timeout(timeout), &assertion)
        .await
        .map_err(|_| BrowserError::AssertionFailed { assertion, timeout })
}

/// Collapses runs of whitespace and trims, the way rendered text compares.
pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assertions about the first element a locator matches.
#[derive(Debug, Clone, Copy)]
pub struct LocatorAssertions<'a> {
    locator: &'a Locator,
}

impl LocatorAssertions<'_> {
    /// Asserts the element becomes visible.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if it is not visible within `timeout`.
    pub async fn to_be_visible(&self, timeout: Duration) -> Result<()> {
        poll(format!("{} to be visible", self.locator), timeout, || {
            self.locator.is_visible()
        })
        .await
    }

    /// Asserts the element becomes hidden or detached.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if it is still visible after `timeout`.
    pub async fn not_to_be_visible(&self, timeout: Duration) -> Result<()> {
        poll(format!("{} not to be visible", self.locator), timeout, || async {
            Ok(!self.locator.is_visible().await?)
        })
        .await
    }

    /// Asserts the element exists and is not disabled.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if it is not enabled within `timeout`.
    pub async fn to_be_enabled(&self, timeout: Duration) -> Result<()> {
        poll(format!("{} to be enabled", self.locator), timeout, || {
            self.locator.is_enabled()
        })
        .await
    }

    async fn current_text(&self) -> Result<Option<String>> {
        if self.locator.count().await? == 0 {
            return Ok(None);
        }
        let text = self.locator.text_content().await?;
        Ok(text.map(|t| normalize_text(&t)))
    }

    /// Asserts the element's whitespace-normalized text equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if the text does not match within `timeout`.
    pub async fn to_have_text(&self, expected: &str, timeout: Duration) -> Result<()> {
        let expected = normalize_text(expected);
        poll(
            format!("{} to have text {expected:?}", self.locator),
            timeout,
            || async { Ok(self.current_text().await?.as_deref() == Some(expected.as_str())) },
        )
        .await
    }

    /// Asserts the element exists and its normalized text differs from `unexpected`.
    ///
    /// `not_to_have_text("")` is the idiom for "has some text".
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if the text still matches after `timeout`.
    pub async fn not_to_have_text(&self, unexpected: &str, timeout: Duration) -> Result<()> {
        let unexpected = normalize_text(unexpected);
        poll(
            format!("{} not to have text {unexpected:?}", self.locator),
            timeout,
            || async {
                Ok(matches!(
                    self.current_text().await?,
                    Some(text) if text != unexpected
                ))
            },
        )
        .await
    }
}

/// Assertions about a page as a whole.
#[derive(Debug, Clone, Copy)]
pub struct PageAssertions<'a> {
    page: &'a Page,
}

impl PageAssertions<'_> {
    /// Asserts the document title equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if the title does not match within `timeout`.
    pub async fn to_have_title(&self, expected: &str, timeout: Duration) -> Result<()> {
        poll(format!("page to have title {expected:?}"), timeout, || async {
            Ok(self.page.title().await? == expected)
        })
        .await
    }

    /// Asserts the URL starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` if the URL does not match within `timeout`.
    pub async fn to_have_url_prefix(&self, prefix: &str, timeout: Duration) -> Result<()> {
        poll(format!("page URL to start with {prefix:?}"), timeout, || async {
            Ok(self.page.url().await?.starts_with(prefix))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Skrócony\n\t opis  "), "Skrócony opis");
        assert_eq!(normalize_text("   "), "");
    }

    #[tokio::test]
    async fn poll_maps_timeout_to_assertion_failure() {
        let result = poll(
            "css(\".ty-price-num\") to be visible".to_string(),
            Duration::from_millis(30),
            || async { Ok(false) },
        )
        .await;

        match result {
            Err(BrowserError::AssertionFailed { assertion, timeout }) => {
                assert!(assertion.contains("ty-price-num"));
                assert_eq!(timeout, Duration::from_millis(30));
            }
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_succeeds_when_condition_holds() {
        let result = poll("always".to_string(), Duration::from_millis(30), || async {
            Ok(true)
        })
        .await;
        assert!(result.is_ok());
    }
}

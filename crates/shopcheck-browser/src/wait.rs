//! Polling waits.
//!
//! Consent banners, marketing popups, hover submenus and popup windows all
//! show up on the storefront some time after the page says it has loaded.
//! Every such wait goes through [`wait_for_value`] or one of its two thin
//! wrappers: poll, sleep for the interval, give up once the deadline passes.
//! A condition is always polled at least once.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::trace;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Deadline and poll interval of a single wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// `timeout` with the default 100 ms interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }

    /// Page objects state their timeouts in milliseconds.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::with_timeout(Duration::from_millis(ms))
    }

    /// The same wait, cut short to whatever is left before `deadline`.
    ///
    /// Multi-stage waits share one deadline this way instead of spending
    /// the full timeout on every stage.
    #[must_use]
    pub fn until(self, deadline: Instant) -> Self {
        Self {
            timeout: deadline.saturating_duration_since(Instant::now()),
            ..self
        }
    }

    fn timed_out(&self, description: &str) -> BrowserError {
        BrowserError::WaitTimeout {
            condition: description.to_string(),
            timeout: self.timeout,
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

/// Polls an infallible check until it returns `true`.
///
/// # Errors
///
/// `WaitTimeout` carrying `description` once the deadline passes.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    wait_for_value(
        || {
            let check = condition();
            async move { Ok(check.await.then_some(())) }
        },
        config,
        description,
    )
    .await
}

/// Polls a fallible check until it returns `Ok(true)`.
///
/// An `Err` is a miss, not a failure: scripts fail now and then while a
/// navigation is in flight or a node is being replaced.
///
/// # Errors
///
/// `WaitTimeout` carrying `description` once the deadline passes.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    wait_for_value(
        || {
            let check = condition();
            async move { check.await.map(|ok| ok.then_some(())) }
        },
        config,
        description,
    )
    .await
}

/// Polls `producer` until it yields `Some`, returning the value.
///
/// # Errors
///
/// `WaitTimeout` carrying `description` once the deadline passes.
pub async fn wait_for_value<T, F, Fut>(
    producer: F,
    config: WaitConfig,
    description: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Instant::now() + config.timeout;

    loop {
        match producer().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => trace!("{description}: not yet ({e})"),
        }

        if Instant::now() >= deadline {
            return Err(config.timed_out(description));
        }
        sleep(config.poll_interval).await;
    }
}

//! Starting and stopping Chrome.
//!
//! [`Chrome`] owns the process and the task that pumps CDP events. Every
//! [`Page`] it opens shares the same handle, which is how a page finds the
//! windows its links pop open.

use crate::error::{BrowserError, Result};
use crate::page::{BrowserHandle, Page};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Flags every launch gets. Chrome in a container has neither user
/// namespaces nor a large `/dev/shm`.
const BASE_ARGS: [&str; 2] = ["--no-sandbox", "--disable-dev-shm-usage"];

/// How Chrome should be started.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Hide the window. On by default.
    pub headless: bool,
    /// Initial window size, width then height.
    pub window_size: (u32, u32),
    /// Flags appended after the built-in ones.
    pub args: Vec<String>,
    /// Explicit Chrome binary; `None` lets chromiumoxide look for one.
    pub chrome_path: Option<String>,
    /// Upper bound for a single CDP round trip.
    pub request_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: BASE_ARGS.iter().map(ToString::to_string).collect(),
            chrome_path: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl LaunchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the browser window, for watching a run or using `inspect`.
    #[must_use]
    pub fn visible(self) -> Self {
        Self {
            headless: false,
            ..self
        }
    }

    #[must_use]
    pub fn with_window_size(self, width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..self
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    #[must_use]
    pub fn with_chrome_path(self, path: impl Into<String>) -> Self {
        Self {
            chrome_path: Some(path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_request_timeout(self, request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            ..self
        }
    }

    /// A throwaway profile directory, so cookie consent never carries over
    /// and parallel test binaries do not fight over one profile lock.
    fn profile_dir() -> PathBuf {
        std::env::temp_dir().join(format!("shopcheck-{}", uuid::Uuid::new_v4()))
    }

    #[allow(clippy::result_large_err)]
    fn build(&self) -> Result<BrowserConfig> {
        let (width, height) = self.window_size;
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.request_timeout)
            .arg(format!("--window-size={width},{height}"))
            .arg(format!("--user-data-dir={}", Self::profile_dir().display()))
            .args(self.args.iter().cloned());

        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(|reason| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {reason}"),
            source: None,
        })
    }
}

/// A running Chrome instance.
///
/// ```ignore
/// let chrome = Chrome::launch(LaunchOptions::default()).await?;
/// let page = chrome.new_page().await?;
/// page.navigate("https://idream.pl/").await?;
/// chrome.close().await?;
/// ```
///
/// Dropping it without `close()` leaves the shutdown to chromiumoxide and
/// logs a warning.
pub struct Chrome {
    handle: BrowserHandle,
}

impl Chrome {
    /// Starts Chrome and the background task that drives its event stream.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if the options are invalid or no usable Chrome
    /// binary could be started.
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        debug!("Launching Chrome with {:?}", options);
        let config = options.build()?;

        let (browser, mut events) =
            Browser::launch(config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    warn!("CDP event loop error: {}", e);
                }
            }
            debug!("CDP event loop finished");
        });

        info!(
            "Chrome started ({}, {}x{})",
            if options.headless { "headless" } else { "headed" },
            options.window_size.0,
            options.window_size.1
        );

        Ok(Self {
            handle: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Opens a blank tab with its own dialog capture.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` after [`Chrome::close`], or `ConnectionFailed`
    /// if Chrome refuses the new target.
    pub async fn new_page(&self) -> Result<Page> {
        let guard = self.handle.lock().await;
        let browser = guard.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let tab = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Page::new(tab, Arc::clone(&self.handle)).await
    }

    /// Shuts Chrome down. Calling it on an already closed instance is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailed` if Chrome does not acknowledge the close.
    pub async fn close(self) -> Result<()> {
        let Some(mut browser) = self.handle.lock().await.take() else {
            return Ok(());
        };
        debug!("Closing Chrome");
        browser
            .close()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    pub async fn is_closed(&self) -> bool {
        self.handle.lock().await.is_none()
    }
}

impl Drop for Chrome {
    fn drop(&mut self) {
        let still_open = self
            .handle
            .try_lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        if still_open {
            warn!("Chrome dropped without close(); leaving shutdown to chromiumoxide");
        }
    }
}

//! Page-level browser operations and navigation.
//!
//! [`Page`] represents one browser tab. Besides navigation and scripting it
//! is the factory for [`Locator`]s, owns the JavaScript dialog capture, and
//! knows how to catch popup windows opened by its links.

use crate::dialog::{DialogCapture, DialogMessage};
use crate::error::{BrowserError, Result};
use crate::locator::{FrameLocator, Locator, Query, Step};
use crate::network::NetworkTracker;
use crate::wait::{wait_for_result, wait_for_value, WaitConfig};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::cdp::browser_protocol::target::CloseTargetParams;
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How long nothing may be in flight before the network counts as idle.
const NETWORK_IDLE_WINDOW: Duration = Duration::from_millis(500);

/// Window property set on a document that is about to be navigated away.
const NAVIGATION_MARKER: &str = "__shopcheckNavigationPending";

/// Shared handle to the browser a page belongs to.
pub(crate) type BrowserHandle = Arc<Mutex<Option<Browser>>>;

/// Load milestones a navigation can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// `document.readyState` has left `"loading"`.
    DomContentLoaded,
    /// `document.readyState` is `"complete"`.
    Load,
    /// Loaded, and no request has been in flight for 500ms.
    NetworkIdle,
}

/// Evaluates `script` in `page` and deserializes the result.
pub(crate) async fn evaluate_in<T>(page: &ChromePage, script: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    page.evaluate(script)
        .await
        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?
        .into_value()
        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
}

/// The task answering dialogs and counting requests for one tab. It stops
/// when the last [`Page`] clone for the tab is dropped.
#[derive(Debug)]
struct Listener(JoinHandle<()>);

impl Drop for Listener {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A browser tab with locators, waits and dialog capture.
///
/// Clones share the tab, its dialog record and its network bookkeeping.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Arc<ChromePage>,
    browser: BrowserHandle,
    dialogs: DialogCapture,
    network: NetworkTracker,
    listener: Arc<Listener>,
}

impl Page {
    /// Wraps a chromiumoxide page and starts listening to it.
    ///
    /// The event streams are subscribed before this returns, so a dialog
    /// opened right after cannot slip past and freeze the tab. Every dialog
    /// is recorded and dismissed.
    pub(crate) async fn new(page: ChromePage, browser: BrowserHandle) -> Result<Self> {
        let mut dialog_events = page.event_listener::<EventJavascriptDialogOpening>().await?;
        let mut sent = page.event_listener::<EventRequestWillBeSent>().await?;
        let mut finished = page.event_listener::<EventLoadingFinished>().await?;
        let mut failed = page.event_listener::<EventLoadingFailed>().await?;

        let inner = Arc::new(page);
        let dialogs = DialogCapture::new();
        let network = NetworkTracker::default();

        let task = {
            let page = Arc::clone(&inner);
            let dialogs = dialogs.clone();
            let network = network.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        Some(event) = dialog_events.next() => {
                            let message = DialogMessage::from(&*event);
                            info!("JavaScript {:?} dialog opened: {}", message.kind, message.message);
                            dialogs.push(message);
                            if let Err(e) = page.execute(HandleJavaScriptDialogParams::new(false)).await {
                                warn!("Failed to dismiss JavaScript dialog: {}", e);
                            }
                        }
                        Some(event) = sent.next() => network.started(event.request_id.as_ref()),
                        Some(event) = finished.next() => network.settled(event.request_id.as_ref()),
                        Some(event) = failed.next() => network.settled(event.request_id.as_ref()),
                        else => break,
                    }
                }
                debug!("Page event streams closed");
            })
        };

        Ok(Self {
            inner,
            browser,
            dialogs,
            network,
            listener: Arc::new(Listener(task)),
        })
    }

    /// JavaScript dialogs seen on this page so far.
    #[must_use]
    pub fn dialogs(&self) -> &DialogCapture {
        &self.dialogs
    }

    /// Navigates to an absolute URL and waits for the `load` milestone.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or `WaitTimeout`.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.navigate_with(url, LoadState::Load, WaitConfig::default())
            .await
    }

    /// Navigates to an absolute URL and waits for `state`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or `WaitTimeout`.
    pub async fn navigate_with(&self, url: &str, state: LoadState, config: WaitConfig) -> Result<()> {
        debug!("Navigating to {}", url);
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load_state(state, config).await
    }

    /// Runs `action`, which is expected to make the current document
    /// navigate away (a form submit, a link), and waits until the new
    /// document reaches `state`.
    ///
    /// The old document is tagged first. Until the tag is gone the old
    /// document is still the one loaded, and its `readyState` says nothing
    /// about the new one. Both stages share `config.timeout`.
    ///
    /// # Errors
    ///
    /// Propagates errors from `action`, and returns `WaitTimeout` if no new
    /// document replaces the current one in time.
    pub async fn expect_navigation<F, Fut>(
        &self,
        action: F,
        state: LoadState,
        config: WaitConfig,
    ) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let deadline = Instant::now() + config.timeout;
        let _: bool = self
            .evaluate(&format!("window.{NAVIGATION_MARKER} = true"))
            .await?;

        action().await?;

        let check = format!("window.{NAVIGATION_MARKER} === true");
        let check = check.as_str();
        wait_for_result(
            || async move {
                let still_old: bool = self.evaluate(check).await?;
                Ok(!still_old)
            },
            config.until(deadline),
            "the current document to be replaced",
        )
        .await?;

        self.wait_for_load_state(state, config.until(deadline)).await
    }

    /// Waits until the document reaches `state`. Every stage of a
    /// `NetworkIdle` wait counts against the same `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the state is not reached in time.
    pub async fn wait_for_load_state(&self, state: LoadState, config: WaitConfig) -> Result<()> {
        match state {
            LoadState::DomContentLoaded => {
                self.wait_for_ready_state(|s| s != "loading", config, "DOMContentLoaded")
                    .await
            }
            LoadState::Load => {
                self.wait_for_ready_state(|s| s == "complete", config, "document ready")
                    .await
            }
            LoadState::NetworkIdle => {
                let deadline = Instant::now() + config.timeout;
                self.wait_for_ready_state(|s| s == "complete", config, "document ready")
                    .await?;
                self.wait_for_network_idle(config.until(deadline)).await
            }
        }
    }

    async fn wait_for_ready_state(
        &self,
        accept: impl Fn(&str) -> bool,
        config: WaitConfig,
        description: &str,
    ) -> Result<()> {
        let accept = &accept;
        wait_for_result(
            || async move {
                let state: String = self.evaluate("document.readyState").await?;
                Ok(accept(&state))
            },
            config,
            description,
        )
        .await
    }

    async fn wait_for_network_idle(&self, config: WaitConfig) -> Result<()> {
        let result = wait_for_value(
            || async move {
                Ok(self
                    .network
                    .quiet_for()
                    .filter(|quiet| *quiet >= NETWORK_IDLE_WINDOW)
                    .map(|_| ()))
            },
            config,
            "network idle",
        )
        .await;
        if result.is_err() {
            debug!("{} requests still in flight", self.network.in_flight());
        }
        result
    }

    /// Waits until the current URL contains `fragment`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the URL never matches.
    pub async fn wait_for_url(&self, fragment: &str, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || async move { Ok(self.url().await?.contains(fragment)) },
            config,
            &format!("URL containing '{fragment}'"),
        )
        .await
    }

    /// Overrides the viewport size (device scale factor 1, not mobile).
    ///
    /// # Errors
    ///
    /// Returns an error if the CDP command fails.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(width))
            .height(i64::from(height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(BrowserError::ScriptExecutionFailed)?;
        self.inner.execute(params).await?;
        debug!("Viewport set to {}x{}", width, height);
        Ok(())
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails or the result cannot be deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        evaluate_in(&self.inner, script).await
    }

    /// Elements matching a CSS selector.
    #[must_use]
    pub fn locator(&self, selector: &str) -> Locator {
        Locator::new(
            self.inner.clone(),
            Query::new(Step::Css {
                selector: selector.to_string(),
            }),
        )
    }

    /// Elements with an ARIA role, optionally filtered by accessible name.
    #[must_use]
    pub fn get_by_role(&self, role: &str, name: Option<&str>) -> Locator {
        Locator::new(
            self.inner.clone(),
            Query::new(Step::Role {
                role: role.to_string(),
                name: name.map(str::to_string),
                exact: false,
            }),
        )
    }

    /// Elements whose `title` attribute contains `title`.
    #[must_use]
    pub fn get_by_title(&self, title: &str) -> Locator {
        Locator::new(
            self.inner.clone(),
            Query::new(Step::Title {
                text: title.to_string(),
            }),
        )
    }

    /// The deepest elements containing `text`.
    #[must_use]
    pub fn get_by_text(&self, text: &str) -> Locator {
        Locator::new(
            self.inner.clone(),
            Query::new(Step::Text {
                text: text.to_string(),
            }),
        )
    }

    /// Locators scoped to the document of the iframe matching `selector`.
    #[must_use]
    pub fn frame_locator(&self, selector: &str) -> FrameLocator {
        FrameLocator::new(self.inner.clone(), selector)
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Returns the serialized HTML of the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM cannot be read.
    pub async fn content(&self) -> Result<String> {
        Ok(self.inner.content().await?)
    }

    /// Runs `action` and returns the tab it opened.
    ///
    /// Tabs that already existed before the action are ignored, so this
    /// works for `target="_blank"` links and `window.open` alike.
    ///
    /// # Errors
    ///
    /// Propagates errors from `action`, and returns `WaitTimeout` if no new
    /// tab appears within `config.timeout`.
    pub async fn expect_popup<F, Fut>(&self, action: F, config: WaitConfig) -> Result<Page>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let before = self.open_target_ids().await?;
        action().await?;

        let popup = wait_for_value(
            || {
                let browser = self.browser.clone();
                let before = &before;
                async move {
                    let guard = browser.lock().await;
                    let browser = guard.as_ref().ok_or(BrowserError::AlreadyClosed)?;
                    let pages = browser.pages().await?;
                    Ok(pages
                        .into_iter()
                        .find(|p| !before.iter().any(|id| id.as_str() == p.target_id().as_ref())))
                }
            },
            config,
            "popup window",
        )
        .await?;

        debug!("Popup window opened");
        Page::new(popup, Arc::clone(&self.browser)).await
    }

    async fn open_target_ids(&self) -> Result<Vec<String>> {
        let guard = self.browser.lock().await;
        let browser = guard.as_ref().ok_or(BrowserError::AlreadyClosed)?;
        Ok(browser
            .pages()
            .await?
            .iter()
            .map(|p| p.target_id().as_ref().to_string())
            .collect())
    }

    /// Waits for a JavaScript dialog opened after this call.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if no dialog opens within `config.timeout`.
    pub async fn expect_dialog(&self, config: WaitConfig) -> Result<DialogMessage> {
        let mark = self.dialogs.mark();
        wait_for_value(
            || async move { Ok(self.dialogs.since(mark).into_iter().next()) },
            config,
            "JavaScript dialog",
        )
        .await
    }

    /// Takes a screenshot of the page and returns PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Takes a screenshot and writes it to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if capture or the file write fails.
    pub async fn save_screenshot(&self, path: &Path) -> Result<()> {
        let png = self.screenshot().await?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, png).await?;
        info!("Screenshot saved to {}", path.display());
        Ok(())
    }

    /// Blocks until Ctrl-C, leaving the page open for manual exploration.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handler cannot be installed.
    pub async fn pause(&self) -> Result<()> {
        info!("Paused. Interact with the browser, press Ctrl-C to continue.");
        tokio::signal::ctrl_c().await?;
        Ok(())
    }

    /// Closes the tab, for every clone.
    ///
    /// Locators and the listener also hold the chromiumoxide page, so the
    /// tab is closed by target id instead of by value.
    ///
    /// # Errors
    ///
    /// Returns an error if the CDP command fails.
    pub async fn close(self) -> Result<()> {
        self.listener.0.abort();
        let target_id = self.inner.target_id().clone();
        self.inner.execute(CloseTargetParams::new(target_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_states_are_distinct() {
        assert_ne!(LoadState::DomContentLoaded, LoadState::Load);
        assert_ne!(LoadState::Load, LoadState::NetworkIdle);
    }

    #[test]
    fn navigation_marker_is_a_plain_identifier() {
        assert!(
            NAVIGATION_MARKER
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        );
    }

    #[tokio::test]
    async fn dropping_the_listener_stops_its_task() {
        let held = Arc::new(());
        let in_task = Arc::clone(&held);
        let task = tokio::spawn(async move {
            let _held = in_task;
            std::future::pending::<()>().await;
        });

        drop(Listener(task));
        for _ in 0..100 {
            if Arc::strong_count(&held) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(Arc::strong_count(&held), 1, "listener task still running");
    }
}

//! Behaviour shared by every storefront page.
//!
//! The shop greets visitors with a cookie banner and, a few seconds later, a
//! marketing board. Both sit on top of the content and swallow clicks, so
//! every page object starts from [`BasePage::open_page_and_handle_initial_popups`]
//! and clicks through [`BasePage::safe_click`].

use crate::config::SuiteConfig;
use crate::error::Result;
use shopcheck_browser::{expect, BrowserError, LoadState, Locator, Page, WaitConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const COOKIE_ACCEPT_NAME: &str = "Zezwól na wszystkie";
const BHR_POPUP: &str = "div.bhr-board__canvas.type--POPUP";
const BHR_CLOSE_TITLE: &str = "Kliknij tutaj!";

/// A storefront tab plus the configuration it was opened with.
#[derive(Debug)]
pub struct BasePage {
    page: Page,
    config: Arc<SuiteConfig>,
}

impl BasePage {
    /// Wraps `page` and applies the configured viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport override is rejected.
    pub async fn new(page: Page, config: Arc<SuiteConfig>) -> Result<Self> {
        page.set_viewport(config.viewport.width, config.viewport.height)
            .await?;
        Ok(Self { page, config })
    }

    /// The underlying browser tab.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Consumes the page object and closes its tab.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be closed.
    pub async fn close(self) -> Result<()> {
        self.page.close().await?;
        Ok(())
    }

    /// Opens the home page and clears the cookie banner and marketing popup.
    ///
    /// # Errors
    ///
    /// Returns an error if the home page does not load within 30 seconds.
    pub async fn open_page_and_handle_initial_popups(&self) -> Result<()> {
        let url = self.config.base_url.clone();
        self.open_and_settle(&url).await?;
        self.handle_initial_popups().await;
        Ok(())
    }

    /// Navigates to `url` and waits for the network to go quiet.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not load within 30 seconds.
    pub async fn open_and_settle(&self, url: &str) -> Result<()> {
        info!("Navigating to {}...", url);
        self.page
            .navigate_with(
                url,
                LoadState::NetworkIdle,
                WaitConfig::with_timeout(Duration::from_secs(30)),
            )
            .await?;
        info!("Page navigation complete and network is idle.");
        Ok(())
    }

    /// Clears the cookie banner and marketing popup on whatever page is
    /// currently open.
    ///
    /// A missing banner or popup is normal. Trouble closing the popup is
    /// logged with a screenshot.
    pub async fn handle_initial_popups(&self) {
        if let Err(e) = self.accept_cookies().await {
            warn!("Cookie consent button not found or already handled: {}", e);
        }

        match self.dismiss_marketing_popup().await {
            Ok(true) => info!("Marketing popup handled."),
            Ok(false) => info!("Marketing popup did not appear within the timeout. Continuing..."),
            Err(e) => {
                error!("Unexpected error while handling the marketing popup: {}", e);
                self.save_artifact("error_bhr_popup.png").await;
            }
        }

        info!("Page is clean and ready for testing.");
    }

    async fn accept_cookies(&self) -> Result<()> {
        let button = self.page.get_by_role("button", Some(COOKIE_ACCEPT_NAME));
        expect(&button).to_be_visible(Duration::from_secs(5)).await?;
        button.click(Duration::from_secs(5)).await?;
        expect(&button)
            .not_to_be_visible(Duration::from_secs(3))
            .await?;
        info!("Cookie consent handled.");
        Ok(())
    }

    /// Returns `Ok(false)` when the popup never showed up.
    async fn dismiss_marketing_popup(&self) -> Result<bool> {
        let popup = self.page.locator(BHR_POPUP);
        debug!("Checking for the marketing popup...");
        if !popup.is_visible_within(Duration::from_secs(10)).await {
            return Ok(false);
        }

        info!("Marketing popup found. Attempting to close it.");
        let close_button = self.page.get_by_title(BHR_CLOSE_TITLE);
        expect(&close_button)
            .to_be_enabled(Duration::from_secs(2))
            .await?;
        close_button.click(Duration::from_secs(5)).await?;
        expect(&popup).not_to_be_visible(Duration::from_secs(5)).await?;
        Ok(true)
    }

    /// Tries to close every overlay known to block clicks on the shop.
    ///
    /// Overlays that are absent or vanish mid-way are ignored.
    pub async fn close_known_overlays(&self) {
        info!("Checking for known overlays to close...");

        let overlays: [(Locator, &str); 3] = [
            (self.page.locator("#bhr-items div").first(), "BHR div overlay"),
            (
                self.page
                    .frame_locator("#bhr-items iframe")
                    .locator("div")
                    .nth(3),
                "BHR iframe overlay",
            ),
            (
                self.page
                    .frame_locator(r#"iframe[title="salesmanago-consent-form-title"]"#)
                    .get_by_role("button", Some("Nie")),
                "SALESmanago consent button",
            ),
        ];

        for (overlay, name) in &overlays {
            if !overlay.is_visible_within(Duration::from_millis(500)).await {
                continue;
            }
            warn!("Found active overlay '{}'. Attempting to click it.", name);
            let closed = async {
                overlay.click(Duration::from_secs(2)).await?;
                expect(overlay)
                    .not_to_be_visible(Duration::from_secs(3))
                    .await
            };
            match closed.await {
                Ok(()) => info!("Closed overlay '{}'.", name),
                Err(e) => debug!("Could not interact with '{}': {}", name, e),
            }
        }
    }

    /// Clicks `locator`, clearing known overlays and retrying once if the
    /// click lands on something else.
    ///
    /// Returns a driver error so it can run inside [`Page::expect_popup`].
    ///
    /// # Errors
    ///
    /// Returns the original error if it was not an intercepted click, or the
    /// error of the retry.
    pub async fn safe_click(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        match locator.click(timeout).await {
            Err(e @ BrowserError::ClickIntercepted { .. }) => {
                warn!("{}. Closing overlays before retrying...", e);
                self.close_known_overlays().await;
                info!("Retrying the click after cleanup...");
                locator.click(timeout).await
            }
            other => other,
        }
    }

    /// Saves a screenshot named `name` into the artifacts directory.
    ///
    /// Failures are logged, not returned.
    pub async fn save_artifact(&self, name: &str) {
        let path = self.config.artifact_path(name);
        if let Err(e) = self.page.save_screenshot(&path).await {
            warn!("Could not save artifact {}: {}", path.display(), e);
        }
    }

    /// Full HTML of the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be read.
    pub async fn page_content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    /// # Errors
    ///
    /// Returns an error if the page cannot be read.
    pub async fn title(&self) -> Result<String> {
        Ok(self.page.title().await?)
    }

    /// # Errors
    ///
    /// Returns an error if the page cannot be read.
    pub async fn url(&self) -> Result<String> {
        Ok(self.page.url().await?)
    }
}

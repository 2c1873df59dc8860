//! A single product page.

use crate::base_page::BasePage;
use crate::config::SuiteConfig;
use crate::error::Result;
use shopcheck_browser::{expect, Locator, Page, DEFAULT_ACTION_TIMEOUT};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Product detail page with its cart controls.
#[derive(Debug)]
pub struct ProductPage {
    base: BasePage,
}

impl Deref for ProductPage {
    type Target = BasePage;

    fn deref(&self) -> &BasePage {
        &self.base
    }
}

impl ProductPage {
    /// Wraps `page` without navigating.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport cannot be applied.
    pub async fn new(page: Page, config: Arc<SuiteConfig>) -> Result<Self> {
        Ok(Self {
            base: BasePage::new(page, config).await?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the tab cannot be closed.
    pub async fn close(self) -> Result<()> {
        self.base.close().await
    }

    #[must_use]
    pub fn add_to_cart_button(&self) -> Locator {
        self.page()
            .locator("button")
            .filter_has_text("Do koszyka")
            .first()
    }

    #[must_use]
    pub fn continue_shopping_button(&self) -> Locator {
        self.page()
            .locator("a.ty-btn.ty-btn__secondary.cm-notification-close")
            .filter_has_text("Kontynuuj zakupy")
            .first()
    }

    #[must_use]
    pub fn name(&self) -> Locator {
        self.page().locator("h1").first()
    }

    #[must_use]
    pub fn price(&self) -> Locator {
        self.page().locator(".ty-price-num").first()
    }

    /// The "short description" accordion header.
    #[must_use]
    pub fn description_accordion(&self) -> Locator {
        self.page()
            .locator(".idr-accordion-title")
            .filter_has_text("Skrócony opis")
    }

    /// The "technical data" tab.
    #[must_use]
    pub fn specification_tab(&self) -> Locator {
        self.page()
            .locator(".ty-tabs__a")
            .filter_has_text("Dane techniczne")
    }

    /// Navigates to an arbitrary product URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not load.
    pub async fn open_specific_product(&self, url: &str) -> Result<()> {
        info!("Opening product {}", url);
        self.page().navigate(url).await?;
        Ok(())
    }

    /// Opens the configured product and clears the initial popups.
    ///
    /// # Errors
    ///
    /// Returns an error if either page fails to load.
    pub async fn open_product_page(&self) -> Result<()> {
        let url = self.config().product_url.clone();
        self.open_and_settle(&url).await?;
        self.handle_initial_popups().await;
        info!("Product page opened and initial popups handled.");
        Ok(())
    }

    /// Adds the product to the cart and dismisses the confirmation.
    ///
    /// # Errors
    ///
    /// Returns an assertion error if either button does not become visible
    /// and enabled in time.
    pub async fn add_product_to_cart(&self) -> Result<()> {
        info!("Attempting to add product to cart.");
        let add = self.add_to_cart_button();
        expect(&add).to_be_visible(Duration::from_secs(10)).await?;
        expect(&add).to_be_enabled(Duration::from_secs(5)).await?;
        add.click(DEFAULT_ACTION_TIMEOUT).await?;
        info!("Clicked 'Do koszyka' button.");
        tokio::time::sleep(Duration::from_secs(2)).await;

        let continue_shopping = self.continue_shopping_button();
        expect(&continue_shopping)
            .to_be_visible(Duration::from_secs(10))
            .await?;
        expect(&continue_shopping)
            .to_be_enabled(Duration::from_secs(5))
            .await?;
        continue_shopping.click(DEFAULT_ACTION_TIMEOUT).await?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        info!("Clicked 'Kontynuuj zakupy' button.");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if there is no `h1`.
    pub async fn get_product_name(&self) -> Result<String> {
        Ok(self.name().inner_text().await?.trim().to_string())
    }

    /// # Errors
    ///
    /// Returns an assertion error if the price is not visible.
    pub async fn get_product_price(&self) -> Result<String> {
        let price = self.price();
        expect(&price).to_be_visible(DEFAULT_ACTION_TIMEOUT).await?;
        Ok(price.inner_text().await?.trim().to_string())
    }

    /// Asserts the price, description and specification are shown with
    /// some text in each.
    ///
    /// # Errors
    ///
    /// Returns the first assertion that failed.
    pub async fn verify_product_details_displayed(&self) -> Result<()> {
        info!("Verifying product details are displayed...");
        let details = [
            self.price(),
            self.description_accordion(),
            self.specification_tab(),
        ];

        for detail in &details {
            expect(detail).to_be_visible(DEFAULT_ACTION_TIMEOUT).await?;
        }
        for detail in &details {
            expect(detail)
                .not_to_have_text("", DEFAULT_ACTION_TIMEOUT)
                .await?;
        }

        info!("All key product details are visible and have content.");
        Ok(())
    }
}

//! The customer login form on the profile page.

use crate::base_page::BasePage;
use crate::config::{Credentials, SuiteConfig};
use crate::error::Result;
use shopcheck_browser::{expect, Locator, Page, DEFAULT_ACTION_TIMEOUT};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const LOGIN_BUTTON: &str = "form[name='main_login_form'] div[class='buttons-container clearfix'] \
                            button[name='dispatch[auth.login]']";
const SUCCESS_MESSAGE: &str = "Użytkownik został poprawnie zalogowany";

#[derive(Debug)]
pub struct LoginPage {
    base: BasePage,
}

impl Deref for LoginPage {
    type Target = BasePage;

    fn deref(&self) -> &BasePage {
        &self.base
    }
}

impl LoginPage {
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
    pub fn email_input(&self) -> Locator {
        self.page().locator("#login_main_login")
    }

    #[must_use]
    pub fn password_input(&self) -> Locator {
        self.page().locator("#psw_main_login")
    }

    #[must_use]
    pub fn login_button(&self) -> Locator {
        self.page().locator(LOGIN_BUTTON)
    }

    #[must_use]
    pub fn success_message(&self) -> Locator {
        self.page().get_by_text(SUCCESS_MESSAGE)
    }

    /// Opens the login page directly and waits for the form.
    ///
    /// # Errors
    ///
    /// Returns an error if the email field is not visible within 10 seconds.
    pub async fn navigate_to_login_page(&self) -> Result<()> {
        let url = self.config().login_url.clone();
        info!("Navigating directly to the login page: {}...", url);
        self.page().navigate(&url).await?;
        expect(&self.email_input())
            .to_be_visible(Duration::from_secs(10))
            .await?;
        info!("Login page is loaded and ready.");
        Ok(())
    }

    /// Fills in the form and submits it.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be filled or the button clicked.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        info!("Attempting to log in as {}...", credentials.email);
        self.email_input()
            .fill(&credentials.email, DEFAULT_ACTION_TIMEOUT)
            .await?;
        self.password_input()
            .fill(&credentials.password, DEFAULT_ACTION_TIMEOUT)
            .await?;
        self.safe_click(&self.login_button(), DEFAULT_ACTION_TIMEOUT)
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an assertion error if the success message does not appear
    /// within 10 seconds.
    pub async fn assert_login_is_successful(&self) -> Result<()> {
        info!("Verifying login success message...");
        expect(&self.success_message())
            .to_be_visible(Duration::from_secs(10))
            .await?;
        info!("Login successful!");
        Ok(())
    }
}

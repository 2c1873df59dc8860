//! Ready-made browser sessions for the live suite and the CLI.
//!
//! A [`Session`] owns one Chrome instance and the configuration it was
//! launched with, and hands out page objects on fresh tabs.

use crate::config::{SuiteConfig, Viewport};
use crate::error::Result;
use crate::home_page::HomePage;
use crate::login_page::LoginPage;
use crate::product_page::ProductPage;
use shopcheck_browser::{Chrome, Page};
use std::sync::{Arc, Once};
use tracing::info;
use tracing_subscriber::EnvFilter;

static TEST_LOGGING: Once = Once::new();

/// Installs a test-friendly tracing subscriber the first time it is called.
///
/// `RUST_LOG` is respected; the default level is `info`.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// A launched browser plus the configuration its pages use.
pub struct Session {
    browser: Chrome,
    config: Arc<SuiteConfig>,
}

impl Session {
    /// Launches Chrome as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome cannot be started.
    pub async fn launch(config: SuiteConfig) -> Result<Self> {
        let browser = Chrome::launch(config.browser_config()).await?;
        info!(
            "Session started against {} ({}x{})",
            config.base_url, config.viewport.width, config.viewport.height
        );
        Ok(Self {
            browser,
            config: Arc::new(config),
        })
    }

    /// Test entry point: sets up logging, loads the configuration from the
    /// usual sources and launches Chrome.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or Chrome cannot be
    /// started.
    pub async fn start() -> Result<Self> {
        init_test_logging();
        Self::launch(SuiteConfig::load(None)?).await
    }

    /// Like [`Session::start`], with the viewport replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or Chrome cannot be
    /// started.
    pub async fn launch_with_viewport(width: u32, height: u32) -> Result<Self> {
        init_test_logging();
        let mut config = SuiteConfig::load(None)?;
        config.viewport = Viewport { width, height };
        config.validate()?;
        Self::launch(config).await
    }

    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Opens a blank tab.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        Ok(self.browser.new_page().await?)
    }

    /// A home page that is loaded and cleared of popups.
    ///
    /// # Errors
    ///
    /// Returns an error if the home page does not load.
    pub async fn home_page(&self) -> Result<HomePage> {
        let home = HomePage::new(self.new_page().await?, self.config.clone()).await?;
        home.open_page_and_handle_initial_popups().await?;
        Ok(home)
    }

    /// A product page object on a blank tab; nothing is loaded yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be opened.
    pub async fn product_page(&self) -> Result<ProductPage> {
        ProductPage::new(self.new_page().await?, self.config.clone()).await
    }

    /// A login page object on a blank tab; nothing is loaded yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be opened.
    pub async fn login_page(&self) -> Result<LoginPage> {
        LoginPage::new(self.new_page().await?, self.config.clone()).await
    }

    /// Shuts Chrome down.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser does not close cleanly.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

//! The storefront home page: main menu, search box and social links.

use crate::base_page::BasePage;
use crate::config::SuiteConfig;
use crate::error::{Result, SuiteError};
use crate::security;
use shopcheck_browser::{
    expect, wait_for_result, LoadState, Locator, Page, Site, WaitConfig, DEFAULT_ACTION_TIMEOUT,
};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const MENU_TRIGGER: &str = "div.main-menu__item";
const SUBMENU_HOLDER: &str = "div.submenu-holder";
const HOMEPAGE_BANNERS: &str = "div.homepage-banners";
const SEARCH_INPUT: &str = "#search_input";
const SEARCH_INPUT_FALLBACK: &str = "form[name='search_form'] input[name='q']";
const SEARCH_RESULT_TILE: &str = ".ty-grid-list__item";
const SEARCH_NO_RESULTS: &str = ".ty-no-items";
const LOGO: &str = ".top-logo img[alt='Logo iDream']";
const YOUTUBE_CONSENT_NAME: &str = "Akceptuj wszystko";

/// Social network buttons in the storefront footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialNetwork {
    Instagram,
    Facebook,
    TikTok,
    YouTube,
}

impl SocialNetwork {
    /// Every network, in footer order.
    pub const ALL: [SocialNetwork; 4] = [
        SocialNetwork::Instagram,
        SocialNetwork::Facebook,
        SocialNetwork::TikTok,
        SocialNetwork::YouTube,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SocialNetwork::Instagram => "instagram",
            SocialNetwork::Facebook => "facebook",
            SocialNetwork::TikTok => "tiktok",
            SocialNetwork::YouTube => "youtube",
        }
    }

    /// CSS selector of the footer button.
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            SocialNetwork::Instagram => "a[href*='instagram.com/idream_pl']",
            SocialNetwork::Facebook => "a[href*='facebook.com/iDreamPolska']",
            SocialNetwork::TikTok => "a[href*='tiktok.com/@idream_pl']",
            SocialNetwork::YouTube => "a[href*='youtube.com/user/iDreamPL']",
        }
    }

    /// URL the popup must start with once it has loaded.
    #[must_use]
    pub fn expected_url_prefix(self) -> &'static str {
        match self {
            SocialNetwork::Instagram => "https://www.instagram.com/idream_pl/",
            SocialNetwork::Facebook => "https://www.facebook.com/iDreamPolska/",
            SocialNetwork::TikTok => "https://www.tiktok.com/@idream_pl",
            SocialNetwork::YouTube => "https://www.youtube.com/user/iDreamPL",
        }
    }
}

impl fmt::Display for SocialNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SocialNetwork {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self> {
        SocialNetwork::ALL
            .into_iter()
            .find(|network| network.name() == s)
            .ok_or_else(|| SuiteError::UnknownSocialNetwork(s.to_string()))
    }
}

/// A link found in a main-menu submenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    /// Visible link text, trimmed.
    pub text: String,
    /// Absolute URL.
    pub href: String,
}

/// The storefront home page.
#[derive(Debug)]
pub struct HomePage {
    base: BasePage,
}

impl Deref for HomePage {
    type Target = BasePage;

    fn deref(&self) -> &BasePage {
        &self.base
    }
}

impl HomePage {
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

    /// Consumes the page object and closes its tab.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be closed.
    pub async fn close(self) -> Result<()> {
        self.base.close().await
    }

    /// The shop logo in the header.
    #[must_use]
    pub fn logo(&self) -> Locator {
        self.page().locator(LOGO).first()
    }

    /// Clicks a social network button and returns the tab it opens.
    ///
    /// # Errors
    ///
    /// Returns an error if the button is not visible within 5 seconds, or no
    /// popup opens.
    pub async fn click_social_media_button(&self, network: SocialNetwork) -> Result<Page> {
        let button = self.page().locator(network.selector()).first();
        button.scroll_into_view().await?;
        expect(&button).to_be_visible(Duration::from_secs(5)).await?;

        let popup = self
            .page()
            .expect_popup(
                || self.safe_click(&button, DEFAULT_ACTION_TIMEOUT),
                WaitConfig::default(),
            )
            .await?;
        popup
            .wait_for_load_state(LoadState::DomContentLoaded, WaitConfig::default())
            .await?;
        info!("{} opened in a new tab", network);
        Ok(popup)
    }

    /// Gets past YouTube's cookie wall, if it is shown.
    ///
    /// Problems are logged; the caller's URL assertion decides the outcome.
    pub async fn accept_youtube_consent(&self, popup: &Page, expected_url: &str) {
        info!("Handling YouTube consent page if present...");
        let result: Result<()> = async {
            let accept = popup
                .get_by_role("button", Some(YOUTUBE_CONSENT_NAME))
                .first();
            expect(&accept).to_be_visible(Duration::from_secs(5)).await?;
            accept.click(DEFAULT_ACTION_TIMEOUT).await?;
            info!("Consent button clicked. Waiting for navigation to the final URL...");
            popup
                .wait_for_url(expected_url, WaitConfig::with_timeout(Duration::from_secs(10)))
                .await?;
            Ok(())
        }
        .await;

        if let Err(e) = result {
            warn!("Could not handle YouTube consent page (it might not have appeared): {}", e);
        }
    }

    /// Hovers every main-menu category and collects its submenu links.
    ///
    /// Links are absolute, unique by URL and in the order they were found.
    ///
    /// # Errors
    ///
    /// Returns `SuiteError::Assertion` if the home page banners never show
    /// up. Problems with individual categories are logged and skipped.
    pub async fn get_main_menu_links(&self) -> Result<Vec<MenuLink>> {
        info!("Collecting main menu links...");

        if let Err(e) = expect(&self.page().locator(HOMEPAGE_BANNERS))
            .to_be_visible(Duration::from_secs(15))
            .await
        {
            self.save_artifact("error_banners_not_found.png").await;
            return Err(SuiteError::Assertion(format!(
                "home page banners did not load: {e}"
            )));
        }
        debug!("Home page banners are visible");

        let site = self.config().site();
        let holder = self.page().locator(SUBMENU_HOLDER);
        let triggers = self.page().locator(MENU_TRIGGER).all().await?;
        info!("Found {} menu triggers to scan.", triggers.len());

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for trigger in &triggers {
            let category = trigger
                .locator("a")
                .first()
                .text_content()
                .await
                .ok()
                .flatten()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());

            let class = trigger.get_attribute("class").await?.unwrap_or_default();
            if !class.split_whitespace().any(|c| c == "has-submenu") {
                info!("Skipping category '{}' (no submenu).", category);
                continue;
            }

            info!("Processing category '{}'", category);
            match self
                .collect_submenu_links(trigger, &holder, &category, &site, &mut seen, &mut links)
                .await
            {
                Ok(found) => info!("Collected {} links from '{}' submenu.", found, category),
                Err(e) if e.is_timeout() => {
                    warn!("Content for '{}' did not appear after hover: {}", category, e);
                    self.save_artifact(&format!("error_hover_{category}.png"))
                        .await;
                }
                Err(e) => error!("Unexpected error processing '{}': {}", category, e),
            }
        }

        if links.is_empty() {
            self.save_artifact("error_no_links_found_at_all.png").await;
        }
        info!("Total unique links found across all menus: {}", links.len());
        Ok(links)
    }

    /// Returns how many links the submenu showed, including duplicates.
    async fn collect_submenu_links(
        &self,
        trigger: &Locator,
        holder: &Locator,
        category: &str,
        site: &dyn Site,
        seen: &mut HashSet<String>,
        links: &mut Vec<MenuLink>,
    ) -> Result<usize> {
        trigger.hover(DEFAULT_ACTION_TIMEOUT).await?;

        // The holder is shared by all categories; the heading proves it now
        // shows this one.
        let heading = holder.get_by_role("heading", Some(category)).exact();
        expect(&heading).to_be_visible(Duration::from_secs(5)).await?;

        let anchors = holder.get_by_role("link", None).all().await?;
        for anchor in &anchors {
            let text = anchor
                .text_content()
                .await?
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            let Some(href) = anchor.get_attribute("href").await? else {
                continue;
            };
            if text.is_empty() || href.trim().is_empty() {
                continue;
            }
            let Some(absolute) = site.absolutize(&href) else {
                debug!("Ignoring non-navigable link '{}' ({})", text, href);
                continue;
            };
            if seen.insert(absolute.clone()) {
                links.push(MenuLink {
                    text,
                    href: absolute,
                });
            }
        }
        Ok(anchors.len())
    }

    fn search_input(&self) -> Locator {
        self.page().locator(SEARCH_INPUT).first()
    }

    /// Types `query` into the search box and submits it.
    ///
    /// # Errors
    ///
    /// Returns an error if no search box is found or the results page does
    /// not reach DOMContentLoaded within 30 seconds.
    pub async fn perform_search(&self, query: &str) -> Result<()> {
        info!("Searching for '{}'", security::payload_label(query));
        let input = if self.search_input().count().await? > 0 {
            self.search_input()
        } else {
            self.page().locator(SEARCH_INPUT_FALLBACK).first()
        };

        input.fill(query, DEFAULT_ACTION_TIMEOUT).await?;
        self.page()
            .expect_navigation(
                || input.press("Enter", DEFAULT_ACTION_TIMEOUT),
                LoadState::DomContentLoaded,
                WaitConfig::with_timeout(Duration::from_secs(30)),
            )
            .await?;
        Ok(())
    }

    /// Waits until the results page shows either products or its
    /// "no products" notice.
    ///
    /// # Errors
    ///
    /// Returns a timeout if neither appears within 15 seconds.
    pub async fn wait_for_search_results(&self) -> Result<()> {
        let tiles = self.page().locator(SEARCH_RESULT_TILE);
        let empty = self.page().locator(SEARCH_NO_RESULTS);
        wait_for_result(
            || async { Ok(tiles.count().await? > 0 || empty.is_visible().await?) },
            WaitConfig::with_timeout(Duration::from_secs(15)),
            "search results",
        )
        .await?;
        Ok(())
    }

    /// Number of product tiles on the results page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be queried.
    pub async fn search_result_count(&self) -> Result<usize> {
        Ok(self.page().locator(SEARCH_RESULT_TILE).count().await?)
    }

    /// Asserts the results page lists at least one product.
    ///
    /// # Errors
    ///
    /// Returns `SuiteError::Assertion` if there are no product tiles.
    pub async fn verify_search_results_exist(&self) -> Result<()> {
        self.wait_for_search_results().await?;
        let count = self.search_result_count().await?;
        if count == 0 {
            return Err(SuiteError::Assertion(
                "search returned no products".to_string(),
            ));
        }
        info!("Search returned {} products", count);
        Ok(())
    }

    /// Whether the current page is a firewall block page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be read.
    pub async fn is_blocked_by_waf(&self) -> Result<bool> {
        let title = self.title().await?;
        let content = self.page_content().await?;
        Ok(security::is_waf_block(&title, &content))
    }

    /// Full HTML of the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be read.
    pub async fn get_page_content(&self) -> Result<String> {
        self.page_content().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_networks_parse_from_lowercase_names() {
        for network in SocialNetwork::ALL {
            assert_eq!(network.name().parse::<SocialNetwork>().ok(), Some(network));
        }
        assert!(matches!(
            "myspace".parse::<SocialNetwork>(),
            Err(SuiteError::UnknownSocialNetwork(name)) if name == "myspace"
        ));
        assert!("Instagram".parse::<SocialNetwork>().is_err());
    }

    #[test]
    fn selectors_match_expected_hosts() {
        assert_eq!(
            SocialNetwork::TikTok.selector(),
            "a[href*='tiktok.com/@idream_pl']"
        );
        for network in SocialNetwork::ALL {
            assert!(network.expected_url_prefix().starts_with("https://www."));
        }
    }

    #[test]
    fn display_uses_lowercase_name() {
        assert_eq!(SocialNetwork::YouTube.to_string(), "youtube");
    }
}

//! # shopcheck-browser
//!
//! The driver layer of the shopcheck storefront suite, built on chromiumoxide.
//!
//! It offers Playwright-style primitives on top of the Chrome DevTools
//! Protocol: lazily resolved locators with auto-waiting actions, retrying
//! assertions, load-state waits, popup and dialog handling.
//!
//! ## Architecture
//!
//! - **Chrome**: Chrome process lifecycle
//! - **Page**: one tab; navigation, scripting, locator factory, popups, dialogs
//! - **Locator**: chain of selector steps resolved in the page on every use
//! - **expect / expect_page**: polling assertions
//! - **WaitConfig**: timeouts and poll intervals for every wait
//! - **Site**: base URL of the site under test, link absolutizing
//!
//! ## Example Usage
//!
//! ```ignore
//! use shopcheck_browser::{expect, Chrome, LaunchOptions};
//! use std::time::Duration;
//!
//! let browser = Chrome::launch(LaunchOptions::default()).await?;
//! let page = browser.new_page().await?;
//! page.navigate("https://idream.pl/").await?;
//!
//! let consent = page.get_by_role("button", Some("Zezwól na wszystkie"));
//! if consent.is_visible_within(Duration::from_secs(5)).await {
//!     consent.click(Duration::from_secs(5)).await?;
//!     expect(&consent).not_to_be_visible(Duration::from_secs(3)).await?;
//! }
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover logic that needs no browser (waits, selector encoding,
//! dialog and request bookkeeping). Integration tests in `tests/` drive a
//! real Chrome against `data:` pages and a local axum site, and are
//! `#[ignore]`d; run them with
//! `cargo test -p shopcheck-browser -- --ignored`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod dialog;
pub mod error;
pub mod expect;
pub mod locator;
mod network;
pub mod page;
pub mod site;
pub mod wait;

pub use browser::{Chrome, LaunchOptions};
pub use dialog::{DialogCapture, DialogKind, DialogMessage};
pub use error::{BrowserError, Result};
pub use expect::{expect, expect_page, LocatorAssertions, PageAssertions};
pub use locator::{FrameLocator, Locator, Query, Step, DEFAULT_ACTION_TIMEOUT};
pub use page::{LoadState, Page};
pub use site::{Site, StaticSite};
pub use wait::{wait_for, wait_for_result, wait_for_value, WaitConfig, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};

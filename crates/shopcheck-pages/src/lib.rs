//! Page objects and checks for the iDream storefront.
//!
//! Each page of the shop gets a page object built on [`BasePage`], which
//! knows how to get past the cookie banner and the marketing overlays that
//! cover the storefront. Tests and the `shopcheck` CLI talk to the shop only
//! through these objects.
//!
//! # Example
//!
//! ```rust,no_run
//! use shopcheck_pages::{fixtures::Session, SuiteConfig};
//!
//! # async fn example() -> shopcheck_pages::Result<()> {
//! let session = Session::launch(SuiteConfig::load(None)?).await?;
//! let home = session.home_page().await?;
//! let links = home.get_main_menu_links().await?;
//! println!("{} menu links", links.len());
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod base_page;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod home_page;
pub mod links;
pub mod login_page;
pub mod product_page;
pub mod security;

pub use base_page::BasePage;
pub use config::{Credentials, LinkCheckConfig, SuiteConfig, Viewport};
pub use error::{ConfigError, Result, SuiteError};
pub use home_page::{HomePage, MenuLink, SocialNetwork};
pub use links::{LinkChecker, LinkFailure, LinkReport};
pub use login_page::LoginPage;
pub use product_page::ProductPage;

//! Home page smoke check against the live storefront.
//!
//! Requires Chrome and network access. Run with:
//! cargo test --package shopcheck-pages -- --ignored

use shopcheck_browser::expect_page;
use shopcheck_pages::fixtures::Session;
use std::time::Duration;

const EXPECTED_TITLE: &str = "iDream Apple Sklep internetowy - Apple Premium Reseller Polska";

#[tokio::test]
#[ignore] // Hits the production storefront
async fn test_home_page_title() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    expect_page(home.page())
        .to_have_title(EXPECTED_TITLE, Duration::from_secs(5))
        .await
        .expect("home page title should match");

    session.close().await.expect("failed to close");
}

//! Customer login against the live storefront.
//!
//! Needs SHOPCHECK_CREDENTIALS__EMAIL and SHOPCHECK_CREDENTIALS__PASSWORD
//! (or a `[credentials]` table in shopcheck.toml); skipped otherwise.

use shopcheck_pages::fixtures::Session;
use tracing::warn;

#[tokio::test]
#[ignore] // Hits the production storefront
async fn test_successful_login() {
    let session = Session::start().await.expect("failed to start session");
    let Some(credentials) = session.config().credentials.clone() else {
        warn!("No credentials configured, skipping login check");
        session.close().await.expect("failed to close");
        return;
    };

    let login_page = session.login_page().await.expect("failed to open tab");
    login_page
        .navigate_to_login_page()
        .await
        .expect("login form should load");
    login_page.login(&credentials).await.expect("login should submit");
    login_page
        .assert_login_is_successful()
        .await
        .expect("success message should appear");

    session.close().await.expect("failed to close");
}

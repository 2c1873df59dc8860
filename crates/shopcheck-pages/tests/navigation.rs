//! Main menu link health against the live storefront.

use shopcheck_pages::fixtures::Session;
use shopcheck_pages::LinkChecker;

#[tokio::test]
#[ignore] // Hits the production storefront
async fn test_main_menu_link_health() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    let links = home
        .get_main_menu_links()
        .await
        .expect("menu links should be collected");
    assert!(!links.is_empty(), "No links found in the main menu");
    assert!(links.iter().all(|l| l.href.starts_with("http")));

    let link_check = session.config().link_check;
    let checker = LinkChecker::new(link_check.timeout(), link_check.concurrency)
        .expect("HTTP client");
    let report = checker.check(&links).await;

    session.close().await.expect("failed to close");
    assert!(report.is_healthy(), "{report}");
}

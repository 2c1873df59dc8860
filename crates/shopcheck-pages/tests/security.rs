//! Search form security checks against the live storefront.
//!
//! Each check submits hostile input through the search box and inspects the
//! response. A firewall block page counts as a pass. These are heavy on the
//! production site and stay opt-in:
//! cargo test --package shopcheck-pages --test security -- --ignored

use shopcheck_browser::{wait_for_value, LoadState, WaitConfig};
use shopcheck_pages::fixtures::Session;
use shopcheck_pages::security::{
    csrf_indicators_in, input_validation_findings, input_validation_payloads, payload_label,
    sql_injection_findings, waf_bypass_findings, xss_findings, SQL_INJECTION_PAYLOADS,
    WAF_BYPASS_PAYLOADS, XSS_PAYLOADS,
};
use std::time::Duration;
use tracing::{info, warn};

#[tokio::test]
#[ignore] // Security checks are opt-in
async fn test_sql_injection() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    for payload in SQL_INJECTION_PAYLOADS {
        home.perform_search(payload).await.expect("search should submit");

        if home.is_blocked_by_waf().await.expect("read page") {
            info!("Payload '{}' was blocked by the WAF", payload);
            continue;
        }

        let content = home.get_page_content().await.expect("page content");
        let findings = sql_injection_findings(&content);
        assert!(
            findings.is_empty(),
            "SQL injection payload '{payload}' produced: {findings:?}"
        );
        info!("Payload '{}' - no vulnerability detected", payload);
    }

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore] // Security checks are opt-in
async fn test_xss_attack() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    for payload in XSS_PAYLOADS {
        home.open_page_and_handle_initial_popups()
            .await
            .expect("home page should load");

        let mark = home.page().dialogs().mark();
        home.perform_search(payload).await.expect("search should submit");
        if let Err(e) = home.wait_for_search_results().await {
            warn!("No results listing for '{}': {}", payload, e);
        }

        let dialog = wait_for_value(
            || async { Ok(home.page().dialogs().since(mark).into_iter().next()) },
            WaitConfig::with_timeout(Duration::from_secs(5)),
            "JavaScript dialog",
        )
        .await;
        if let Ok(dialog) = dialog {
            panic!(
                "XSS vulnerability: payload '{payload}' opened a {:?} dialog: {}",
                dialog.kind, dialog.message
            );
        }

        if home.is_blocked_by_waf().await.expect("read page") {
            info!("Payload '{}' was blocked by the WAF", payload);
            continue;
        }

        let content = home.get_page_content().await.expect("page content");
        let findings = xss_findings(&content, payload);
        assert!(
            findings.is_empty(),
            "XSS payload may be executable: {payload}"
        );
        info!("Payload '{}' - no XSS detected", payload);
    }

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore] // Security checks are opt-in
async fn test_waf_bypass_attempts() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    for payload in WAF_BYPASS_PAYLOADS {
        home.perform_search(payload).await.expect("search should submit");

        if home.is_blocked_by_waf().await.expect("read page") {
            info!("WAF blocked bypass attempt: {}", payload);
            continue;
        }

        let content = home.get_page_content().await.expect("page content");
        let findings = waf_bypass_findings(&content, payload);
        assert!(
            findings.is_empty(),
            "Critical: WAF bypass succeeded for '{payload}': {}",
            findings[0]
        );
        info!("Payload '{}' - bypass attempt failed", payload);
    }

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore] // Security checks are opt-in
async fn test_csrf_protection_presence() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    let content = home.get_page_content().await.expect("page content");
    let found = csrf_indicators_in(&content);

    let meta_token = home
        .page()
        .locator("meta[name='csrf-token']")
        .get_attribute("content")
        .await
        .ok()
        .flatten();
    if meta_token.is_some() {
        info!("CSRF token found in a meta tag");
    }

    session.close().await.expect("failed to close");
    assert!(
        !found.is_empty(),
        "No CSRF tokens detected - the shop may be vulnerable to CSRF"
    );
    info!("CSRF indicators found: {:?}", found);
}

#[tokio::test]
#[ignore] // Security checks are opt-in
async fn test_input_validation() {
    let session = Session::start().await.expect("failed to start session");
    let home = session.home_page().await.expect("failed to open home page");

    for payload in input_validation_payloads() {
        let label = payload_label(&payload);
        if let Err(e) = home.perform_search(&payload).await {
            if e.is_timeout() {
                let name: String = label.chars().take(20).collect();
                home.save_artifact(&format!("timeout_error_{name}.png")).await;
            }
            panic!("Search with payload '{label}' failed: {e}");
        }
        home.page()
            .wait_for_load_state(
                LoadState::DomContentLoaded,
                WaitConfig::with_timeout(Duration::from_secs(30)),
            )
            .await
            .expect("results page should load");

        if home.is_blocked_by_waf().await.expect("read page") {
            info!("WAF blocked validation payload: {}", label);
            continue;
        }

        let content = home.get_page_content().await.expect("page content");
        let findings = input_validation_findings(&content, &payload);
        assert!(
            findings.is_empty(),
            "Payload '{label}' produced: {findings:?}"
        );
        info!("Payload '{}' - no validation issue detected", label);
    }

    session.close().await.expect("failed to close");
}

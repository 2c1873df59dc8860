//! Page objects against a local stand-in for the storefront.
//!
//! The pages served here copy only the markup the page objects rely on.
//! Chrome is still required, so everything is `#[ignore]`:
//! cargo test --package shopcheck-pages --test page_objects -- --ignored

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use shopcheck_browser::BrowserError;
use shopcheck_pages::fixtures::{init_test_logging, Session};
use shopcheck_pages::{BasePage, MenuLink, SuiteConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Cookie banner and BHR marketing popup, both closable the way the real
/// ones are.
const INITIAL_POPUPS: &str = r#"
    <button onclick="this.remove()">Zezwól na wszystkie</button>
    <div class="bhr-board__canvas type--POPUP">
        Rabat!
        <span title="Kliknij tutaj!" onclick="this.parentElement.remove()">×</span>
    </div>
"#;

/// Three categories, two with submenus, sharing one holder whose content is
/// swapped on hover. Both submenus link to `/akcesoria/`.
const HOME_BODY: &str = r##"
    <div class="homepage-banners">Nowości</div>
    <nav>
        <div class="main-menu__item has-submenu" onmouseenter="show('iPhone')"><a href="/iphone/">iPhone</a></div>
        <div class="main-menu__item has-submenu" onmouseenter="show('Mac')"><a href="/mac/">Mac</a></div>
        <div class="main-menu__item"><a href="/promocje/">Promocje</a></div>
    </nav>
    <div class="submenu-holder"></div>
    <script>
        const menus = {
            iPhone: '<h3>iPhone</h3><a href="/iphone/16/">iPhone 16</a><a href="/akcesoria/">Akcesoria</a>',
            Mac: '<h3>Mac</h3><a href="/mac/air/">MacBook Air</a><a href="/akcesoria/">Akcesoria</a><a href="#">Więcej</a>',
        };
        function show(name) {
            document.querySelector('.submenu-holder').innerHTML = menus[name];
        }
    </script>
"##;

/// A buy button under a full-screen BHR overlay, and a button that is
/// never shown.
const OVERLAY_BODY: &str = r#"
    <button id="buy" onclick="document.body.dataset.bought = 'yes'">Do koszyka</button>
    <button id="ghost" style="display: none">Ukryty</button>
    <div id="bhr-items">
        <div style="position: fixed; inset: 0; background: rgba(0, 0, 0, .4)"
             onclick="document.getElementById('bhr-items').remove()"></div>
    </div>
"#;

fn document(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head><body>{body}</body></html>"
    ))
}

async fn spawn_shop() -> String {
    let app = Router::new()
        .route(
            "/",
            get(|| async { document("Sklep", &format!("{INITIAL_POPUPS}{HOME_BODY}")) }),
        )
        .route(
            "/ipad/test-ipad.html",
            get(|| async {
                document(
                    "Apple iPad",
                    &format!("{INITIAL_POPUPS}<h1 class=\"product-title\">Apple iPad</h1>"),
                )
            }),
        )
        .route("/overlay", get(|| async { document("Nakładka", OVERLAY_BODY) }));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn local_session(shop: &str, artifacts: &tempfile::TempDir) -> Session {
    init_test_logging();
    let config = SuiteConfig {
        base_url: format!("{shop}/"),
        login_url: format!("{shop}/profil.html"),
        product_url: format!("{shop}/ipad/test-ipad.html"),
        artifacts_dir: artifacts.path().to_path_buf(),
        ..SuiteConfig::default()
    };
    Session::launch(config).await.expect("failed to start session")
}

async fn overlay_page(session: &Session, shop: &str) -> BasePage {
    let page = session.new_page().await.expect("tab");
    let base = BasePage::new(page, Arc::new(session.config().clone()))
        .await
        .expect("base page");
    base.page()
        .navigate(&format!("{shop}/overlay"))
        .await
        .expect("overlay page should load");
    base
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_product_page_stays_on_the_product_url() {
    let shop = spawn_shop().await;
    let artifacts = tempfile::tempdir().expect("tempdir");
    let session = local_session(&shop, &artifacts).await;

    let product = session.product_page().await.expect("tab");
    product
        .open_product_page()
        .await
        .expect("product page should load");

    let url = product.url().await.expect("url");
    assert_eq!(url, format!("{shop}/ipad/test-ipad.html"));
    assert_eq!(product.title().await.expect("title"), "Apple iPad");

    // Both popups were cleared on the product page itself.
    let content = product.page_content().await.expect("content");
    assert!(!content.contains("Zezwól na wszystkie"));
    assert!(!content.contains("bhr-board__canvas"));

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_safe_click_clears_the_bhr_overlay_and_retries() {
    let shop = spawn_shop().await;
    let artifacts = tempfile::tempdir().expect("tempdir");
    let session = local_session(&shop, &artifacts).await;
    let base = overlay_page(&session, &shop).await;

    let buy = base.page().locator("#buy");
    base.safe_click(&buy, Duration::from_secs(2))
        .await
        .expect("click should land after the overlay is closed");

    let bought: Option<String> = base
        .page()
        .evaluate("document.body.dataset.bought || null")
        .await
        .expect("evaluate");
    assert_eq!(bought.as_deref(), Some("yes"));
    assert_eq!(
        base.page().locator("#bhr-items").count().await.expect("count"),
        0
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_safe_click_on_a_hidden_target_times_out_without_retrying() {
    let shop = spawn_shop().await;
    let artifacts = tempfile::tempdir().expect("tempdir");
    let session = local_session(&shop, &artifacts).await;
    let base = overlay_page(&session, &shop).await;

    let ghost = base.page().locator("#ghost");
    let result = base.safe_click(&ghost, Duration::from_millis(800)).await;
    match result {
        Err(e @ BrowserError::WaitTimeout { .. }) => assert!(e.is_timeout()),
        other => panic!("expected WaitTimeout, got {other:?}"),
    }

    // The overlay was never touched, since the click was not intercepted.
    assert_eq!(
        base.page().locator("#bhr-items").count().await.expect("count"),
        1
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_menu_links_are_absolute_unique_and_in_order() {
    let shop = spawn_shop().await;
    let artifacts = tempfile::tempdir().expect("tempdir");
    let session = local_session(&shop, &artifacts).await;
    let home = session.home_page().await.expect("failed to open home page");

    let links = home
        .get_main_menu_links()
        .await
        .expect("menu links should be collected");

    let link = |text: &str, path: &str| MenuLink {
        text: text.to_string(),
        href: format!("{shop}{path}"),
    };
    assert_eq!(
        links,
        vec![
            link("iPhone 16", "/iphone/16/"),
            link("Akcesoria", "/akcesoria/"),
            link("MacBook Air", "/mac/air/"),
        ]
    );

    session.close().await.expect("failed to close");
}

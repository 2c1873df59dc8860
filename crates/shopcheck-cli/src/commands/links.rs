//! Links command: collect the main-menu links and check them over HTTP.

use crate::cli::LinksArgs;
use crate::commands::load_config;
use crate::error::{CliError, Result};
use crate::ui;
use shopcheck_pages::fixtures::Session;
use shopcheck_pages::{LinkChecker, MenuLink};
use std::path::Path;
use std::time::{Duration, Instant};

/// Collects every submenu link and reports the broken ones.
///
/// # Errors
///
/// Returns `InvalidArgument` for a zero concurrency, `ChecksFailed` if any
/// link is broken, or the underlying error if the links cannot be collected.
pub async fn execute(args: LinksArgs, config_path: Option<&Path>) -> Result<()> {
    if args.concurrency == Some(0) {
        return Err(CliError::InvalidArgument(
            "--concurrency must be at least 1".to_string(),
        ));
    }

    let mut config = load_config(config_path, args.headed)?;
    if let Some(concurrency) = args.concurrency {
        config.link_check.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        config.link_check.timeout_secs = timeout;
    }
    let link_check = config.link_check;

    ui::info("Collecting main menu links...");
    let session = Session::launch(config).await?;
    let links = collect(&session).await;
    session.close().await?;
    let links = links?;

    if links.is_empty() {
        ui::error("No links found in the main menu");
        return Err(CliError::ChecksFailed {
            failed: 1,
            total: 1,
        });
    }
    ui::success(&format!("Collected {} links", links.len()));
    if args.list {
        for link in &links {
            eprintln!("  {} -> {}", link.text, link.href);
        }
    }

    let started = Instant::now();
    let checker = LinkChecker::new(
        Duration::from_secs(link_check.timeout_secs),
        link_check.concurrency,
    )?;
    let report = checker.check(&links).await;
    ui::print_link_summary(&report, started.elapsed());

    if report.is_healthy() {
        Ok(())
    } else {
        Err(CliError::ChecksFailed {
            failed: report.failures.len(),
            total: report.checked,
        })
    }
}

async fn collect(session: &Session) -> Result<Vec<MenuLink>> {
    let home = session.home_page().await?;
    Ok(home.get_main_menu_links().await?)
}

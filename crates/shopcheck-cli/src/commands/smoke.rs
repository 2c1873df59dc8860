//! Smoke command: does the storefront come up?

use crate::cli::SmokeArgs;
use crate::commands::load_config;
use crate::error::{CliError, Result};
use crate::ui;
use shopcheck_browser::{expect, expect_page};
use shopcheck_pages::fixtures::Session;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens the home page and checks its title and logo.
///
/// Both checks always run; the command fails if either does.
///
/// # Errors
///
/// Returns `ChecksFailed` if a check fails, or the underlying error if the
/// browser or the home page cannot be opened.
pub async fn execute(args: SmokeArgs, config_path: Option<&Path>) -> Result<()> {
    let started = Instant::now();
    let config = load_config(config_path, args.headed)?;
    ui::info(&format!("Opening {}", config.base_url));

    let session = Session::launch(config).await?;
    let outcome = run_checks(&session, &args.title).await;
    session.close().await?;
    let failed = outcome?;

    let total = 2;
    if failed > 0 {
        return Err(CliError::ChecksFailed { failed, total });
    }
    ui::success(&format!(
        "Smoke checks passed in {}",
        ui::format_duration(started.elapsed())
    ));
    Ok(())
}

/// Returns how many checks failed.
async fn run_checks(session: &Session, title: &str) -> Result<usize> {
    let home = session.home_page().await?;
    let mut failed = 0;

    match expect_page(home.page())
        .to_have_title(title, Duration::from_secs(5))
        .await
    {
        Ok(()) => ui::success("Home page title matches"),
        Err(e) => {
            failed += 1;
            let actual = home.title().await.unwrap_or_default();
            ui::error(&format!("Unexpected title '{actual}': {e}"));
        }
    }

    match expect(&home.logo())
        .to_be_visible(Duration::from_secs(10))
        .await
    {
        Ok(()) => ui::success("Logo is visible"),
        Err(e) => {
            failed += 1;
            ui::error(&format!("Logo is not visible: {e}"));
            home.save_artifact("smoke_logo_missing.png").await;
        }
    }

    Ok(failed)
}

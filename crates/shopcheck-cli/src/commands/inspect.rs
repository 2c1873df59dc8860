//! Inspect command: a visible browser on the cleaned-up storefront.

use crate::cli::InspectArgs;
use crate::commands::load_config;
use crate::error::{CliError, Result};
use crate::ui;
use shopcheck_pages::fixtures::Session;
use std::path::Path;

/// Opens the home page in a visible browser and waits for Ctrl-C.
///
/// # Errors
///
/// Returns `InvalidArgument` when run in CI, or the underlying error if the
/// browser or page cannot be opened.
pub async fn execute(args: InspectArgs, config_path: Option<&Path>) -> Result<()> {
    if ui::is_ci() {
        return Err(CliError::InvalidArgument(
            "inspect needs a display and cannot run in CI".to_string(),
        ));
    }

    let config = load_config(config_path, true)?;
    let session = Session::launch(config).await?;
    let result = explore(&session, args.url.as_deref()).await;
    session.close().await?;
    result
}

async fn explore(session: &Session, url: Option<&str>) -> Result<()> {
    let home = session.home_page().await?;
    if let Some(url) = url {
        home.page().navigate(url).await?;
    }

    ui::success(&format!("Browser ready at {}", home.url().await?));
    ui::info("Interact with the page, then press Ctrl-C to close it.");
    home.page().pause().await?;
    ui::info("Closing browser");
    Ok(())
}

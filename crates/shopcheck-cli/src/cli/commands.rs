use clap::{Args, Subcommand};

/// Available shopcheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the home page loads with the right title and logo
    ///
    /// Opens the storefront, clears the cookie banner and popups, then
    /// asserts the page title and that the logo is visible.
    Smoke(SmokeArgs),

    /// Check every main-menu link over HTTP
    ///
    /// Hovers each menu category, collects its submenu links and fetches
    /// them. Exits with a non-zero status if any link is broken.
    Links(LinksArgs),

    /// Open a visible browser on the cleaned-up home page
    ///
    /// Useful for finding selectors by hand. Press Ctrl-C to close.
    Inspect(InspectArgs),
}

/// Arguments for the smoke command
#[derive(Args, Debug)]
pub struct SmokeArgs {
    /// Expected document title of the home page
    #[arg(
        long,
        default_value = "iDream Apple Sklep internetowy - Apple Premium Reseller Polska"
    )]
    pub title: String,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

/// Arguments for the links command
#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Number of links fetched at once (overrides the config)
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (overrides the config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print every collected link before checking
    #[arg(long)]
    pub list: bool,

    /// Show the browser window while collecting links
    #[arg(long)]
    pub headed: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Open this URL instead of the home page, after the popups are cleared
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

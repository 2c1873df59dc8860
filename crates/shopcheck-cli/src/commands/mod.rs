//! Command implementations.
//!
//! - [`smoke`] - home page title and logo
//! - [`links`] - main-menu link health
//! - [`inspect`] - interactive browser session
//!
//! Each module exposes an `execute` function taking its parsed arguments and
//! the optional `--config` path.

pub mod inspect;
pub mod links;
pub mod smoke;

pub use inspect::execute as inspect_execute;
pub use links::execute as links_execute;
pub use smoke::execute as smoke_execute;

use crate::error::Result;
use shopcheck_pages::SuiteConfig;
use std::path::Path;

/// Loads the suite configuration, forcing a visible browser when `headed`.
pub(crate) fn load_config(path: Option<&Path>, headed: bool) -> Result<SuiteConfig> {
    let mut config = SuiteConfig::load(path)?;
    if headed {
        config.headless = false;
    }
    tracing::debug!("Using configuration: {:?}", config);
    Ok(config)
}

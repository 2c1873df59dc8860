//! Suite configuration.
//!
//! Values are layered with figment, later sources winning:
//!
//! 1. built-in defaults (the production storefront)
//! 2. `shopcheck.toml` in the working directory, or an explicit path
//! 3. `SHOPCHECK_*` environment variables, `__` separating nested keys
//!    (`SHOPCHECK_CREDENTIALS__EMAIL`, `SHOPCHECK_VIEWPORT__WIDTH`)
//!
//! Login credentials have no default and are never written to logs.

use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use shopcheck_browser::{LaunchOptions, StaticSite};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "shopcheck.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SHOPCHECK_";

/// Browser viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Storefront account used by the login check.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for the menu link health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCheckConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// How many links are fetched at once.
    pub concurrency: usize,
}

impl LinkCheckConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LinkCheckConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            concurrency: 4,
        }
    }
}

/// Everything the page objects and fixtures need to know about a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Storefront home page.
    pub base_url: String,
    /// Login / profile page.
    pub login_url: String,
    /// Product used by the product page checks.
    pub product_url: String,
    /// Run Chrome without a window.
    pub headless: bool,
    /// Viewport applied to every page object.
    pub viewport: Viewport,
    /// Where failure screenshots go.
    pub artifacts_dir: PathBuf,
    /// Chrome executable; auto-detected when absent.
    #[serde(default)]
    pub chrome_path: Option<String>,
    /// Account for the login check; the check is skipped when absent.
    #[serde(default)]
    pub credentials: Option<Credentials>,
    pub link_check: LinkCheckConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://idream.pl/".to_string(),
            login_url: "https://idream.pl/profil.html".to_string(),
            product_url: "https://idream.pl/ipad/apple-ipad-11-wi-fi-128gb-11-gen-niebieski.html"
                .to_string(),
            headless: true,
            viewport: Viewport::default(),
            artifacts_dir: PathBuf::from("target/shopcheck-artifacts"),
            chrome_path: None,
            credentials: None,
            link_check: LinkCheckConfig::default(),
        }
    }
}

impl SuiteConfig {
    /// Loads configuration from defaults, the TOML file and the environment.
    ///
    /// With `path = None`, `shopcheck.toml` is used only if it exists. An
    /// explicit path that does not exist is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?.extract_config()
    }

    /// Builds the layered figment without extracting it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an explicit path does not exist.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match path {
            Some(p) if !p.exists() => {
                return Err(ConfigError::InvalidValue {
                    field: "config".to_string(),
                    value: p.display().to_string(),
                    hint: "The config file does not exist".to_string(),
                }
                .into())
            }
            Some(p) => Some(p.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!("Loading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("base_url", &self.base_url),
            ("login_url", &self.login_url),
            ("product_url", &self.product_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: url.clone(),
                    hint: "URLs must start with http:// or https://".to_string(),
                }
                .into());
            }
        }

        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "viewport".to_string(),
                value: format!("{}x{}", self.viewport.width, self.viewport.height),
                hint: "Both viewport dimensions must be positive".to_string(),
            }
            .into());
        }

        if self.link_check.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "link_check.concurrency".to_string(),
                value: "0".to_string(),
                hint: "At least one link must be checked at a time".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Returns the credentials or an error explaining how to provide them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when no credentials are configured.
    pub fn require_credentials(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or_else(|| {
            ConfigError::MissingField {
                field: "credentials".to_string(),
                hint: format!(
                    "Set {ENV_PREFIX}CREDENTIALS__EMAIL and {ENV_PREFIX}CREDENTIALS__PASSWORD"
                ),
            }
            .into()
        })
    }

    /// The storefront as a [`shopcheck_browser::Site`].
    #[must_use]
    pub fn site(&self) -> StaticSite {
        StaticSite::new(self.base_url.clone())
    }

    /// Browser launch settings derived from this configuration.
    #[must_use]
    pub fn browser_config(&self) -> LaunchOptions {
        let mut config = LaunchOptions::new()
            .with_window_size(self.viewport.width, self.viewport.height);
        if !self.headless {
            config = config.visible();
        }
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path.clone());
        }
        config
    }

    /// Path of a named failure artifact inside `artifacts_dir`.
    #[must_use]
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        let file: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || "._-".contains(c) { c } else { '_' })
            .collect();
        self.artifacts_dir.join(file)
    }
}

trait ExtractConfig {
    fn extract_config(self) -> Result<SuiteConfig>;
}

impl ExtractConfig for Figment {
    fn extract_config(self) -> Result<SuiteConfig> {
        let config: SuiteConfig = self.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for (key, _) in std::env::vars() {
            if key.starts_with(ENV_PREFIX) {
                unsafe { std::env::remove_var(key); }
            }
        }
    }

    #[test]
    fn defaults_point_at_production_storefront() {
        let config = SuiteConfig::default();
        assert_eq!(config.base_url, "https://idream.pl/");
        assert_eq!(config.login_url, "https://idream.pl/profil.html");
        assert_eq!(config.viewport, Viewport { width: 1920, height: 1080 });
        assert!(config.credentials.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
headless = false

[viewport]
width = 768
height = 1024

[link_check]
concurrency = 2
"#
        )
        .expect("write");

        let config = SuiteConfig::load(Some(file.path())).expect("load");
        assert!(!config.headless);
        assert_eq!(config.viewport, Viewport { width: 768, height: 1024 });
        assert_eq!(config.link_check.concurrency, 2);
        assert_eq!(config.link_check.timeout_secs, 10);
        assert_eq!(config.base_url, "https://idream.pl/");
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "base_url = \"https://staging.idream.pl/\"").expect("write");

        unsafe { std::env::set_var("SHOPCHECK_BASE_URL", "https://preview.idream.pl/"); }
        unsafe { std::env::set_var("SHOPCHECK_CREDENTIALS__EMAIL", "qa@example.com"); }
        unsafe { std::env::set_var("SHOPCHECK_CREDENTIALS__PASSWORD", "secret"); }

        let config = SuiteConfig::load(Some(file.path()));
        clear_env();
        let config = config.expect("load");

        assert_eq!(config.base_url, "https://preview.idream.pl/");
        let credentials = config.require_credentials().expect("credentials");
        assert_eq!(credentials.email, "qa@example.com");
        assert!(!format!("{credentials:?}").contains("secret"));
    }

    #[test]
    #[serial]
    fn missing_explicit_file_is_an_error() {
        clear_env();
        let result = SuiteConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(
            result,
            Err(crate::SuiteError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn validate_rejects_bad_urls_and_sizes() {
        let mut config = SuiteConfig {
            base_url: "idream.pl".to_string(),
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_err());

        config.base_url = "https://idream.pl/".to_string();
        config.viewport.width = 0;
        assert!(config.validate().is_err());

        config.viewport.width = 375;
        config.link_check.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn require_credentials_explains_env_vars() {
        let err = SuiteConfig::default()
            .require_credentials()
            .expect_err("no credentials by default");
        assert!(err.to_string().contains("SHOPCHECK_CREDENTIALS__EMAIL"));
    }

    #[test]
    fn artifact_names_are_sanitized() {
        let config = SuiteConfig::default();
        let path = config.artifact_path("error_hover_Apple Watch/Ultra.png");
        assert_eq!(
            path,
            PathBuf::from("target/shopcheck-artifacts/error_hover_Apple_Watch_Ultra.png")
        );
    }

    #[test]
    fn browser_config_follows_headless_and_viewport() {
        let config = SuiteConfig {
            headless: false,
            viewport: Viewport { width: 375, height: 812 },
            ..SuiteConfig::default()
        };
        let browser = config.browser_config();
        assert!(!browser.headless);
        assert_eq!(browser.window_size, (375, 812));
    }
}

//! The website under test.
//!
//! Page objects never hard-code a host: they ask a [`Site`] for absolute
//! URLs. That keeps the storefront address configurable and gives link
//! collection one place to turn relative `href`s into absolute ones.

use std::fmt;

/// A website that tests navigate to.
pub trait Site: Send + Sync {
    /// Returns the base URL of the site (e.g. `https://shop.example/`).
    fn base_url(&self) -> &str;

    /// Joins a path to the base URL with exactly one slash between them.
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Turns an `href` scraped from the page into an absolute URL.
    ///
    /// Root-relative paths are joined to the base URL, absolute `http(s)`
    /// URLs pass through, and protocol-relative URLs get `https:`. Fragment,
    /// `javascript:`, `mailto:` and `tel:` links are not navigable and
    /// yield `None`.
    fn absolutize(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        let lower = href.to_ascii_lowercase();
        if ["javascript:", "mailto:", "tel:"]
            .iter()
            .any(|scheme| lower.starts_with(scheme))
        {
            return None;
        }

        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(href.to_string())
        } else if let Some(rest) = href.strip_prefix("//") {
            Some(format!("https://{rest}"))
        } else {
            Some(self.url(href))
        }
    }
}

impl fmt::Debug for dyn Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// A site at a fixed, externally managed address.
#[derive(Debug, Clone)]
pub struct StaticSite {
    base_url: String,
}

impl StaticSite {
    /// Creates a site rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Site for StaticSite {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining() {
        let site = StaticSite::new("https://idream.pl");
        assert_eq!(site.url("/profil.html"), "https://idream.pl/profil.html");
        assert_eq!(site.url("profil.html"), "https://idream.pl/profil.html");

        let with_slash = StaticSite::new("https://idream.pl/");
        assert_eq!(with_slash.url("/iphone/"), "https://idream.pl/iphone/");
    }

    #[test]
    fn absolutize_relative_and_absolute() {
        let site = StaticSite::new("https://idream.pl/");
        assert_eq!(
            site.absolutize("/mac/macbook-air/").as_deref(),
            Some("https://idream.pl/mac/macbook-air/")
        );
        assert_eq!(
            site.absolutize("https://www.apple.com/pl/").as_deref(),
            Some("https://www.apple.com/pl/")
        );
        assert_eq!(
            site.absolutize("//cdn.example/img.png").as_deref(),
            Some("https://cdn.example/img.png")
        );
    }

    #[test]
    fn absolutize_skips_non_navigable_links() {
        let site = StaticSite::new("https://idream.pl/");
        assert_eq!(site.absolutize(""), None);
        assert_eq!(site.absolutize("#top"), None);
        assert_eq!(site.absolutize("javascript:void(0)"), None);
        assert_eq!(site.absolutize("MAILTO:sklep@idream.pl"), None);
        assert_eq!(site.absolutize("tel:+48123456789"), None);
    }
}

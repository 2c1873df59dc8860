//! HTTP health check for links scraped from the storefront.
//!
//! Links are fetched outside the browser with a plain GET that follows
//! redirects. Anything that ends in a 4xx/5xx or never answers is reported;
//! the checker itself only fails if the HTTP client cannot be built.

use crate::error::Result;
use crate::home_page::MenuLink;
use futures::stream::{self, StreamExt};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One link that did not check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkFailure {
    /// The link had no URL to follow.
    EmptyHref { text: String },
    /// The server answered with an error status.
    BadStatus {
        text: String,
        href: String,
        status: u16,
    },
    /// The request failed before a response arrived.
    Unreachable {
        text: String,
        href: String,
        error: String,
    },
}

impl fmt::Display for LinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkFailure::EmptyHref { text } => write!(f, "Link '{text}' has an empty href"),
            LinkFailure::BadStatus { text, href, status } => {
                write!(f, "Link '{text}' ({href}) returned status {status}")
            }
            LinkFailure::Unreachable { text, href, error } => {
                write!(f, "Link '{text}' ({href}) is unreachable: {error}")
            }
        }
    }
}

/// Outcome of checking a batch of links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// How many links were checked.
    pub checked: usize,
    /// Failures in the order the links were given.
    pub failures: Vec<LinkFailure>,
}

impl LinkReport {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_healthy() {
            return write!(f, "All {} links are healthy", self.checked);
        }
        write!(
            f,
            "{} of {} links are broken:",
            self.failures.len(),
            self.checked
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

/// Fetches links concurrently and collects the broken ones.
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: reqwest::Client,
    concurrency: usize,
}

impl LinkChecker {
    /// Builds a checker with a per-request `timeout` and at most
    /// `concurrency` requests in flight.
    ///
    /// # Errors
    ///
    /// Returns `SuiteError::Http` if the HTTP client cannot be created.
    pub fn new(timeout: Duration, concurrency: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("shopcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
        })
    }

    /// Checks every link and reports failures in input order.
    pub async fn check(&self, links: &[MenuLink]) -> LinkReport {
        info!(
            "Checking {} links ({} at a time)",
            links.len(),
            self.concurrency
        );

        let failures: Vec<LinkFailure> = stream::iter(links)
            .map(|link| self.check_one(link))
            .buffered(self.concurrency)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;

        LinkReport {
            checked: links.len(),
            failures,
        }
    }

    async fn check_one(&self, link: &MenuLink) -> Option<LinkFailure> {
        let text = link.text.clone();
        let href = link.href.trim();
        if href.is_empty() {
            warn!("Link '{}' has an empty href", text);
            return Some(LinkFailure::EmptyHref { text });
        }

        debug!("Checking link '{}' -> {}", text, href);
        match self.client.get(href).send().await {
            Ok(response) if response.status().as_u16() >= 400 => {
                let status = response.status().as_u16();
                warn!("Link '{}' ({}) returned {}", text, href, status);
                Some(LinkFailure::BadStatus {
                    text,
                    href: href.to_string(),
                    status,
                })
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Link '{}' ({}) failed: {}", text, href, e);
                Some(LinkFailure::Unreachable {
                    text,
                    href: href.to_string(),
                    error: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Redirect;
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serves `/ok` with 200, `/moved` as a redirect to `/ok`, and 404
    /// for everything else.
    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/moved", get(|| async { Redirect::permanent("/ok") }))
            .fallback(|| async { StatusCode::NOT_FOUND });

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{addr}")
    }

    fn link(text: &str, href: &str) -> MenuLink {
        MenuLink {
            text: text.to_string(),
            href: href.to_string(),
        }
    }

    #[tokio::test]
    async fn reports_failures_in_input_order() {
        let base = spawn_server().await;
        let checker = LinkChecker::new(Duration::from_secs(5), 2).expect("client");

        let links = vec![
            link("iPhone", &format!("{base}/ok")),
            link("Stary link", &format!("{base}/moved")),
            link("Brak", &format!("{base}/missing")),
            link("Pusty", ""),
        ];
        let report = checker.check(&links).await;

        assert_eq!(report.checked, 4);
        assert_eq!(
            report.failures,
            vec![
                LinkFailure::BadStatus {
                    text: "Brak".to_string(),
                    href: format!("{base}/missing"),
                    status: 404,
                },
                LinkFailure::EmptyHref {
                    text: "Pusty".to_string()
                },
            ]
        );
        assert!(!report.is_healthy());
    }

    #[tokio::test]
    async fn unreachable_hosts_are_reported() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let checker = LinkChecker::new(Duration::from_secs(2), 1).expect("client");
        let report = checker
            .check(&[link("Offline", &format!("http://{addr}/"))])
            .await;

        assert!(matches!(
            report.failures.as_slice(),
            [LinkFailure::Unreachable { text, .. }] if text == "Offline"
        ));
    }

    #[tokio::test]
    async fn empty_batch_is_healthy() {
        let checker = LinkChecker::new(Duration::from_secs(1), 4).expect("client");
        let report = checker.check(&[]).await;
        assert!(report.is_healthy());
        assert_eq!(report.to_string(), "All 0 links are healthy");
    }

    #[test]
    fn report_lists_each_failure_on_its_own_line() {
        let report = LinkReport {
            checked: 3,
            failures: vec![
                LinkFailure::EmptyHref {
                    text: "Akcesoria".to_string(),
                },
                LinkFailure::BadStatus {
                    text: "Mac".to_string(),
                    href: "https://idream.pl/mac/".to_string(),
                    status: 500,
                },
            ],
        };
        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "2 of 3 links are broken:");
        assert_eq!(lines[1], "  - Link 'Akcesoria' has an empty href");
        assert_eq!(
            lines[2],
            "  - Link 'Mac' (https://idream.pl/mac/) returned status 500"
        );
    }
}

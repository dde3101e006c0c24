use std::time::Duration;

use log::debug;
use reqwest::{Client, ClientBuilder};

use crate::{
    error::{Result, ScrapeError},
    ratelimit::RateLimiter,
};

/// When a navigated page counts as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Wait a fixed time after navigation.
    Settle(Duration),
    /// Poll until `css` matches or `timeout` elapses, then wait `settle`.
    Selector {
        css: String,
        timeout: Duration,
        poll_interval: Duration,
        settle: Duration,
    },
}

impl Readiness {
    pub fn settle(&self) -> Duration {
        match self {
            Readiness::Settle(settle) | Readiness::Selector { settle, .. } => *settle,
        }
    }
}

/// Returns the rendered markup of a page.
///
/// A page that is still loading when readiness gives up is returned as-is.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str, readiness: &Readiness) -> Result<String>;
}

/// Plain HTTP fetcher for pages that render on the server.
pub struct HttpFetcher {
    client: Client,
    rate_limiter: RateLimiter,
}

impl HttpFetcher {
    pub fn new(rate_limiter: RateLimiter) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ScrapeError::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, readiness: &Readiness) -> Result<String> {
        self.rate_limiter.wait_until_ready().await;

        let http_err = |source| ScrapeError::Http {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(http_err)?;
        let body = response.text().await.map_err(http_err)?;
        debug!("fetched {} bytes from {url}", body.len());

        // There is no script to wait for; only the settle time applies.
        tokio::time::sleep(readiness.settle()).await;
        Ok(body)
    }
}

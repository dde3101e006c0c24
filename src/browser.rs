use std::time::Duration;

use chromiumoxide::{
    Page,
    browser::{Browser, BrowserConfig},
};
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::{task::JoinHandle, time::Instant};

use crate::{
    error::{Result, ScrapeError},
    ratelimit::RateLimiter,
    requests::{PageFetcher, Readiness},
};

/// Headless Chrome owned by one scraping run.
///
/// All navigations reuse a single tab. Call [`BrowserSession::close`] when
/// the run ends, whether it succeeded or not.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    rate_limiter: RateLimiter,
}

impl BrowserSession {
    pub async fn launch(rate_limiter: RateLimiter) -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1920, 1080)
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(ScrapeError::BrowserLaunch)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler event error: {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(ScrapeError::BrowserLaunch(e.to_string()));
            }
        };
        info!("headless browser started");

        Ok(Self {
            browser,
            handler_task,
            page,
            rate_limiter,
        })
    }

    /// Shuts the browser process down. Errors are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("closing browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("waiting for browser to exit: {e}");
        }
        self.handler_task.abort();
        info!("headless browser closed");
    }

    async fn wait_for_selector(&self, css: &str, timeout: Duration, poll_interval: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(css).await.is_ok() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

impl PageFetcher for BrowserSession {
    async fn fetch(&self, url: &str, readiness: &Readiness) -> Result<String> {
        self.rate_limiter.wait_until_ready().await;

        let browser_err = |source| ScrapeError::Browser {
            url: url.to_string(),
            source,
        };
        self.page.goto(url).await.map_err(browser_err)?;

        if let Readiness::Selector {
            css,
            timeout,
            poll_interval,
            ..
        } = readiness
        {
            if self.wait_for_selector(css, *timeout, *poll_interval).await {
                debug!("{css} present on {url}");
            } else {
                warn!("{css} not present on {url} after {timeout:?}, parsing page as-is");
            }
        }
        tokio::time::sleep(readiness.settle()).await;

        self.page.content().await.map_err(browser_err)
    }
}

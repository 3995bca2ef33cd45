// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::domain::models::scraped_job::ScrapeMode;
use crate::engines::challenge::looks_like_challenge;
use crate::engines::traits::{FetchedPage, ScraperEngine, DEFAULT_USER_AGENT};
use crate::utils::errors::{ScrapeError, ScrapeErrorCode, FETCH_FAILED_MESSAGE};
use crate::utils::validators::assert_allowed_host;

// Using chromiumoxide as Rust alternative to Playwright.

/// Fixed desktop viewport; job pages shift to a reduced layout below ~1200px.
const VIEWPORT_WIDTH: u32 = 1440;
const VIEWPORT_HEIGHT: u32 = 1024;

/// Upper bound on the post-challenge reload wait, whatever the nav timeout.
const MAX_CHALLENGE_RELOAD_MS: u64 = 15_000;

#[derive(Debug, Error)]
#[error("{0}")]
struct BrowserFailure(String);

fn fetch_failure(err: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::with_cause(
        ScrapeErrorCode::ScrapeFailed,
        FETCH_FAILED_MESSAGE,
        BrowserFailure(err.to_string()),
    )
}

/// Browser engine: renders the page in a headless Chromium session so
/// client-side markup and challenge scripts run before extraction.
///
/// Every fetch launches its own browser process. That trades warm-start
/// latency for isolation: no cookies, storage, or challenge state leaks
/// between scrapes, and teardown is deterministic.
pub struct PlaywrightEngine {
    settings: Arc<Settings>,
}

impl PlaywrightEngine {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .viewport(Some(Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
                device_scale_factor: Some(1.0),
                ..Default::default()
            }))
            .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
            .request_timeout(Duration::from_millis(self.settings.nav_timeout_ms))
            .args([
                "--disable-gpu",
                "--disable-dev-shm-usage",
                "--disable-blink-features=AutomationControlled",
                "--lang=en-US",
            ]);
        if !self.settings.headless {
            builder = builder.with_head();
        }
        builder.build().map_err(fetch_failure)
    }

    /// Navigate, wait out any challenge, and capture the final page state.
    ///
    /// Probe reads (title/content for challenge detection) tolerate CDP
    /// errors as empty values; the final content read is fatal.
    async fn drive(&self, page: &Page, url: &str) -> Result<FetchedPage, ScrapeError> {
        page.set_user_agent(DEFAULT_USER_AGENT)
            .await
            .map_err(fetch_failure)?;

        let nav_timeout = Duration::from_millis(self.settings.nav_timeout_ms);
        timeout(nav_timeout, page.goto(url))
            .await
            .map_err(|_| fetch_failure("navigation timed out"))?
            .map_err(fetch_failure)?;

        // Let client-side rendering settle before the first read.
        sleep(Duration::from_millis(self.settings.settle_wait_ms)).await;

        if self.challenge_in_progress(page).await {
            info!(url, "challenge page detected, waiting for it to clear");
            sleep(Duration::from_millis(self.settings.challenge_wait_ms)).await;
            // The interstitial may or may not trigger a reload; move on
            // either way and let extraction judge what is on the page.
            let reload_window = nav_timeout.min(Duration::from_millis(MAX_CHALLENGE_RELOAD_MS));
            let _ = timeout(reload_window, page.wait_for_navigation()).await;
        }

        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());
        assert_allowed_host(&final_url)?;

        let page_title = page.get_title().await.ok().flatten();
        let html = page.content().await.map_err(fetch_failure)?;

        Ok(FetchedPage {
            html,
            final_url,
            page_title,
            mode: ScrapeMode::Playwright,
        })
    }

    async fn challenge_in_progress(&self, page: &Page) -> bool {
        let title = page.get_title().await.ok().flatten().unwrap_or_default();
        let html = page.content().await.unwrap_or_default();
        looks_like_challenge(&html, Some(&title))
    }
}

#[async_trait]
impl ScraperEngine for PlaywrightEngine {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let config = self.browser_config()?;

        info!(url, "launching browser for scrape");
        let (mut browser, mut handler) = Browser::launch(config).await.map_err(fetch_failure)?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        // Page work is isolated so teardown below runs on every path.
        let outcome = match browser.new_page("about:blank").await {
            Ok(page) => {
                let fetched = self.drive(&page, url).await;
                if let Err(close_err) = page.close().await {
                    debug!(error = %close_err, "page close failed");
                }
                fetched
            }
            Err(page_err) => Err(fetch_failure(page_err)),
        };

        if let Err(close_err) = browser.close().await {
            debug!(error = %close_err, "browser close failed");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        outcome
    }

    fn mode(&self) -> ScrapeMode {
        ScrapeMode::Playwright
    }
}

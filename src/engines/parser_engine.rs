// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::debug;

use crate::config::settings::Settings;
use crate::domain::models::scraped_job::ScrapeMode;
use crate::engines::traits::{FetchedPage, ScraperEngine, DEFAULT_USER_AGENT};
use crate::utils::errors::{ScrapeError, ScrapeErrorCode};
use crate::utils::validators::assert_allowed_host;

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const MAX_REDIRECTS: usize = 3;

/// HTTP fallback engine: one plain GET, then HTML parsing downstream.
///
/// Used when the browser path fails. It sees whatever the server returns
/// without JavaScript, so results from this engine are always flagged as
/// fallback-mode by the orchestrator.
pub struct ParserEngine {
    settings: Arc<Settings>,
    dns_overrides: Vec<(String, SocketAddr)>,
}

impl ParserEngine {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            dns_overrides: Vec::new(),
        }
    }

    /// Resolve `host` to a fixed address instead of DNS. Lets allow-listed
    /// hosts be served by a local mock; production wiring leaves this empty.
    pub fn with_dns_override(mut self, host: impl Into<String>, addr: SocketAddr) -> Self {
        self.dns_overrides.push((host.into(), addr));
        self
    }
}

#[async_trait]
impl ScraperEngine for ParserEngine {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        // Each request gets a fresh client: no cookies or connection state
        // carry over between scrapes.
        let mut builder = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_millis(self.settings.nav_timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        for (host, addr) in &self.dns_overrides {
            builder = builder.resolve(host, *addr);
        }
        let client = builder.build()?;

        debug!(url, "parser engine fetching");
        let response = client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?
            .error_for_status()?;

        let final_url = response.url().to_string();
        assert_allowed_host(&final_url)?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(ScrapeError::new(
                ScrapeErrorCode::ScrapeFailed,
                "Could not extract job details from non-HTML response",
            ));
        }

        let html = response.text().await?;
        debug!(final_url, bytes = html.len(), "parser engine fetched page");

        Ok(FetchedPage {
            html,
            final_url,
            page_title: None,
            mode: ScrapeMode::Parser,
        })
    }

    fn mode(&self) -> ScrapeMode {
        ScrapeMode::Parser
    }
}

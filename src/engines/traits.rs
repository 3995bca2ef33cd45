// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::scraped_job::ScrapeMode;
use crate::utils::errors::ScrapeError;

/// Desktop identity presented by every engine. Upwork serves a stripped
/// interstitial to obvious bot agents, so both paths claim the same browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Raw material an engine hands to the shared post-fetch pipeline.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Serialized DOM (browser path) or response body (HTTP path).
    pub html: String,
    /// URL the fetch actually landed on, after redirects.
    pub final_url: String,
    /// Document title when the engine can read one without parsing.
    pub page_title: Option<String>,
    /// Which engine produced this page.
    pub mode: ScrapeMode,
}

/// One fetch capability, two transports.
///
/// Engines own navigation, the second-stage host check on the final URL,
/// and their own resource teardown. They never extract job fields; that
/// stays in one shared place so the two paths cannot drift apart.
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// Fetch a validated job URL and return the page it settled on.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;

    /// The mode results from this engine are tagged with.
    fn mode(&self) -> ScrapeMode;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::domain::models::scraped_job::{ScrapeMode, ScrapedJob};
use crate::domain::services::extraction_service::{unique_non_empty, ExtractionService};
use crate::engines::challenge::looks_like_challenge;
use crate::engines::parser_engine::ParserEngine;
use crate::engines::playwright_engine::PlaywrightEngine;
use crate::engines::traits::{FetchedPage, ScraperEngine};
use crate::utils::errors::{ScrapeError, ScrapeErrorCode};
use crate::utils::validators::validate_upwork_url;

/// Appended whenever a result came out of the plain HTTP path.
pub const PARSER_FALLBACK_WARNING: &str = "Used parser fallback extraction mode";

/// Appended when extraction succeeded despite challenge markers on the page.
pub const CHALLENGE_PARTIAL_WARNING: &str =
    "Cloudflare markers were detected; extracted data may be partial";

/// User-facing message when protection markers explain an extraction failure.
pub const BLOCKED_MESSAGE: &str =
    "Could not fetch this URL due to page protection. Please fill fields manually and continue.";

/// Entry point of the scraping pipeline.
///
/// Validates the URL, runs the browser engine, and falls back to the plain
/// HTTP engine when the browser attempt fails. Both engines converge on the
/// same post-fetch steps here, so challenge classification and warning
/// handling cannot drift between the two paths.
pub struct ScrapeService {
    primary: Arc<dyn ScraperEngine>,
    fallback: Arc<dyn ScraperEngine>,
    settings: Arc<Settings>,
    extractor: ExtractionService,
}

impl ScrapeService {
    pub fn new(settings: Arc<Settings>) -> Self {
        let primary = Arc::new(PlaywrightEngine::new(settings.clone()));
        let fallback = Arc::new(ParserEngine::new(settings.clone()));
        Self::with_engines(settings, primary, fallback)
    }

    /// Wire the service with explicit engines. Production goes through
    /// [`ScrapeService::new`]; tests substitute scripted engines here.
    pub fn with_engines(
        settings: Arc<Settings>,
        primary: Arc<dyn ScraperEngine>,
        fallback: Arc<dyn ScraperEngine>,
    ) -> Self {
        let extractor = ExtractionService::new(settings.skills);
        Self {
            primary,
            fallback,
            settings,
            extractor,
        }
    }

    /// Scrape one job posting.
    ///
    /// Validation failures return before any network activity. A browser
    /// failure of any kind hands the URL to the HTTP fallback (unless that
    /// is disabled), and whatever the fallback produces, success or its own
    /// error, is the final outcome. The first attempt's error is dropped
    /// once a fallback attempt is made, keeping results single-cause.
    pub async fn scrape_job_url(&self, raw_url: &str) -> Result<ScrapedJob, ScrapeError> {
        let url = validate_upwork_url(raw_url)?;

        match self.attempt(&self.primary, &url).await {
            Ok(job) => Ok(job),
            Err(primary_error) => {
                if !self.settings.parser_fallback_enabled {
                    return Err(primary_error);
                }
                warn!(
                    "Browser scrape of {} failed ({}): {}, trying parser fallback",
                    url,
                    primary_error.code(),
                    primary_error
                );
                let job = self.attempt(&self.fallback, &url).await?;
                info!("Parser fallback recovered {}", url);
                Ok(job)
            }
        }
    }

    async fn attempt(
        &self,
        engine: &Arc<dyn ScraperEngine>,
        url: &str,
    ) -> Result<ScrapedJob, ScrapeError> {
        let page = engine.fetch(url).await?;
        self.complete(page)
    }

    /// Shared post-fetch pipeline: classify challenge markers, extract, and
    /// either annotate the result or upgrade the failure.
    fn complete(&self, page: FetchedPage) -> Result<ScrapedJob, ScrapeError> {
        let challenged = looks_like_challenge(&page.html, page.page_title.as_deref());

        match self.extractor.extract(&page.html, &page.final_url, page.mode) {
            Ok(mut job) => {
                if page.mode == ScrapeMode::Parser {
                    job.warnings.push(PARSER_FALLBACK_WARNING.to_string());
                }
                if challenged {
                    job.warnings.push(CHALLENGE_PARTIAL_WARNING.to_string());
                }
                job.warnings = unique_non_empty(&job.warnings);
                Ok(job)
            }
            Err(extract_error) if challenged => Err(ScrapeError::with_cause(
                ScrapeErrorCode::ScrapeBlockedCloudflare,
                BLOCKED_MESSAGE,
                extract_error,
            )),
            Err(extract_error) => Err(extract_error),
        }
    }
}

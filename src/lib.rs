// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Configuration module
///
/// Loads scraper settings from defaults, files, and environment variables
pub mod config;

/// Domain module
///
/// Core business entities and the extraction and orchestration services
pub mod domain;

/// Engines module
///
/// The browser-driven and plain-HTTP fetch engines and challenge detection
pub mod engines;

/// Utilities module
///
/// Error taxonomy, URL validation, and tracing setup
pub mod utils;

pub use config::settings::Settings;
pub use domain::models::scraped_job::{ScrapeMode, ScrapedJob};
pub use domain::services::scrape_service::ScrapeService;
pub use utils::errors::{normalize_scrape_error, ScrapeError, ScrapeErrorCode};
pub use utils::validators::validate_upwork_url;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use tracing::info;

use upwork_scraper::config::settings::Settings;
use upwork_scraper::domain::services::scrape_service::ScrapeService;
use upwork_scraper::utils::telemetry;

/// Scrape one Upwork job URL and print the result as JSON.
///
/// On failure the error code and message go to stderr and the process
/// exits non-zero, mirroring the code-to-status contract of the HTTP
/// layer this crate is embedded in.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Read the target URL
    let url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: upwork-scraper <job-url>"))?;

    // 3. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 4. Run the scrape
    let service = ScrapeService::new(settings);
    match service.scrape_job_url(&url).await {
        Ok(job) => {
            println!("{}", serde_json::to_string_pretty(&job)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}: {}", err.code(), err.message());
            std::process::exit(1);
        }
    }
}

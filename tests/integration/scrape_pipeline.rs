// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use upwork_scraper::config::settings::Settings;
use upwork_scraper::domain::models::scraped_job::ScrapeMode;
use upwork_scraper::domain::services::extraction_service::ExtractionService;
use upwork_scraper::engines::parser_engine::ParserEngine;
use upwork_scraper::engines::traits::{ScraperEngine, DEFAULT_USER_AGENT};
use upwork_scraper::utils::errors::{ScrapeErrorCode, FETCH_FAILED_MESSAGE};

const JOB_FIXTURE: &str = include_str!("../fixtures/upwork_job_sample.html");
const JOB_PATH: &str = "/jobs/~0123456789abcdef";
const JOB_URL: &str = "http://www.upwork.com/jobs/~0123456789abcdef";

/// Engine whose view of `www.upwork.com` is the given mock server.
///
/// The engine itself never re-checks the scheme (the validator owns that),
/// so plain-HTTP URLs reach the mock without TLS in the way.
fn engine_with(server: &MockServer, settings: Settings) -> ParserEngine {
    ParserEngine::new(Arc::new(settings)).with_dns_override("www.upwork.com", *server.address())
}

#[tokio::test]
async fn fetches_a_job_page_with_spoofed_headers() {
    let server = MockServer::start().await;

    // Only a request carrying the desktop identity headers matches.
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        // wiremock normalizes header values by splitting on commas, so
        // comma-containing values go through the multi-valued matcher.
        .and(headers(
            "User-Agent",
            DEFAULT_USER_AGENT.split(',').map(str::trim).collect(),
        ))
        .and(headers("Accept-Language", vec!["en-US", "en;q=0.9"]))
        .respond_with(ResponseTemplate::new(200).set_body_raw(JOB_FIXTURE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let page = engine.fetch(JOB_URL).await.unwrap();

    assert_eq!(page.mode, ScrapeMode::Parser);
    assert!(page.page_title.is_none());
    assert!(page.final_url.ends_with(JOB_PATH));
    assert!(page.html.contains("Build Billing Dashboard"));
}

#[tokio::test]
async fn fetched_page_extracts_into_a_complete_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(JOB_FIXTURE, "text/html"))
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let page = engine.fetch(JOB_URL).await.unwrap();

    let job = ExtractionService::default()
        .extract(&page.html, &page.final_url, page.mode)
        .unwrap();

    assert_eq!(job.title, "Build Billing Dashboard");
    assert!(job.description.contains("Node.js engineer"));
    assert_eq!(job.budget.as_deref(), Some("$35.00 - $60.00/hr"));
    assert_eq!(job.skills, "Node.js, PostgreSQL, REST API");
    assert_eq!(job.mode, ScrapeMode::Parser);
}

#[tokio::test]
async fn follows_redirects_within_the_allow_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs/~old"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", "http://www.upwork.com/jobs/~new"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/~new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(JOB_FIXTURE, "text/html"))
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let page = engine.fetch("http://www.upwork.com/jobs/~old").await.unwrap();

    assert!(page.final_url.ends_with("/jobs/~new"));
}

#[tokio::test]
async fn rejects_redirects_that_leave_the_allow_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "http://malicious.example/phish"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/phish"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default())
        .with_dns_override("malicious.example", *server.address());
    let err = engine.fetch(JOB_URL).await.unwrap_err();

    assert_eq!(err.code(), ScrapeErrorCode::UnsupportedDomain);
    assert_eq!(
        err.message(),
        "Only Upwork job URLs are supported in this version"
    );
}

#[tokio::test]
async fn gives_up_after_three_redirects() {
    let server = MockServer::start().await;

    for hop in 0..4 {
        Mock::given(method("GET"))
            .and(path(format!("/hop{hop}")))
            .respond_with(ResponseTemplate::new(302).insert_header(
                "Location",
                format!("http://www.upwork.com/hop{}", hop + 1).as_str(),
            ))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/hop4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(JOB_FIXTURE, "text/html"))
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let err = engine.fetch("http://www.upwork.com/hop0").await.unwrap_err();

    assert_eq!(err.code(), ScrapeErrorCode::ScrapeFailed);
    assert_eq!(err.message(), FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn rejects_non_html_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status":"ok"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let err = engine.fetch(JOB_URL).await.unwrap_err();

    assert_eq!(err.code(), ScrapeErrorCode::ScrapeFailed);
    assert_eq!(
        err.message(),
        "Could not extract job details from non-HTML response"
    );
}

#[tokio::test]
async fn tolerates_a_missing_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        // An empty mime string makes wiremock omit the Content-Type header;
        // set_body_string would tag the body as text/plain.
        .respond_with(ResponseTemplate::new(200).set_body_raw(JOB_FIXTURE, ""))
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let page = engine.fetch(JOB_URL).await.unwrap();

    assert!(page.html.contains("Build Billing Dashboard"));
}

#[tokio::test]
async fn surfaces_http_error_statuses_as_scrape_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let engine = engine_with(&server, Settings::default());
    let err = engine.fetch(JOB_URL).await.unwrap_err();

    assert_eq!(err.code(), ScrapeErrorCode::ScrapeFailed);
    assert_eq!(err.message(), FETCH_FAILED_MESSAGE);
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn bounds_slow_servers_by_the_navigation_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JOB_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(JOB_FIXTURE, "text/html")
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;

    let settings = Settings {
        nav_timeout_ms: 250,
        ..Settings::default()
    };
    let engine = engine_with(&server, settings);
    let err = engine.fetch(JOB_URL).await.unwrap_err();

    assert_eq!(err.code(), ScrapeErrorCode::ScrapeFailed);
    assert_eq!(err.message(), FETCH_FAILED_MESSAGE);
}

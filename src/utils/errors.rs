// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used whenever a lower-level failure is surfaced as a scrape failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch and parse this URL";

/// Machine-readable failure categories exposed to callers.
///
/// The wire representation is the SCREAMING_SNAKE_CASE code; the HTTP layer
/// sitting above this crate maps each code to a status via [`ScrapeErrorCode::http_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScrapeErrorCode {
    /// The input was not a usable HTTPS URL.
    InvalidUrl,
    /// The URL (or a redirect target) points outside the Upwork allow-list.
    UnsupportedDomain,
    /// The page answered with a Cloudflare challenge instead of job content.
    ScrapeBlockedCloudflare,
    /// Any other fetch or extraction failure.
    ScrapeFailed,
}

impl ScrapeErrorCode {
    /// Wire code string, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeErrorCode::InvalidUrl => "INVALID_URL",
            ScrapeErrorCode::UnsupportedDomain => "UNSUPPORTED_DOMAIN",
            ScrapeErrorCode::ScrapeBlockedCloudflare => "SCRAPE_BLOCKED_CLOUDFLARE",
            ScrapeErrorCode::ScrapeFailed => "SCRAPE_FAILED",
        }
    }

    /// Documented HTTP status mapping for the transport layer.
    pub fn http_status(&self) -> u16 {
        match self {
            ScrapeErrorCode::InvalidUrl => 400,
            ScrapeErrorCode::UnsupportedDomain => 400,
            ScrapeErrorCode::ScrapeBlockedCloudflare => 422,
            ScrapeErrorCode::ScrapeFailed => 500,
        }
    }
}

impl std::fmt::Display for ScrapeErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scrape failure carrying a code, a human message, and an optional cause.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ScrapeError {
    code: ScrapeErrorCode,
    message: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ScrapeError {
    pub fn new(code: ScrapeErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(
        code: ScrapeErrorCode,
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn code(&self) -> ScrapeErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::with_cause(ScrapeErrorCode::ScrapeFailed, FETCH_FAILED_MESSAGE, err)
    }
}

/// Collapse an arbitrary error into a [`ScrapeError`].
///
/// A [`ScrapeError`] anywhere in the chain passes through with its code and
/// message intact; anything else becomes a generic `SCRAPE_FAILED` with the
/// original error preserved as the cause.
pub fn normalize_scrape_error(err: anyhow::Error) -> ScrapeError {
    match err.downcast::<ScrapeError>() {
        Ok(scrape_err) => scrape_err,
        Err(other) => ScrapeError {
            code: ScrapeErrorCode::ScrapeFailed,
            message: FETCH_FAILED_MESSAGE.to_string(),
            cause: Some(other.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(ScrapeErrorCode::InvalidUrl.as_str(), "INVALID_URL");
        assert_eq!(ScrapeErrorCode::UnsupportedDomain.as_str(), "UNSUPPORTED_DOMAIN");
        assert_eq!(
            ScrapeErrorCode::ScrapeBlockedCloudflare.as_str(),
            "SCRAPE_BLOCKED_CLOUDFLARE"
        );
        assert_eq!(ScrapeErrorCode::ScrapeFailed.as_str(), "SCRAPE_FAILED");
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(ScrapeErrorCode::InvalidUrl.http_status(), 400);
        assert_eq!(ScrapeErrorCode::UnsupportedDomain.http_status(), 400);
        assert_eq!(ScrapeErrorCode::ScrapeBlockedCloudflare.http_status(), 422);
        assert_eq!(ScrapeErrorCode::ScrapeFailed.http_status(), 500);
    }

    #[test]
    fn code_serializes_as_wire_string() {
        let json = serde_json::to_string(&ScrapeErrorCode::ScrapeBlockedCloudflare).unwrap();
        assert_eq!(json, "\"SCRAPE_BLOCKED_CLOUDFLARE\"");
    }

    #[test]
    fn normalize_passes_scrape_errors_through() {
        let original = ScrapeError::new(ScrapeErrorCode::UnsupportedDomain, "nope");
        let normalized = normalize_scrape_error(anyhow::Error::new(original));
        assert_eq!(normalized.code(), ScrapeErrorCode::UnsupportedDomain);
        assert_eq!(normalized.message(), "nope");
    }

    #[test]
    fn normalize_wraps_unknown_errors_as_scrape_failed() {
        let normalized = normalize_scrape_error(anyhow::anyhow!("socket hangup"));
        assert_eq!(normalized.code(), ScrapeErrorCode::ScrapeFailed);
        assert_eq!(normalized.message(), FETCH_FAILED_MESSAGE);
        assert!(std::error::Error::source(&normalized).is_some());
    }

    #[test]
    fn display_is_the_human_message() {
        let err = ScrapeError::new(ScrapeErrorCode::InvalidUrl, "Invalid URL format");
        assert_eq!(err.to_string(), "Invalid URL format");
    }
}

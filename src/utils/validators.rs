// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::utils::errors::{ScrapeError, ScrapeErrorCode};

/// Hosts a job URL may point at, before or after redirects.
pub const ALLOWED_UPWORK_HOSTS: [&str; 2] = ["upwork.com", "www.upwork.com"];

/// Case-insensitive membership in the host allow-list.
pub fn is_allowed_host(host: &str) -> bool {
    let lowered = host.to_ascii_lowercase();
    ALLOWED_UPWORK_HOSTS.contains(&lowered.as_str())
}

/// Second-stage host check, applied to every final URL an engine observes
/// after redirects have settled.
pub fn assert_allowed_host(url_value: &str) -> Result<(), ScrapeError> {
    let parsed = Url::parse(url_value)
        .map_err(|_| ScrapeError::new(ScrapeErrorCode::InvalidUrl, "Invalid URL format"))?;
    let host = parsed.host_str().unwrap_or_default();
    if !is_allowed_host(host) {
        return Err(ScrapeError::new(
            ScrapeErrorCode::UnsupportedDomain,
            "Only Upwork job URLs are supported in this version",
        ));
    }
    Ok(())
}

/// Validate and canonicalize a caller-supplied job URL.
///
/// Accepts HTTPS URLs on the Upwork allow-list, strips any fragment, and
/// returns the canonical string. Pure and idempotent: validating its own
/// output yields the same string.
pub fn validate_upwork_url(input: &str) -> Result<String, ScrapeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::new(
            ScrapeErrorCode::InvalidUrl,
            "A valid URL is required",
        ));
    }

    let mut parsed = Url::parse(trimmed)
        .map_err(|_| ScrapeError::new(ScrapeErrorCode::InvalidUrl, "Invalid URL format"))?;

    if parsed.scheme() != "https" {
        return Err(ScrapeError::new(
            ScrapeErrorCode::InvalidUrl,
            "Only HTTPS URLs are supported",
        ));
    }

    assert_allowed_host(parsed.as_str())?;

    // Fragments are client-side only and never change what the server returns.
    parsed.set_fragment(None);
    Ok(parsed.into())
}

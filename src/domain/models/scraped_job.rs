// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// Which fetch path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMode {
    /// Headless-browser fetch over CDP.
    Playwright,
    /// Plain HTTP fetch with HTML parsing.
    Parser,
}

impl ScrapeMode {
    /// Wire literal, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeMode::Playwright => "playwright",
            ScrapeMode::Parser => "parser",
        }
    }
}

impl std::fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured description of one Upwork job posting.
///
/// Extraction is best-effort beyond the required fields: a missing budget is
/// `None`, missing skills an empty string, and every low-confidence field is
/// called out in `warnings` so the caller can prompt for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedJob {
    /// Canonicalized URL the scrape was asked for.
    pub url: String,
    /// Job title as shown on the posting.
    pub title: String,
    /// Job description converted to markdown.
    pub description: String,
    /// Budget or rate text, verbatim from the page.
    pub budget: Option<String>,
    /// Skill tags, comma-joined in page order. Empty when none were found.
    pub skills: String,
    /// Fetch path that produced this result.
    pub mode: ScrapeMode,
    /// Human-readable notes about fields that could not be detected.
    pub warnings: Vec<String>,
}

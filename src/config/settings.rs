// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Scraper configuration.
///
/// Values come from code defaults, then optional `config/*.toml` files,
/// then environment variables with the `SCRAPER` prefix and `__` separator
/// (e.g. `SCRAPER__NAV_TIMEOUT_MS=45000`, `SCRAPER__SKILLS__WINDOW_CHARS=300`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Upper bound on navigation and on the whole fallback GET, in ms.
    pub nav_timeout_ms: u64,
    /// Pause after navigation so client-side rendering can settle, in ms.
    pub settle_wait_ms: u64,
    /// Pause granted to a detected challenge before re-reading the page, in ms.
    pub challenge_wait_ms: u64,
    /// Whether the HTTP parser fallback runs when the browser path fails.
    pub parser_fallback_enabled: bool,
    /// Whether the browser launches headless.
    pub headless: bool,
    /// Tuning for the text-window skills fallback.
    pub skills: SkillsHeuristics,
}

/// Bounds for the skills text-window heuristic. These mirror how the Upwork
/// sidebar lays out tags and are deliberately configuration, not semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SkillsHeuristics {
    /// Characters scanned after a "Skills" section header.
    pub window_chars: usize,
    /// Shortest fragment kept as a skill tag.
    pub min_token_chars: usize,
    /// Longest fragment kept as a skill tag.
    pub max_token_chars: usize,
}

impl Default for SkillsHeuristics {
    fn default() -> Self {
        Self {
            window_chars: 280,
            min_token_chars: 2,
            max_token_chars: 39,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nav_timeout_ms: 30_000,
            settle_wait_ms: 1_200,
            challenge_wait_ms: 7_000,
            parser_fallback_enabled: true,
            headless: true,
            skills: SkillsHeuristics::default(),
        }
    }
}

impl Settings {
    /// Load configuration from defaults, optional files, and environment.
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("nav_timeout_ms", 30_000)?
            .set_default("settle_wait_ms", 1_200)?
            .set_default("challenge_wait_ms", 7_000)?
            .set_default("parser_fallback_enabled", true)?
            .set_default("headless", true)?
            .set_default("skills.window_chars", 280)?
            .set_default("skills.min_token_chars", 2)?
            .set_default("skills.max_token_chars", 39)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCRAPER").separator("__"));

        builder.build()?.try_deserialize()
    }
}

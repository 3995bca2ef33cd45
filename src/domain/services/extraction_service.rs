// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Selector-driven extraction of job fields from a fetched Upwork page.
//!
//! Selector priority lists are plain data: Upwork renames `data-test` hooks
//! regularly, so recovering from a markup change should mean reordering or
//! extending a list, not rewriting lookup code. Budget and skills carry
//! regex fallbacks over the page text for layouts the selectors miss.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::settings::SkillsHeuristics;
use crate::domain::models::scraped_job::{ScrapeMode, ScrapedJob};
use crate::utils::errors::{ScrapeError, ScrapeErrorCode};

/// Hard cap on entries recovered by the text-window fallback. Tags found
/// through selectors are trusted as-is.
const MAX_SKILL_ITEMS: usize = 12;

pub const TITLE_WARNING: &str = "Could not confidently detect job title";
pub const DESCRIPTION_WARNING: &str = "Could not confidently detect job description";
pub const BUDGET_WARNING: &str = "Budget was not found";
pub const SKILLS_WARNING: &str = "Skills were not found";

/// Title candidates, most specific first. `h1` last as a catch-all.
const TITLE_SELECTORS: [&str; 4] = [
    r#"h1[data-test="job-title"]"#,
    r#"h1[data-test="job-title-text"]"#,
    "h1.air3-line-clamp",
    "h1",
];

const TITLE_META_FALLBACK: [&str; 1] = [r#"meta[property="og:title"]"#];

/// Description containers whose inner markup becomes the markdown body.
const DESCRIPTION_SELECTORS: [&str; 5] = [
    r#"[data-test="job-description-text"]"#,
    r#"[data-test="job-description"]"#,
    r#"section[data-test="JobDescription"]"#,
    r#"div[data-qa="job-description"]"#,
    "article",
];

const DESCRIPTION_META_FALLBACK: [&str; 1] = [r#"meta[name="description"]"#];

const BUDGET_SELECTORS: [&str; 5] = [
    r#"[data-test="job-budget"]"#,
    r#"[data-test="is-fixed-price"]"#,
    r#"[data-test="hourly-rate"]"#,
    r#"li[data-test*="budget"]"#,
    r#"div[data-test*="budget"]"#,
];

/// Grouped selector for skill pills across old and new Upwork layouts.
const SKILL_TOKEN_SELECTORS: &str = concat!(
    r#"[data-test="job-skills"] [data-test="Token"], "#,
    r#"[data-test="Skills"] [data-test="Token"], "#,
    r#"a[data-test="link-skill"], "#,
    r#"span[data-test="skill"], "#,
    ".air3-token"
);

/// Budget/rate shapes in priority order: ranges win over single rates,
/// labeled amounts are the last resort.
static BUDGET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\$\s?\d[\d,]*(?:\.\d{1,2})?\s?-\s?\$\s?\d[\d,]*(?:\.\d{1,2})?\s?(?:/hr|per hour|hourly)?",
        r"(?i)\$\s?\d[\d,]*(?:\.\d{1,2})?\s?(?:/hr|per hour|hourly)",
        r"(?i)Budget\s*[:\-]?\s*\$\s?\d[\d,]*(?:\.\d{1,2})?(?:\s?-\s?\$\s?\d[\d,]*(?:\.\d{1,2})?)?",
        r"(?i)Fixed\s*Price\s*[:\-]?\s*\$\s?\d[\d,]*(?:\.\d{1,2})?",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Start of a skills section in plain page text.
static SKILLS_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Skills(?:\s+and\s+Expertise)?\s*[:\n]?").unwrap());

/// Separators between skill fragments: newlines, commas, pipes, bullets.
static SKILL_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n,|·•]").unwrap());

static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static TRAILING_LINE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());

/// Collapse scraped text into a compact, stable form.
///
/// CR stripped, horizontal runs collapsed to one space, 3+ newlines squeezed
/// to a blank line, per-line trailing whitespace removed, ends trimmed.
pub fn normalize_whitespace(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let no_cr = text.replace('\r', "");
    let collapsed = HORIZONTAL_WS.replace_all(&no_cr, " ");
    let squeezed = EXCESS_NEWLINES.replace_all(&collapsed, "\n\n");
    let clean_lines = TRAILING_LINE_WS.replace_all(&squeezed, "\n");
    clean_lines.trim().to_string()
}

/// Normalize entries, drop empties, dedupe case-insensitively while keeping
/// first-seen order and casing.
pub fn unique_non_empty<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let cleaned = normalize_whitespace(value.as_ref());
        if cleaned.is_empty() {
            continue;
        }
        if seen.insert(cleaned.to_lowercase()) {
            out.push(cleaned);
        }
    }
    out
}

/// Convert an HTML fragment to whitespace-normalized markdown.
pub fn html_to_markdown(fragment: &str) -> String {
    let markdown = htmd::convert(fragment).unwrap_or_default();
    normalize_whitespace(&markdown)
}

/// First selector whose first match has non-empty normalized text.
fn pick_first_text(document: &Html, selectors: &[&str]) -> String {
    for raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(element) = document.select(&selector).next() {
            let value = normalize_whitespace(&element.text().collect::<String>());
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}

/// First selector whose first match carries a non-empty attribute value.
fn pick_first_attr(document: &Html, selectors: &[&str], attr: &str) -> String {
    for raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(element) = document.select(&selector).next() {
            let value = normalize_whitespace(element.value().attr(attr).unwrap_or_default());
            if !value.is_empty() {
                return value;
            }
        }
    }
    String::new()
}

/// Inner HTML of the first matched container. An empty string does not count
/// as a match, but whitespace-only markup does, mirroring how the page is
/// rendered upstream.
fn pick_first_inner_html(document: &Html, selectors: &[&str]) -> Option<String> {
    for raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(element) = document.select(&selector).next() {
            let inner = element.inner_html();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }
    None
}

/// Extracts structured job data out of serialized page HTML.
///
/// Synchronous on purpose: `scraper::Html` is not `Send`, so the parsed
/// document must never be held across an await point.
#[derive(Debug, Clone, Default)]
pub struct ExtractionService {
    skills: SkillsHeuristics,
}

impl ExtractionService {
    pub fn new(skills: SkillsHeuristics) -> Self {
        Self { skills }
    }

    /// Pull title, description, budget, and skills from a fetched page.
    ///
    /// Title and description are required: if either comes up empty the page
    /// is not a readable job posting and extraction fails. Budget and skills
    /// degrade to a warning each.
    pub fn extract(
        &self,
        html: &str,
        page_url: &str,
        mode: ScrapeMode,
    ) -> Result<ScrapedJob, ScrapeError> {
        let document = Html::parse_document(html);

        let mut title = pick_first_text(&document, &TITLE_SELECTORS);
        if title.is_empty() {
            title = pick_first_attr(&document, &TITLE_META_FALLBACK, "content");
        }

        let description = match pick_first_inner_html(&document, &DESCRIPTION_SELECTORS) {
            Some(inner) => html_to_markdown(&inner),
            None => pick_first_attr(&document, &DESCRIPTION_META_FALLBACK, "content"),
        };

        let page_text = {
            let body_text = match Selector::parse("body") {
                Ok(selector) => document
                    .select(&selector)
                    .next()
                    .map(|body| body.text().collect::<String>())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            normalize_whitespace(&body_text)
        };

        let budget = {
            let from_selectors = pick_first_text(&document, &BUDGET_SELECTORS);
            if from_selectors.is_empty() {
                self.budget_from_text(&page_text).unwrap_or_default()
            } else {
                from_selectors
            }
        };

        let mut skill_values: Vec<String> = Vec::new();
        if let Ok(selector) = Selector::parse(SKILL_TOKEN_SELECTORS) {
            for element in document.select(&selector) {
                skill_values.push(element.text().collect::<String>());
            }
        }
        skill_values.extend(self.skills_from_text(&page_text));
        let skills = unique_non_empty(&skill_values);

        let mut warnings = Vec::new();
        if title.is_empty() {
            warnings.push(TITLE_WARNING.to_string());
        }
        if description.is_empty() {
            warnings.push(DESCRIPTION_WARNING.to_string());
        }
        if budget.is_empty() {
            warnings.push(BUDGET_WARNING.to_string());
        }
        if skills.is_empty() {
            warnings.push(SKILLS_WARNING.to_string());
        }

        if title.is_empty() || description.is_empty() {
            return Err(ScrapeError::new(
                ScrapeErrorCode::ScrapeFailed,
                "Could not extract required job details from this URL",
            ));
        }

        Ok(ScrapedJob {
            url: page_url.to_string(),
            title,
            description,
            budget: if budget.is_empty() { None } else { Some(budget) },
            skills: skills.join(", "),
            mode,
            warnings,
        })
    }

    /// First budget pattern that matches anywhere in the page text.
    fn budget_from_text(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        for pattern in BUDGET_PATTERNS.iter() {
            if let Some(found) = pattern.find(text) {
                let cleaned = normalize_whitespace(found.as_str());
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
        }
        None
    }

    /// Text-window fallback for skills: take the window after a "Skills"
    /// header, split on separators, keep plausible tag-sized fragments.
    fn skills_from_text(&self, text: &str) -> Vec<String> {
        let section = match SKILLS_SECTION.find(text) {
            Some(found) => found,
            None => return Vec::new(),
        };
        let window: String = text[section.end()..]
            .chars()
            .take(self.skills.window_chars)
            .collect();

        SKILL_SPLIT
            .split(&window)
            .map(normalize_whitespace)
            .filter(|fragment| {
                let len = fragment.chars().count();
                len >= self.skills.min_token_chars && len <= self.skills.max_token_chars
            })
            .take(MAX_SKILL_ITEMS)
            .collect()
    }
}


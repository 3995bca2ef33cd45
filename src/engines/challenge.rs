// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Heuristics for recognizing Cloudflare challenge interstitials.
//!
//! Detection is text-only: it inspects the serialized page and, when one is
//! available, the document title. False negatives degrade to partial data,
//! so the positive signals are kept narrow.

/// Substrings (lowercase) that show up on Cloudflare challenge pages.
pub const CHALLENGE_MARKERS: [&str; 6] = [
    "checking your browser before accessing",
    "just a moment...",
    "attention required! | cloudflare",
    "cf-browser-verification",
    "cdn-cgi/challenge-platform",
    "cf-turnstile",
];

/// Whether a page looks like a Cloudflare challenge rather than job content.
///
/// True once any of these holds:
/// - title contains "just a moment" or "attention required",
/// - html references the challenge platform script path,
/// - html carries any marker together with the browser-check phrase.
///
/// A lone turnstile widget (e.g. embedded in a login form) does not count
/// without the browser-check phrase.
pub fn looks_like_challenge(html: &str, title: Option<&str>) -> bool {
    let html = html.to_lowercase();
    let title = title.unwrap_or_default().to_lowercase();

    if title.contains("just a moment") || title.contains("attention required") {
        return true;
    }
    if html.contains("cdn-cgi/challenge-platform") {
        return true;
    }

    let any_marker = CHALLENGE_MARKERS.iter().any(|marker| html.contains(marker));
    any_marker && html.contains("checking your browser before accessing")
}

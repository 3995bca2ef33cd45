// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Domain services:
/// - extraction_service: pulls structured job fields out of page HTML
/// - scrape_service: validates, fetches, and classifies one scrape request
pub mod extraction_service;
pub mod scrape_service;

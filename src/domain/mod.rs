// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Core business logic:
/// - models: the scraped job result and its mode tag
/// - services: field extraction and scrape orchestration
pub mod models;
pub mod services;

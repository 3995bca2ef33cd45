// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Business entities produced by the scraping pipeline.
pub mod scraped_job;

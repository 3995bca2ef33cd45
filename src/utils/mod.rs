// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Cross-cutting utilities: the scrape error taxonomy, URL validation,
/// and tracing setup.
pub mod errors;
pub mod telemetry;
pub mod validators;

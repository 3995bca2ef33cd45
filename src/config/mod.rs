// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Runtime configuration: timeouts, fallback switches, and extraction
/// heuristics, loaded from defaults, optional files, and environment.
pub mod settings;

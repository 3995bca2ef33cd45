// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod challenge;
pub mod parser_engine;
pub mod playwright_engine;
pub mod traits;

// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use std::time::Duration;

/// Total time budget for fetching a page (connect, request and response).
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Runtime settings for the scrape pipeline.
///
/// Built once at startup and passed by value into the fetcher and extractor.
/// Nothing in the pipeline mutates it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScraperSettings {
    /// Emit verbose diagnostics (headers, body previews, extraction summary).
    /// Only affects logging, never the scrape result.
    pub debug: bool,
    /// Deadline for a single fetch attempt
    pub fetch_timeout: Duration,
}

impl ScraperSettings {
    pub fn new(debug: bool, fetch_timeout: Duration) -> Self {
        Self {
            debug,
            fetch_timeout,
        }
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self::new(false, DEFAULT_FETCH_TIMEOUT)
    }
}

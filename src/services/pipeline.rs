// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::error::{FetchError, ScrapeError};
use crate::models::scrape::ScrapedResult;
use crate::models::settings::ScraperSettings;
use crate::services::extractor::extract_page;
use crate::services::fetcher::Fetcher;
use crate::services::validator::validate_url;

/// Fetch-parse-extract pipeline for a single page.
///
/// Holds no per-request state, so one instance is shared by all requests.
pub struct Scraper {
    fetcher: Fetcher,
    settings: ScraperSettings,
}

impl Scraper {
    pub fn new(settings: ScraperSettings) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(settings)?,
            settings,
        })
    }

    /// Scrape `target`, which is also used as the base for resolving relative links.
    pub async fn scrape(&self, target: &str) -> Result<ScrapedResult, ScrapeError> {
        if target.is_empty() {
            return Err(ScrapeError::MissingUrl);
        }
        let url = validate_url(target)?;

        let page = self.fetcher.fetch(&url).await?;

        Ok(extract_page(&page.body, target, &self.settings))
    }
}

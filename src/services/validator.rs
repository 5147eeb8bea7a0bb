// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::error::ScrapeError;
use url::Url;

/// Accept only absolute `http` / `https` URLs.
pub fn validate_url(raw: &str) -> Result<Url, ScrapeError> {
    let url = Url::parse(raw).map_err(|_| ScrapeError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ScrapeError::InvalidUrl),
    }
}

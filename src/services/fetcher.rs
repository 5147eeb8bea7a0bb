// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Deadline-bound page retrieval with browser-like request headers.

use crate::models::error::FetchError;
use crate::models::settings::ScraperSettings;
use crate::services::anti_bot::detect_anti_bot_service;
use crate::services::logging::preview;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, DNT,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Error bodies shorter than this are dumped in debug mode
const MAX_ERROR_BODY_LOG_BYTES: usize = 1000;
/// Length of the HTML preview logged in debug mode
const HTML_PREVIEW_CHARS: usize = 500;

/// Raw page returned by a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// HTTP fetcher for HTML pages.
///
/// Makes exactly one attempt per call. Compression is negotiated and undone
/// by the client itself, so no `Accept-Encoding` header is ever set here and
/// the body handed back is always decompressed.
pub struct Fetcher {
    client: Client,
    settings: ScraperSettings,
}

impl Fetcher {
    /// Create a fetcher whose client enforces `settings.fetch_timeout` on every request
    pub fn new(settings: ScraperSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.fetch_timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, settings })
    }

    /// Fetch `url` and return its body if it is a 2xx HTML response
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .headers(browser_headers())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.blocked(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::NotHtml(content_type));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                FetchError::Body(e)
            }
        })?;

        if self.settings.debug {
            debug!(url = %url, "Successfully fetched page");
            debug!(bytes = body.len(), content_type = %content_type, "Response size");
            debug!(
                "HTML preview:\n{}",
                preview(&String::from_utf8_lossy(&body), HTML_PREVIEW_CHARS)
            );
        }

        Ok(FetchedPage {
            body: body.to_vec(),
            content_type,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                after: self.settings.fetch_timeout,
                source: e,
            }
        } else {
            FetchError::Network(e)
        }
    }

    /// Classify a non-2xx response, logging diagnostics on the way
    async fn blocked(&self, response: Response) -> FetchError {
        let status = response.status().as_u16();
        let protection = detect_anti_bot_service(response.headers());

        warn!(status, "Request blocked");
        if let Some(service) = protection {
            warn!(service = %service, "Anti-bot service detected");
        }

        if self.settings.debug {
            debug!(headers = ?response.headers(), "Response headers");
            if let Ok(body) = response.bytes().await {
                if !body.is_empty() && body.len() < MAX_ERROR_BODY_LOG_BYTES {
                    debug!(body = %String::from_utf8_lossy(&body), "Response body");
                }
            }
        }

        FetchError::Status { status, protection }
    }
}

/// Headers of an ordinary desktop browser navigation
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

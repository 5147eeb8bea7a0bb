// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Error taxonomy for the scrape pipeline and its wire representation.

use crate::services::anti_bot::AntiBotService;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body returned for every failed API call
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error category token (`missing_url`, `invalid_url`, `method_not_allowed`, `scrape_failed`)
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// Failures while retrieving a page. All of them surface as `scrape_failed`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch URL: request timed out after {after:?}")]
    Timeout {
        after: Duration,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch URL: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unexpected status code: {status}{}", detected_suffix(.protection))]
    Status {
        status: u16,
        protection: Option<AntiBotService>,
    },

    #[error("content type is not HTML: {0}")]
    NotHtml(String),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether the fetch was abandoned because the time budget ran out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    /// Protection service detected on a blocked response, if any.
    pub fn protection(&self) -> Option<AntiBotService> {
        match self {
            FetchError::Status { protection, .. } => *protection,
            _ => None,
        }
    }
}

fn detected_suffix(protection: &Option<AntiBotService>) -> String {
    protection
        .map(|service| format!(" (detected: {service})"))
        .unwrap_or_default()
}

/// Failures reported to API callers
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("URL parameter is required")]
    MissingUrl,

    #[error("URL must be a valid http or https URL")]
    InvalidUrl,

    #[error("Only GET method is allowed")]
    MethodNotAllowed,

    #[error("Failed to scrape URL: {0}")]
    ScrapeFailed(#[from] FetchError),
}

impl ScrapeError {
    /// Category token exposed on the wire
    pub fn code(&self) -> &'static str {
        match self {
            ScrapeError::MissingUrl => "missing_url",
            ScrapeError::InvalidUrl => "invalid_url",
            ScrapeError::MethodNotAllowed => "method_not_allowed",
            ScrapeError::ScrapeFailed(_) => "scrape_failed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ScrapeError::MissingUrl | ScrapeError::InvalidUrl => StatusCode::BAD_REQUEST,
            ScrapeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ScrapeError::ScrapeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response_body())).into_response()
    }
}

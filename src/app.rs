// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::error::{ErrorResponse, ScrapeError};
use crate::models::health::HealthResponse;
use crate::models::scrape::{Heading, Link, ScrapedResult};
use crate::models::version::VersionResponse;
use crate::services::pipeline::Scraper;
use axum::{
    extract::{RawQuery, State},
    http::Method,
    routing::{any, get},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `LALA_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("LALA_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Read-only pipeline shared by all requests; each call works on its own result.
    pub scraper: Arc<Scraper>,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// Scrape a single page and return its structured summary.
#[utoipa::path(
    get,
    path = "/scrape",
    params(
        ("url" = String, Query, description = "Absolute http or https URL of the page to scrape")
    ),
    responses(
        (status = 200, description = "Structured page summary", body = ScrapedResult),
        (status = 400, description = "Missing or invalid URL", body = ErrorResponse),
        (status = 405, description = "Method other than GET", body = ErrorResponse),
        (status = 500, description = "Page could not be fetched", body = ErrorResponse)
    )
)]
pub async fn scrape_handler(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
) -> Result<Json<ScrapedResult>, ScrapeError> {
    if method != Method::GET {
        return Err(ScrapeError::MethodNotAllowed);
    }

    let target = query
        .as_deref()
        .and_then(|q| first_query_value(q, "url"))
        .unwrap_or_default();

    match state.scraper.scrape(&target).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            if let ScrapeError::ScrapeFailed(cause) = &e {
                error!(url = %target, timeout = cause.is_timeout(), "Error scraping: {cause}");
            }
            Err(e)
        }
    }
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, description = "Service version", body = VersionResponse))
)]
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "lala-scraper".to_string(),
        version: VERSION.to_string(),
    })
}

/// First value of `key` in a raw query string
fn first_query_value(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(scrape_handler, health_handler, version_handler),
    components(schemas(
        ScrapedResult,
        Link,
        Heading,
        ErrorResponse,
        HealthResponse,
        VersionResponse
    ))
)]
pub struct ApiDoc;

/// Build the Axum application router.
///
/// `/scrape` accepts every method so that non-GET calls get the JSON
/// `method_not_allowed` body instead of an empty 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/scrape", any(scrape_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

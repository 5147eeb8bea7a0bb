// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::Context;
use clap::Parser;
use lala_scraper::app::{create_router, AppState, VERSION};
use lala_scraper::models::settings::ScraperSettings;
use lala_scraper::services::logging::init_logging;
use lala_scraper::services::pipeline::Scraper;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Web page scraper API
#[derive(Debug, Parser)]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging (response headers, body previews, extraction summary)
    #[arg(long, env = "SCRAPER_DEBUG")]
    debug: bool,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Total time budget for fetching a page, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = 15)]
    fetch_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let settings = ScraperSettings::new(cli.debug, Duration::from_secs(cli.fetch_timeout_secs));
    let scraper = Scraper::new(settings).context("Failed to create HTTP client")?;

    let app = create_router(AppState {
        scraper: Arc::new(scraper),
    });

    // Bind to 0.0.0.0 to accept connections from any network interface (required for Docker)
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("lala-scraper v{VERSION} listening on {addr}");
    debug!("Debug mode enabled");
    info!(
        "Example usage: curl 'http://localhost:{}/scrape?url=http://example.com'",
        cli.port
    );

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}

//! Trending Shows - caching API over Streaming Availability rankings
//!
//! Serves the most popular series per streaming platform and timeframe,
//! fetching from the upstream API at most once a day per listing and
//! keeping results on disk across restarts.

mod config;
mod error;
mod resolver;
mod server;
#[cfg(test)]
mod testing;
mod types;

use crate::config::Config;
use crate::error::Result;
use crate::resolver::ShowResolver;
use crate::server::{start_server, ServerState, SharedState};
use show_cache::ShowCache;
use std::sync::Arc;
use streaming_availability::StreamingClient;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("trending_shows=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Trending Shows...");

    let config = Config::from_env()?;
    info!("Port: {}", config.port);
    info!("Cache dir: {:?}", config.cache_dir);
    info!("Upstream: {}", config.streaming_api_url);

    let cache = Arc::new(ShowCache::new(config.cache_dir.clone()));
    cache.init().await?;
    let loaded = cache.load_all().await;
    info!(entries = loaded, "Cache ready");

    let client = StreamingClient::with_base_url(&config.rapid_api_key, &config.streaming_api_url)?;
    let resolver = ShowResolver::new(cache.clone(), Arc::new(client));

    let state: SharedState = Arc::new(ServerState::new(resolver));

    // Runs until SIGINT/SIGTERM
    start_server(state, &config).await?;

    let report = cache.save_all().await;
    if report.failed > 0 {
        warn!(
            written = report.written,
            failed = report.failed,
            "Some cache entries could not be saved"
        );
    } else {
        info!(written = report.written, "Cache saved, shutting down");
    }

    Ok(())
}

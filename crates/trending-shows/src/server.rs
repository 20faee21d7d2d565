//! HTTP server for the trending shows API
//!
//! Provides /health, /api/shows, /api/refresh and /api/cached-platforms, and
//! serves the frontend build for every other path.

use crate::config::Config;
use crate::error::AppError;
use crate::resolver::ShowResolver;
use crate::types::{CacheSummary, HealthResponse, PlatformsResponse, ShowsResponse};
use axum::{
    extract::{Query, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// Shared state for the HTTP server
pub struct ServerState {
    pub resolver: ShowResolver,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(resolver: ShowResolver) -> Self {
        Self {
            resolver,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

#[derive(Debug, Default, Deserialize)]
pub struct ShowsQuery {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl ShowsQuery {
    /// Only the literal `true` forces a refresh
    fn force_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub timeframe: String,
}

/// Build the CORS layer for the configured origins. A `*` entry allows any
/// origin, without credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ORIGIN, header::ACCEPT])
        .allow_credentials(true)
}

/// Create the HTTP router
pub fn create_router(state: SharedState, cors: CorsLayer, static_dir: &Path) -> Router {
    let spa_fallback =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .route("/api/shows", get(get_shows))
        .route("/api/refresh", post(refresh_shows))
        .route("/api/cached-platforms", get(cached_platforms))
        .layer(cors)
        .with_state(state)
        .fallback_service(spa_fallback)
}

/// Start the HTTP server and run until SIGINT or SIGTERM
pub async fn start_server(state: SharedState, config: &Config) -> std::io::Result<()> {
    let router = create_router(
        state,
        cors_layer(&config.cors_origins),
        &config.static_dir,
    );
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        static_dir = %config.static_dir.display(),
        "Starting HTTP server on {}", addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache = state.resolver.cache();
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: CacheSummary {
            entries: cache.len().await,
            platforms: cache.platforms().await.len(),
        },
        resolver: state.resolver.stats(),
    })
}

/// Trending shows for a platform and timeframe, from cache while fresh
async fn get_shows(
    State(state): State<SharedState>,
    Query(query): Query<ShowsQuery>,
) -> Result<Json<ShowsResponse>, AppError> {
    let resolved = state
        .resolver
        .resolve(&query.platform, &query.timeframe, query.force_refresh())
        .await?;
    Ok(Json(resolved.into()))
}

/// Force a fetch for an explicit platform and timeframe
async fn refresh_shows(
    State(state): State<SharedState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<ShowsResponse>, AppError> {
    if query.platform.is_empty() || query.timeframe.is_empty() {
        return Err(AppError::BadRequest(
            "Platform and timeframe are required".to_string(),
        ));
    }

    info!(platform = %query.platform, timeframe = %query.timeframe, "Manual refresh");
    let resolved = state
        .resolver
        .resolve(&query.platform, &query.timeframe, true)
        .await?;
    Ok(Json(resolved.into()))
}

async fn cached_platforms(State(state): State<SharedState>) -> Json<PlatformsResponse> {
    Json(PlatformsResponse {
        platforms: state.resolver.cache().platforms().await,
    })
}

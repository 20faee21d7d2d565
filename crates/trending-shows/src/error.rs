//! Error types for the trending shows service

use crate::resolver::ResolveError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Errors that stop the service from starting or running
#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Cache(show_cache::CacheError),
    Streaming(streaming_availability::StreamingError),
    Io(Box<std::io::Error>),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::Cache(err) => write!(f, "Cache error: {}", err),
            ServiceError::Streaming(err) => write!(f, "Streaming API error: {}", err),
            ServiceError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Cache(err) => Some(err),
            ServiceError::Streaming(err) => Some(err),
            ServiceError::Io(err) => Some(err.as_ref()),
            ServiceError::Config(_) => None,
        }
    }
}

impl From<show_cache::CacheError> for ServiceError {
    fn from(err: show_cache::CacheError) -> Self {
        ServiceError::Cache(err)
    }
}

impl From<streaming_availability::StreamingError> for ServiceError {
    fn from(err: streaming_availability::StreamingError) -> Self {
        ServiceError::Streaming(err)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServiceError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Request-scoped error that converts to an HTTP response
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// The upstream fetch failed; carries the underlying message
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error fetching shows: {}", msg),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidKey(e) => AppError::BadRequest(e.to_string()),
            ResolveError::Fetch(e) => AppError::Upstream(e.to_string()),
        }
    }
}

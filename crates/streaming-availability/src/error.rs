//! Error types for the Streaming Availability client

use std::fmt;

/// Errors that can occur when interacting with the Streaming Availability API
#[derive(Debug)]
pub enum StreamingError {
    /// HTTP request failed (connection, timeout, TLS)
    Http(reqwest::Error),
    /// The API answered with a non-success status
    Status { status: u16, body: String },
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// Any other upstream failure
    Api(String),
}

impl fmt::Display for StreamingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "API request failed: {}", e),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "API request failed with status {}", status)
            }
            Self::Status { status, body } => {
                write!(f, "API request failed with status {}: {}", status, body)
            }
            Self::Json(e) => write!(f, "API response could not be parsed: {}", e),
            Self::Api(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for StreamingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StreamingError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for StreamingError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Streaming Availability API operations
pub type Result<T> = std::result::Result<T, StreamingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = StreamingError::Status {
            status: 429,
            body: "Too many requests".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 429: Too many requests"
        );

        let err = StreamingError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "API request failed with status 503");
    }

    #[test]
    fn test_json_error_has_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StreamingError::from(parse_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("API response could not be parsed"));
    }

    #[test]
    fn test_api_error_display() {
        let err = StreamingError::Api("quota exhausted".to_string());
        assert_eq!(err.to_string(), "API error: quota exhausted");
    }
}

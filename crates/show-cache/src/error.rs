//! Error types for the show cache

use std::fmt;

/// Reasons a platform/timeframe pair cannot form a cache key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    EmptyPlatform,
    /// Platform contains characters outside `[A-Za-z0-9_]`
    InvalidPlatform(String),
    /// Platform is longer than `CacheKey::MAX_PLATFORM_LEN` bytes
    PlatformTooLong(usize),
    /// A key string without the `-` separator
    MissingSeparator(String),
    UnknownTimeframe(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlatform => write!(f, "Platform must not be empty"),
            Self::InvalidPlatform(p) => write!(
                f,
                "Invalid platform '{}': only letters, digits and '_' are allowed",
                p
            ),
            Self::PlatformTooLong(len) => write!(
                f,
                "Platform is too long ({} bytes, at most {} allowed)",
                len,
                crate::key::CacheKey::MAX_PLATFORM_LEN
            ),
            Self::MissingSeparator(s) => write!(f, "Invalid cache key '{}': missing '-'", s),
            Self::UnknownTimeframe(t) => write!(f, "Unknown timeframe: '{}'", t),
        }
    }
}

impl std::error::Error for KeyError {}

#[derive(Debug)]
pub enum CacheError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidKey(KeyError),
    /// Persist was requested for a key with no entry
    Missing(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Cache IO error: {}", e),
            Self::Json(e) => write!(f, "Cache serialization error: {}", e),
            Self::InvalidKey(e) => write!(f, "{}", e),
            Self::Missing(key) => write!(f, "No cache entry for '{}'", key),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidKey(e) => Some(e),
            Self::Missing(_) => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<KeyError> for CacheError {
    fn from(e: KeyError) -> Self {
        Self::InvalidKey(e)
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

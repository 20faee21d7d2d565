use crate::error::{Result, ServiceError};
use std::env;
use std::path::PathBuf;
use streaming_availability::StreamingClient;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rapid_api_key: String,
    pub cache_dir: PathBuf,
    pub static_dir: PathBuf,
    pub cors_origins: Vec<String>,
    pub streaming_api_url: String,
}

impl Config {
    /// Parse configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parse configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rapid_api_key = lookup("RAPID_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ServiceError::Config("RAPID_API_KEY environment variable is required".to_string())
            })?;

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let cache_dir = lookup("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./cache"));

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./frontend/build"));

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:8080".to_string(),
                ]
            });

        let streaming_api_url = lookup("STREAMING_API_URL")
            .unwrap_or_else(|| StreamingClient::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            port,
            rapid_api_key,
            cache_dir,
            static_dir,
            cors_origins,
            streaming_api_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = config_from(&[("PORT", "9000")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: RAPID_API_KEY environment variable is required"
        );
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        assert!(config_from(&[("RAPID_API_KEY", "   ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("RAPID_API_KEY", "abc123")]).unwrap();
        assert_eq!(config.rapid_api_key, "abc123");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_dir, PathBuf::from("./cache"));
        assert_eq!(config.static_dir, PathBuf::from("./frontend/build"));
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:8080"]
        );
        assert_eq!(config.streaming_api_url, StreamingClient::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RAPID_API_KEY", "abc123"),
            ("PORT", "3005"),
            ("CACHE_DIR", "/var/cache/shows"),
            ("STATIC_DIR", "/srv/www"),
            ("CORS_ORIGINS", "https://shows.example, http://localhost:5173,"),
            ("STREAMING_API_URL", "http://127.0.0.1:9999"),
        ])
        .unwrap();

        assert_eq!(config.port, 3005);
        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/shows"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(
            config.cors_origins,
            vec!["https://shows.example", "http://localhost:5173"]
        );
        assert_eq!(config.streaming_api_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = config_from(&[("RAPID_API_KEY", "abc123"), ("PORT", "http")]).unwrap();
        assert_eq!(config.port, 8080);
    }
}

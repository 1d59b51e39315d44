//! API client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MINIMARKET_API_URL` - Base URL of the backend REST API
//!   (e.g., `http://localhost:8080/minimarket/v1/api/`)
//!
//! ## Optional
//! - `MINIMARKET_FILES_URL` - Base URL for uploaded images
//!   (default: `MINIMARKET_API_URL` + `images/`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Backend API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API. Always ends with a slash so resource
    /// paths can be appended directly.
    pub base_url: Url,
    /// Base URL under which uploaded image filenames are served.
    pub files_base_url: Url,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or do not
    /// parse as URLs.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url("MINIMARKET_API_URL", &get_required_env("MINIMARKET_API_URL")?)?;

        let files_base_url = match get_optional_env("MINIMARKET_FILES_URL") {
            Some(raw) => parse_base_url("MINIMARKET_FILES_URL", &raw)?,
            None => base_url.join("images/").map_err(|e| {
                ConfigError::InvalidEnvVar("MINIMARKET_API_URL".to_string(), e.to_string())
            })?,
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            base_url,
            files_base_url,
            sentry_dsn,
        })
    }

    /// Build a config directly from a base URL, for callers that do not
    /// read the environment (tests, embedding).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse.
    pub fn from_base_url(raw: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url("MINIMARKET_API_URL", raw)?;
        let files_base_url = base_url.join("images/").map_err(|e| {
            ConfigError::InvalidEnvVar("MINIMARKET_API_URL".to_string(), e.to_string())
        })?;
        Ok(Self {
            base_url,
            files_base_url,
            sentry_dsn: None,
        })
    }

    /// Public URL for an uploaded image filename.
    #[must_use]
    pub fn image_url(&self, filename: &str) -> Option<Url> {
        self.files_base_url.join(filename).ok()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a base URL, appending a trailing slash when missing so that
/// `Url::join` treats the last path segment as a directory.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("TEST_VAR", "http://localhost:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("TEST_VAR", "http://localhost:8080/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let result = parse_base_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_join_resource_path() {
        let config = ApiConfig::from_base_url("http://localhost:8080/minimarket/v1/api").unwrap();
        let joined = config.base_url.join("categorias").unwrap();
        assert_eq!(
            joined.as_str(),
            "http://localhost:8080/minimarket/v1/api/categorias"
        );
    }

    #[test]
    fn test_image_url() {
        let config = ApiConfig::from_base_url("http://localhost:8080/api/").unwrap();
        let url = config.image_url("default.png").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/images/default.png");
    }
}

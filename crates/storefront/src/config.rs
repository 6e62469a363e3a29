//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>).
//!   An `https` URL turns on secure session cookies.
//! - `STOREFRONT_PAGE_SIZE` - Default catalog page size (default: 6, max 100)
//! - `STOREFRONT_CORS_ORIGIN` - Allowed browser origin for cross-site API calls
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use stride_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Page size for `/api/catalog` when the request does not set one
    pub page_size: u32,
    /// Origin allowed to call the API from a browser on another site
    pub cors_origin: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = parse_or("STOREFRONT_HOST", get("STOREFRONT_HOST"), || {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        })?;
        let port = parse_or("STOREFRONT_PORT", get("STOREFRONT_PORT"), || 3000)?;

        let base_url = get("STOREFRONT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| invalid("STOREFRONT_BASE_URL", e.to_string()))?;

        let page_size = parse_or("STOREFRONT_PAGE_SIZE", get("STOREFRONT_PAGE_SIZE"), || {
            DEFAULT_PAGE_SIZE
        })?;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(invalid(
                "STOREFRONT_PAGE_SIZE",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        let cors_origin = get("STOREFRONT_CORS_ORIGIN");
        if let Some(origin) = &cors_origin {
            Url::parse(origin).map_err(|e| invalid("STOREFRONT_CORS_ORIGIN", e.to_string()))?;
        }

        Ok(Self {
            host,
            port,
            base_url,
            page_size,
            cors_origin,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: sample_rate("SENTRY_SAMPLE_RATE", get("SENTRY_SAMPLE_RATE"), 1.0)?,
            sentry_traces_sample_rate: sample_rate(
                "SENTRY_TRACES_SAMPLE_RATE",
                get("SENTRY_TRACES_SAMPLE_RATE"),
                0.0,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason)
}

/// Parse a value if present, otherwise use the default.
fn parse_or<T, D>(key: &str, value: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> T,
{
    value.map_or_else(
        || Ok(default()),
        |v| v.trim().parse::<T>().map_err(|e| invalid(key, e.to_string())),
    )
}

fn sample_rate(key: &str, value: Option<String>, default: f32) -> Result<f32, ConfigError> {
    let rate = parse_or(key, value, || default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid(key, format!("must be between 0.0 and 1.0 (got {rate})")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.page_size, 6);
        assert!(!config.secure_cookies());
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://shop.stride.test"),
            ("STOREFRONT_PAGE_SIZE", "12"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.secure_cookies());
        assert_eq!(config.page_size, 12);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("STOREFRONT_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(load(&[("STOREFRONT_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("STOREFRONT_PAGE_SIZE", "101")]).is_err());
        assert!(load(&[("STOREFRONT_PAGE_SIZE", "100")]).is_ok());
    }

    #[test]
    fn test_sample_rate_bounds() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_TRACES_SAMPLE_RATE", "-0.1")]).is_err());
        let config = load(&[("SENTRY_TRACES_SAMPLE_RATE", "0.25")]).unwrap();
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_urls() {
        assert!(load(&[("STOREFRONT_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("STOREFRONT_CORS_ORIGIN", "::")]).is_err());
    }
}

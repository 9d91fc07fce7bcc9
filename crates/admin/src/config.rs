//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CONSOLE_HOST` - Bind address (default: 127.0.0.1)
//! - `CONSOLE_PORT` - Listen port (default: 3001)
//! - `MARKETPLACE_API_URL` - Base URL of the marketplace REST API. When set,
//!   the console talks to the live API; when unset it serves snapshot data.
//! - `MARKETPLACE_API_TOKEN` - Bearer token for the marketplace API
//! - `SNAPSHOT_DIR` - Directory of entity snapshot files (default: public/Entities)
//! - `CONSOLE_CACHE_TTL_SECS` - Entity list cache TTL (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_SNAPSHOT_DIR: &str = "public/Entities";
const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where entity data comes from.
///
/// The REST variant implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub enum BackendConfig {
    /// Live marketplace REST API.
    Rest {
        base_url: Url,
        token: Option<SecretString>,
    },
    /// Read-only JSON snapshot files on disk.
    Snapshot { dir: PathBuf },
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rest { base_url, token } => f
                .debug_struct("Rest")
                .field("base_url", &base_url.as_str())
                .field("token", &token.as_ref().map(|_| "[REDACTED]"))
                .finish(),
            Self::Snapshot { dir } => f.debug_struct("Snapshot").field("dir", dir).finish(),
        }
    }
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Entity data backend
    pub backend: BackendConfig,
    /// TTL for cached entity lists
    pub cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CONSOLE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CONSOLE_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_PORT".to_string(), e.to_string()))?;

        let backend = BackendConfig::from_env()?;

        let cache_ttl_secs = match get_optional_env("CONSOLE_CACHE_TTL_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("CONSOLE_CACHE_TTL_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            backend,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        if let Some(raw) = get_optional_env("MARKETPLACE_API_URL") {
            let base_url = Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("MARKETPLACE_API_URL".to_string(), e.to_string())
            })?;
            let token = get_optional_env("MARKETPLACE_API_TOKEN").map(SecretString::from);
            return Ok(Self::Rest { base_url, token });
        }

        let dir = PathBuf::from(get_env_or_default("SNAPSHOT_DIR", DEFAULT_SNAPSHOT_DIR));
        Ok(Self::Snapshot { dir })
    }

    /// Whether this backend accepts writes.
    ///
    /// Snapshot mode acknowledges mutations without persisting them, so the
    /// UI can mark write actions accordingly.
    #[must_use]
    pub const fn writable(&self) -> bool {
        matches!(self, Self::Rest { .. })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot_config() -> ConsoleConfig {
        ConsoleConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            backend: BackendConfig::Snapshot {
                dir: PathBuf::from("public/Entities"),
            },
            cache_ttl: Duration::from_secs(30),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = snapshot_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_snapshot_backend_is_read_only() {
        assert!(!snapshot_config().backend.writable());
    }

    #[test]
    fn test_rest_backend_is_writable() {
        let backend = BackendConfig::Rest {
            base_url: Url::parse("http://localhost:8080").unwrap(),
            token: None,
        };
        assert!(backend.writable());
    }

    #[test]
    fn test_rest_backend_debug_redacts_token() {
        let backend = BackendConfig::Rest {
            base_url: Url::parse("http://localhost:8080").unwrap(),
            token: Some(SecretString::from("mk_live_super_secret")),
        };

        let debug_output = format!("{backend:?}");

        assert!(debug_output.contains("http://localhost:8080"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("mk_live_super_secret"));
    }
}

//! Intake service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (production only)
//! - `INTAKE_DATABASE_URL` - Record store connection string (falls back to
//!   `DATABASE_URL`). `memory://` selects the in-process store.
//!
//! ## Optional
//! - `INTAKE_ENV` - Deployment mode, `production` or `development` (default: development)
//! - `INTAKE_HOST` - Bind address (default: 127.0.0.1)
//! - `INTAKE_PORT` - Listen port (default: 3000)
//! - `INTAKE_ALLOWED_ORIGINS` - Comma-separated origins allowed in production
//! - `INTAKE_BODY_LIMIT_BYTES` - Request body ceiling (default: 10 MiB)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (default: deployment mode)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use form_intake_core::DeploymentMode;

/// Connection string used outside production when none is configured.
pub const DEFAULT_DEV_DATABASE_URL: &str = "postgres://localhost:5432/form_intake";

/// Default request body ceiling (10 MiB).
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Intake service configuration.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Deployment mode (production or development)
    pub mode: DeploymentMode,
    /// Record store connection string (may contain a password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Cross-origin policy derived from the deployment mode
    pub cors: CorsConfig,
    /// Maximum accepted request body size in bytes
    pub body_limit_bytes: usize,
    /// Emit JSON logs instead of human-readable text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin (`*`).
    Any,
    /// Only the listed origins, in `scheme://host[:port]` form.
    List(Vec<String>),
}

/// Cross-origin policy settings.
///
/// Chosen once at startup; see [`CorsConfig::for_mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub origins: AllowedOrigins,
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// Methods every policy allows.
    pub const ALLOWED_METHODS: [&'static str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];

    /// Request headers every policy allows.
    pub const ALLOWED_HEADERS: [&'static str; 3] = ["Content-Type", "Authorization", "Accept"];

    /// Build the policy for a deployment mode.
    ///
    /// Development accepts any origin without credentials (browsers refuse a
    /// wildcard origin combined with credentials). Production only accepts
    /// the configured origins and allows credentials.
    #[must_use]
    pub fn for_mode(mode: DeploymentMode, allow_list: Vec<String>) -> Self {
        match mode {
            DeploymentMode::Development => Self {
                origins: AllowedOrigins::Any,
                allow_credentials: false,
            },
            DeploymentMode::Production => Self {
                origins: AllowedOrigins::List(allow_list),
                allow_credentials: true,
            },
        }
    }
}

impl IntakeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if the record store
    /// connection string is missing in production mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mode = get_env_or_default("INTAKE_ENV", DeploymentMode::default().as_str())
            .parse::<DeploymentMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("INTAKE_ENV".to_string(), e.to_string()))?;
        let database_url = get_database_url("INTAKE_DATABASE_URL", mode)?;
        let host = get_env_or_default("INTAKE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("INTAKE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("INTAKE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("INTAKE_PORT".to_string(), e.to_string()))?;
        let allow_list = parse_origins(
            "INTAKE_ALLOWED_ORIGINS",
            &get_optional_env("INTAKE_ALLOWED_ORIGINS").unwrap_or_default(),
        )?;
        let body_limit_bytes = get_optional_env("INTAKE_BODY_LIMIT_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("INTAKE_BODY_LIMIT_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
        let json_logs = get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            mode,
            database_url,
            host,
            port,
            cors: CorsConfig::for_mode(mode, allow_list),
            body_limit_bytes,
            json_logs,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
///
/// Outside production a local default is substituted when neither is set.
fn get_database_url(primary_key: &str, mode: DeploymentMode) -> Result<SecretString, ConfigError> {
    resolve_database_url(
        primary_key,
        get_optional_env(primary_key).or_else(|| get_optional_env("DATABASE_URL")),
        mode,
    )
}

fn resolve_database_url(
    primary_key: &str,
    configured: Option<String>,
    mode: DeploymentMode,
) -> Result<SecretString, ConfigError> {
    match configured {
        Some(value) => Ok(SecretString::from(value)),
        None if mode.is_production() => Err(ConfigError::MissingEnvVar(primary_key.to_string())),
        None => Ok(SecretString::from(DEFAULT_DEV_DATABASE_URL)),
    }
}

/// Get an optional, non-blank environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a comma-separated origin list into normalized `scheme://host[:port]` strings.
fn parse_origins(key: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            let url = Url::parse(origin)
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), format!("{origin}: {e}")))?;
            if url.host_str().is_none() {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    format!("{origin}: origin must have a host"),
                ));
            }
            Ok(url.origin().ascii_serialization())
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_missing_database_url_is_fatal_in_production() {
        let err = resolve_database_url("INTAKE_DATABASE_URL", None, DeploymentMode::Production)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "INTAKE_DATABASE_URL"));
    }

    #[test]
    fn test_missing_database_url_defaults_in_development() {
        let url =
            resolve_database_url("INTAKE_DATABASE_URL", None, DeploymentMode::Development).unwrap();
        assert_eq!(url.expose_secret(), DEFAULT_DEV_DATABASE_URL);
    }

    #[test]
    fn test_configured_database_url_wins() {
        let url = resolve_database_url(
            "INTAKE_DATABASE_URL",
            Some("memory://".to_string()),
            DeploymentMode::Production,
        )
        .unwrap();
        assert_eq!(url.expose_secret(), "memory://");
    }

    #[test]
    fn test_parse_origins_normalizes() {
        let origins = parse_origins(
            "TEST_ORIGINS",
            "https://example.com/, http://localhost:5173 ,,",
        )
        .unwrap();
        assert_eq!(
            origins,
            vec![
                "https://example.com".to_string(),
                "http://localhost:5173".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins("TEST_ORIGINS", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_origins_rejects_garbage() {
        let err = parse_origins("TEST_ORIGINS", "not an origin").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_cors_for_development_is_open() {
        let cors = CorsConfig::for_mode(
            DeploymentMode::Development,
            vec!["https://example.com".to_string()],
        );
        assert_eq!(cors.origins, AllowedOrigins::Any);
        assert!(!cors.allow_credentials);
    }

    #[test]
    fn test_cors_for_production_uses_allow_list() {
        let cors = CorsConfig::for_mode(
            DeploymentMode::Production,
            vec!["https://example.com".to_string()],
        );
        assert_eq!(
            cors.origins,
            AllowedOrigins::List(vec!["https://example.com".to_string()])
        );
        assert!(cors.allow_credentials);
    }

    #[test]
    fn test_socket_addr() {
        let config = IntakeConfig {
            mode: DeploymentMode::Development,
            database_url: SecretString::from("memory://"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            cors: CorsConfig::for_mode(DeploymentMode::Development, Vec::new()),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            json_logs: false,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = IntakeConfig {
            mode: DeploymentMode::Production,
            database_url: SecretString::from("postgres://user:hunter2@db/intake"),
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            cors: CorsConfig::for_mode(DeploymentMode::Production, Vec::new()),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            json_logs: true,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}

use std::path::PathBuf;

use fansite_db::StoreBackend;

/// Invalid or inconsistent environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("STORE_BACKEND=redis requires REDIS_URL to be set")]
    MissingRedisUrl,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development, where the site
/// runs on an in-memory store with the admin gate open.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Shared secret for admin endpoints. `None` leaves them open.
    pub admin_password: Option<String>,
    /// Backing store selection.
    pub store: StoreBackend,
    /// Degrade to in-memory storage when the durable backend fails (default: `true`).
    pub store_fallback: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `3000`                                    |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                                      |
    /// | `ADMIN_PASSWORD`       | unset (admin gate open)                   |
    /// | `STORE_BACKEND`        | `redis` if `REDIS_URL` is set, else `memory` |
    /// | `REDIS_URL`            | unset                                     |
    /// | `DATA_DIR`             | `./data` (file backend only)              |
    /// | `STORE_FALLBACK`       | `true`                                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// when set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 3000u16, "a port number")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS"),
            30u64,
            "a number of seconds",
        )?;
        let shutdown_timeout_secs = parse_or(
            "SHUTDOWN_TIMEOUT_SECS",
            var("SHUTDOWN_TIMEOUT_SECS"),
            30u64,
            "a number of seconds",
        )?;

        let admin_password = var("ADMIN_PASSWORD");

        let redis_url = var("REDIS_URL");
        let store = match var("STORE_BACKEND").as_deref().map(str::trim) {
            Some("memory") => StoreBackend::Memory,
            Some("file") => StoreBackend::File(
                var("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./data")),
            ),
            Some("redis") => StoreBackend::Redis(redis_url.ok_or(ConfigError::MissingRedisUrl)?),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND",
                    value: other.to_string(),
                    expected: "one of memory, file, redis",
                })
            }
            None => match redis_url {
                Some(url) => StoreBackend::Redis(url),
                None => StoreBackend::Memory,
            },
        };

        let store_fallback = match var("STORE_FALLBACK").as_deref().map(str::trim) {
            None => true,
            Some("true" | "1" | "yes") => true,
            Some("false" | "0" | "no") => false,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_FALLBACK",
                    value: other.to_string(),
                    expected: "true or false",
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            admin_password,
            store,
            store_fallback,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            value,
            expected,
        }),
    }
}

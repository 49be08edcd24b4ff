use pingboard_analytics::metrics::READS_PER_CATEGORY;

use crate::auth::jwt::JwtConfig;

/// `RUST_LOG` fallback when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "pingboard_api=debug,pingboard_analytics=debug,tower_http=debug";

/// Largest category fan-out whose reads all fit in a pool of
/// `db_max_connections`. Never below one.
pub fn default_metrics_concurrency(db_max_connections: u32) -> usize {
    (db_max_connections as usize / READS_PER_CATEGORY).max(1)
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// Categories whose metrics are computed at once when listing (default: pool size / 3).
    pub metrics_concurrency: usize,
    /// Upper bound on pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// JWT verification settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `METRICS_CONCURRENCY`  | `DB_MAX_CONNECTIONS / 3`   |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values, or if `METRICS_CONCURRENCY` is zero.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let metrics_concurrency: usize = match std::env::var("METRICS_CONCURRENCY") {
            Ok(raw) => raw
                .parse()
                .expect("METRICS_CONCURRENCY must be a valid usize"),
            Err(_) => default_metrics_concurrency(db_max_connections),
        };
        assert!(metrics_concurrency > 0, "METRICS_CONCURRENCY must be at least 1");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            metrics_concurrency,
            db_max_connections,
            jwt,
        }
    }
}

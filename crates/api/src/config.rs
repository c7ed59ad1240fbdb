use std::path::PathBuf;

use crewpay_rates::api::{DEFAULT_RATES_URL, DEFAULT_TIMEOUT};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Directory holding one JSON profile per identity (default: `user_data`).
    pub data_dir: PathBuf,
    /// Latest-rates endpoint keyed off USD.
    pub rates_url: String,
    /// Outbound rate request timeout in seconds (default: `5`).
    pub rates_timeout_secs: u64,
    /// Session token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                 |
    /// |------------------------|-----------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                               |
    /// | `PORT`                 | `3000`                                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                 |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                    |
    /// | `DATA_DIR`             | `user_data`                             |
    /// | `RATES_URL`            | `https://open.er-api.com/v6/latest/USD` |
    /// | `RATES_TIMEOUT_SECS`   | `5`                                     |
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

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("user_data"));

        let rates_url = std::env::var("RATES_URL").unwrap_or_else(|_| DEFAULT_RATES_URL.into());

        let rates_timeout_secs: u64 = std::env::var("RATES_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT.as_secs().to_string())
            .parse()
            .expect("RATES_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_dir,
            rates_url,
            rates_timeout_secs,
            jwt,
        }
    }
}

use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Runtime configuration for the HTTP server, read from the environment.
///
/// Everything except `JWT_SECRET` has a default that works for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma-separated, default
    /// `http://localhost:5173`).
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds (`REQUEST_TIMEOUT_SECS`, default `30`).
    pub request_timeout_secs: u64,
    /// Token signing secret and expiries.
    pub jwt: JwtConfig,
}

/// Read an env var, falling back to `default`.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`. Configuration
/// problems should abort startup, not limp along.
fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} is set but not a valid value")),
        Err(_) => default,
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parsed("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }
}

//! Environment-driven configuration for both binaries.
//!
//! Values are read through a lookup function so tests can supply a map
//! instead of mutating the process environment.

use std::path::PathBuf;
use std::str::FromStr;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Default trivia port.
pub const TRIVIA_DEFAULT_PORT: u16 = 5000;
/// Default coffee-shop port.
pub const COFFEE_SHOP_DEFAULT_PORT: u16 = 5001;

/// HTTP and database settings shared by both services.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`; `*` allows any.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. When unset the service runs on an in-memory store.
    pub database_url: Option<String>,
    /// Pool size (default: `10`).
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load from the process environment.
    ///
    /// | Env Var                | Default        |
    /// |------------------------|----------------|
    /// | `HOST`                 | `0.0.0.0`      |
    /// | `PORT`                 | `default_port` |
    /// | `CORS_ORIGINS`         | `*`            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`           |
    /// | `DATABASE_URL`         | unset          |
    /// | `DB_MAX_CONNECTIONS`   | `10`           |
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(default_port, env_lookup)
    }

    pub fn from_lookup(
        default_port: u16,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", default_port)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
        })
    }

    /// Whether any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Identity-provider settings for the coffee-shop auth gate.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Provider domain, e.g. `my-tenant.us.auth0.com`.
    pub domain: String,
    /// API audience tokens must be issued for.
    pub audience: String,
    /// Local JWKS document used instead of downloading it.
    pub jwks_path: Option<PathBuf>,
    /// Single PEM public key used instead of a JWKS.
    pub public_key_path: Option<PathBuf>,
}

impl AuthSettings {
    /// Expected `iss` claim.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// Published JWKS location.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}

/// Full configuration of the coffee-shop binary.
#[derive(Debug, Clone)]
pub struct CoffeeShopConfig {
    pub server: ServerConfig,
    pub auth: AuthSettings,
    /// Drop all drinks and seed the sample drink at startup.
    pub reset_drinks_on_start: bool,
}

impl CoffeeShopConfig {
    /// Load from the process environment.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `AUTH_DOMAIN`           | **yes**  | --      |
    /// | `AUTH_AUDIENCE`         | **yes**  | --      |
    /// | `AUTH_JWKS_PATH`        | no       | unset   |
    /// | `AUTH_PUBLIC_KEY_PATH`  | no       | unset   |
    /// | `DRINKS_RESET_ON_START` | no       | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server = ServerConfig::from_lookup(COFFEE_SHOP_DEFAULT_PORT, &lookup)?;

        let auth = AuthSettings {
            domain: required(&lookup, "AUTH_DOMAIN")?,
            audience: required(&lookup, "AUTH_AUDIENCE")?,
            jwks_path: lookup("AUTH_JWKS_PATH").map(PathBuf::from),
            public_key_path: lookup("AUTH_PUBLIC_KEY_PATH").map(PathBuf::from),
        };

        let reset_drinks_on_start = parse_or(&lookup, "DRINKS_RESET_ON_START", false)?;

        Ok(Self {
            server,
            auth,
            reset_drinks_on_start,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

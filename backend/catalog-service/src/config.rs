//! Configuration management for Catalog Service
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! # Example
//!
//! ```no_run
//! use catalog_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("gRPC port: {}", settings.server.port);
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub jwt: JwtSettings,
    pub password: PasswordSettings,
    /// `None` selects the in-memory stores
    pub database: Option<DatabaseSettings>,
    pub server: ServerSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            jwt: JwtSettings::from_env()?,
            password: PasswordSettings::from_env()?,
            database: DatabaseSettings::from_env()?,
            server: ServerSettings::from_env()?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.parse().with_context(|| format!("Invalid {key}")),
        Err(_) => Ok(default),
    }
}

/// Token signing settings
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl JwtSettings {
    pub const DEFAULT_TTL_SECS: i64 = 12 * 60 * 60;
    /// Ten years
    pub const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

    fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let token_ttl_secs = parse_or("TOKEN_TTL_SECS", Self::DEFAULT_TTL_SECS)?;
        if token_ttl_secs.unsigned_abs() > Self::MAX_TTL_SECS.unsigned_abs() {
            anyhow::bail!(
                "TOKEN_TTL_SECS must be within +/-{} seconds",
                Self::MAX_TTL_SECS
            );
        }

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }

    /// Token lifetime, clamped to +/- [`Self::MAX_TTL_SECS`]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(
            self.token_ttl_secs
                .clamp(-Self::MAX_TTL_SECS, Self::MAX_TTL_SECS),
        )
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordSettings {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            memory_kib: parse_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        })
    }
}

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    fn from_env() -> Result<Option<Self>> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => return Ok(None),
        };

        Ok(Some(Self {
            url,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
        }))
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// gRPC listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("GRPC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("GRPC_PORT", 50051)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

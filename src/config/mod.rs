//! Environment-sourced application configuration
//!
//! All knobs default to values suitable for local development, so a bare
//! `salescart` process starts without any environment set up:
//!
//! - `APP_ENV`: environment name (default: development)
//! - `PORT`: HTTP listen port (default: 3000)
//! - `STORAGE_BACKEND`: `database` | `memory` (default: database)
//! - `MONGODB_URI`: MongoDB connection string (default: mongodb://localhost:27017/salescart)
//! - `REDIS_HOST` / `REDIS_PORT`: cache store (default: localhost:6379)
//! - `JWT_SECRET`: token signing secret (default: dev-only placeholder)
//! - `JWT_EXPIRY`: token lifetime in humantime form, e.g. "7d" (default: 7d)
//! - `REQUEST_TIMEOUT`: per-request budget in milliseconds (default: 30000)
//!
//! Unparseable numeric values fall back to their defaults rather than
//! aborting startup.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Storage backend selected at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Durable MongoDB document store
    #[default]
    Database,
    /// Process-local, non-persistent map (wiped on restart)
    Memory,
}

impl StorageBackend {
    /// Parse the backend selector from a string.
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => Self::Memory,
            _ => Self::Database,
        }
    }

    /// Backend name as used in config and health output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Memory => "memory",
        }
    }

    /// Whether the in-memory backend is selected.
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

/// Cache store location.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

impl RedisConfig {
    /// Connection URL for the redis client.
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

/// Token signing settings.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry: Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub mongodb_uri: String,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            port: 3000,
            storage_backend: StorageBackend::Database,
            mongodb_uri: "mongodb://localhost:27017/salescart".to_string(),
            redis: RedisConfig {
                host: "localhost".to_string(),
                port: 6379,
            },
            jwt: JwtConfig {
                secret: "your-secret-key".to_string(),
                expiry: Duration::from_secs(7 * 24 * 60 * 60),
            },
            request_timeout: Duration::from_millis(30_000),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            env: var("APP_ENV").unwrap_or(defaults.env),
            port: parsed("PORT", defaults.port),
            storage_backend: var("STORAGE_BACKEND")
                .map(|s| StorageBackend::from_str_case_insensitive(&s))
                .unwrap_or_default(),
            mongodb_uri: var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            redis: RedisConfig {
                host: var("REDIS_HOST").unwrap_or(defaults.redis.host),
                port: parsed("REDIS_PORT", defaults.redis.port),
            },
            jwt: JwtConfig {
                secret: var("JWT_SECRET").unwrap_or(defaults.jwt.secret),
                expiry: var("JWT_EXPIRY")
                    .and_then(|s| humantime::parse_duration(&s).ok())
                    .unwrap_or(defaults.jwt.expiry),
            },
            request_timeout: Duration::from_millis(parsed(
                "REQUEST_TIMEOUT",
                defaults.request_timeout.as_millis() as u64,
            )),
        }
    }

    /// Address for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Whether the test-only endpoints are enabled.
    pub fn is_test_env(&self) -> bool {
        self.env == "test"
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    var(name).and_then(|s| s.parse().ok()).unwrap_or(default)
}

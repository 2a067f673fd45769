//! salescart server binary
//!
//! # Environment variables
//!
//! All optional, with local-development defaults:
//!
//! - `APP_ENV`: environment name (default: development)
//! - `PORT`: HTTP listen port (default: 3000)
//! - `STORAGE_BACKEND`: `database` | `memory` (default: database)
//! - `MONGODB_URI`: MongoDB connection string
//! - `REDIS_HOST` / `REDIS_PORT`: cache store location
//! - `JWT_SECRET` / `JWT_EXPIRY`: token signing secret and lifetime ("7d")
//! - `REQUEST_TIMEOUT`: per-request budget in milliseconds (default: 30000)
//! - `RUST_LOG`: log filter (default: info)

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use salescart::cache::Cache;
use salescart::config::AppConfig;
use salescart::server::{AppState, build_router, serve};
use salescart::storage::Backend;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        env = %config.env,
        backend = config.storage_backend.as_str(),
        port = config.port,
        "starting salescart"
    );

    let backend = Backend::connect(&config).await?;

    // The cache store only accompanies the durable backend; memory mode
    // runs without external services.
    let cache = if config.storage_backend.is_memory() {
        None
    } else {
        Some(Cache::connect(&config.redis.url()).await?)
    };

    let state = AppState::new(&config, backend, cache);
    let app = build_router(state);

    serve(&config.listen_addr(), app).await
}

//! Pass-through key/value TTL cache over Redis
//!
//! Deliberately policy-free: callers get/set/delete JSON blobs under string
//! keys with a TTL (default one hour) and nothing more. Operational
//! failures are logged and swallowed — a broken cache never fails a
//! request, it only stops caching. The cache is connected only when the
//! durable storage backend is selected; the health endpoint pings it.

use anyhow::{Context, Result};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// TTL applied when the caller does not pass one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Shared handle to the cache store.
#[derive(Clone)]
pub struct Cache {
    conn: MultiplexedConnection,
}

impl Cache {
    /// Connect to the cache store at the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).context("Invalid Redis URL")?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;

        tracing::info!(url, "connected to Redis");
        Ok(Self { conn })
    }

    /// Fetch and decode a cached value. Misses and failures both yield `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache get failed");
                None
            }
        }
    }

    /// Store a value under the key with the given TTL (default 1h).
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache serialization failed");
                return;
            }
        };

        let ttl = ttl.unwrap_or(DEFAULT_TTL);
        let mut conn = self.conn.clone();
        if let Err(e) = conn.set_ex::<_, _, ()>(key, raw, ttl.as_secs()).await {
            tracing::warn!(key, error = %e, "cache set failed");
        }
    }

    /// Drop a key. Absent keys and failures are both fine.
    pub async fn delete(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(key).await {
            tracing::warn!(key, error = %e, "cache delete failed");
        }
    }

    /// Verify the cache store is reachable.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis ping failed")?;
        Ok(())
    }
}

//! Backend selection
//!
//! The backend is chosen once at process start from the configuration and
//! injected into the repositories; repository code never branches on the
//! storage kind.

use anyhow::{Context, Result};
use mongodb::{Client, Database, bson::doc};
use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};

use super::{Collection, InMemoryStore, MongoCollection, Record};

/// The concrete storage mechanism selected at startup.
#[derive(Clone)]
pub enum Backend {
    /// Process-local, non-persistent map store
    Memory(InMemoryStore),
    /// Durable MongoDB document store
    Mongo(Database),
}

impl Backend {
    /// Build the backend named by the configuration.
    ///
    /// The memory backend is constructed without I/O; the database backend
    /// connects to MongoDB using the configured URI (the database name is
    /// taken from the URI path, falling back to `salescart`).
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => Ok(Self::Memory(InMemoryStore::new())),
            StorageBackend::Database => {
                let client = Client::with_uri_str(&config.mongodb_uri)
                    .await
                    .context("Failed to connect to MongoDB")?;
                let database = client
                    .default_database()
                    .unwrap_or_else(|| client.database("salescart"));
                Ok(Self::Mongo(database))
            }
        }
    }

    /// Hand out the typed handle for a named collection.
    pub fn collection<T: Record>(&self, name: &str) -> Arc<dyn Collection<T>> {
        match self {
            Self::Memory(store) => Arc::new(store.collection::<T>(name)),
            Self::Mongo(database) => Arc::new(MongoCollection::<T>::new(database.clone(), name)),
        }
    }

    /// Verify the backend is reachable.
    ///
    /// The memory backend is always healthy; the database backend runs the
    /// `ping` command.
    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Mongo(database) => {
                database
                    .run_command(doc! { "ping": 1 })
                    .await
                    .context("MongoDB ping failed")?;
                Ok(())
            }
        }
    }

    /// Which backend kind this is.
    pub const fn kind(&self) -> StorageBackend {
        match self {
            Self::Memory(_) => StorageBackend::Memory,
            Self::Mongo(_) => StorageBackend::Database,
        }
    }
}

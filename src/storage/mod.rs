//! Storage backends behind a single polymorphic collection interface
//!
//! Repositories never see the concrete backend: they hold an
//! `Arc<dyn Collection<T>>` handed out by [`Backend`], which is built once
//! at startup from the configured storage selector. Both implementations
//! satisfy the identical contract, and no backend-specific query semantics
//! leak through the trait signatures.

pub mod backend;
pub mod in_memory;
pub mod mongodb;

pub use backend::Backend;
pub use in_memory::{InMemoryCollection, InMemoryStore};
pub use mongodb::MongoCollection;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Bounds every stored record type must satisfy.
///
/// Blanket-implemented; domain records qualify automatically.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> Record for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// One logical document collection keyed by record id.
///
/// Absence is part of the contract, not an error: `find_by_id` returns
/// `None` and `replace`/`delete` return `false` when the id is unknown.
/// Errors are reserved for backend failures.
#[async_trait]
pub trait Collection<T: Record>: Send + Sync {
    /// Insert a new record under the given id.
    async fn insert(&self, id: &str, record: &T) -> Result<()>;

    /// Fetch a record by id, `None` when absent.
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Fetch all records whose (string) field equals the given value.
    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>>;

    /// List a page of records.
    ///
    /// The in-memory backend pages in insertion order; the durable backend
    /// pages in backend-default order. Callers must not rely on ordering.
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<T>>;

    /// Replace an existing record, `false` when the id is unknown.
    async fn replace(&self, id: &str, record: &T) -> Result<bool>;

    /// Delete a record, `false` when the id is unknown.
    async fn delete(&self, id: &str) -> Result<bool>;
}

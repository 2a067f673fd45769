//! In-memory storage backend for testing and development
//!
//! One insertion-ordered map per named collection, shared behind an
//! `RwLock`. Records are held as `serde_json::Value` so the same handle can
//! serve any record type and field filters see the same camelCase names the
//! durable backend stores. There is no eviction and no size bound; the
//! store is wiped whenever the process restarts.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use super::{Collection, Record};

type SharedMap = Arc<RwLock<IndexMap<String, serde_json::Value>>>;

/// Process-local store holding every named collection.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, SharedMap>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the typed handle for a named collection.
    ///
    /// Handles for the same name share the underlying map.
    pub fn collection<T: Record>(&self, name: &str) -> InMemoryCollection<T> {
        // A poisoned lock only means another thread panicked mid-write;
        // the map itself is still usable.
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let map = collections.entry(name.to_string()).or_default().clone();

        InMemoryCollection {
            map,
            _marker: PhantomData,
        }
    }

    /// Drop every collection. Used by tests to reset shared state.
    pub fn clear(&self) {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Typed view over one named in-memory collection.
#[derive(Clone)]
pub struct InMemoryCollection<T> {
    map: SharedMap,
    _marker: PhantomData<T>,
}

impl<T: Record> InMemoryCollection<T> {
    fn encode(record: &T) -> Result<serde_json::Value> {
        serde_json::to_value(record).map_err(|e| anyhow!("Failed to serialize record: {}", e))
    }

    fn decode(value: &serde_json::Value) -> Result<T> {
        serde_json::from_value(value.clone())
            .map_err(|e| anyhow!("Failed to deserialize record: {}", e))
    }
}

#[async_trait]
impl<T: Record> Collection<T> for InMemoryCollection<T> {
    async fn insert(&self, id: &str, record: &T) -> Result<()> {
        let value = Self::encode(record)?;
        let mut map = self
            .map
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        map.insert(id.to_string(), value);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let map = self
            .map
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        map.get(id).map(|value| Self::decode(value)).transpose()
    }

    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let map = self
            .map
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        map.values()
            .filter(|record| {
                record
                    .get(field)
                    .and_then(|v| v.as_str())
                    .is_some_and(|v| v == value)
            })
            .map(Self::decode)
            .collect()
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<T>> {
        let map = self
            .map
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        // IndexMap iterates in insertion order, matching the documented
        // in-memory listing behavior.
        map.values()
            .skip(offset)
            .take(limit)
            .map(Self::decode)
            .collect()
    }

    async fn replace(&self, id: &str, record: &T) -> Result<bool> {
        let value = Self::encode(record)?;
        let mut map = self
            .map
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !map.contains_key(id) {
            return Ok(false);
        }
        map.insert(id.to_string(), value);
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut map = self
            .map
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // shift_remove keeps the insertion order of the remaining records
        Ok(map.shift_remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Doc {
        id: String,
        account_id: Option<String>,
        label: String,
    }

    fn doc(id: &str, account_id: Option<&str>, label: &str) -> Doc {
        Doc {
            id: id.to_string(),
            account_id: account_id.map(String::from),
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let store = InMemoryStore::new();
        let items = store.collection::<Doc>("items");

        items.insert("a", &doc("a", None, "first")).await.unwrap();

        let found = items.find_by_id("a").await.unwrap();
        assert_eq!(found, Some(doc("a", None, "first")));
        assert!(items.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_pages_in_insertion_order() {
        let store = InMemoryStore::new();
        let items = store.collection::<Doc>("items");

        for n in 0..5 {
            let id = format!("id-{n}");
            items.insert(&id, &doc(&id, None, "x")).await.unwrap();
        }

        let page = items.list(2, 1).await.unwrap();
        let ids: Vec<&str> = page.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["id-1", "id-2"]);

        let beyond = items.list(10, 99).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_field_matches_camel_case_names() {
        let store = InMemoryStore::new();
        let items = store.collection::<Doc>("items");

        items
            .insert("a", &doc("a", Some("acct-1"), "one"))
            .await
            .unwrap();
        items
            .insert("b", &doc("b", Some("acct-2"), "two"))
            .await
            .unwrap();
        items.insert("c", &doc("c", None, "three")).await.unwrap();

        let matched = items.find_by_field("accountId", "acct-1").await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "a");
    }

    #[tokio::test]
    async fn test_replace_only_existing() {
        let store = InMemoryStore::new();
        let items = store.collection::<Doc>("items");

        assert!(!items.replace("a", &doc("a", None, "v2")).await.unwrap());

        items.insert("a", &doc("a", None, "v1")).await.unwrap();
        assert!(items.replace("a", &doc("a", None, "v2")).await.unwrap());
        assert_eq!(
            items.find_by_id("a").await.unwrap().unwrap().label,
            "v2".to_string()
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_signalled_by_bool() {
        let store = InMemoryStore::new();
        let items = store.collection::<Doc>("items");

        items.insert("a", &doc("a", None, "x")).await.unwrap();
        assert!(items.delete("a").await.unwrap());
        assert!(!items.delete("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_named_collections_are_isolated_but_shared_by_name() {
        let store = InMemoryStore::new();
        let first = store.collection::<Doc>("first");
        let second = store.collection::<Doc>("second");

        first.insert("a", &doc("a", None, "x")).await.unwrap();
        assert!(second.find_by_id("a").await.unwrap().is_none());

        // A second handle with the same name sees the same records
        let first_again = store.collection::<Doc>("first");
        assert!(first_again.find_by_id("a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_wipes_everything() {
        let store = InMemoryStore::new();
        let items = store.collection::<Doc>("items");
        items.insert("a", &doc("a", None, "x")).await.unwrap();

        store.clear();

        let items = store.collection::<Doc>("items");
        assert!(items.list(100, 0).await.unwrap().is_empty());
    }
}

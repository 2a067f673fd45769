//! MongoDB storage backend using the official async driver
//!
//! Each logical collection maps to one MongoDB collection. Records are
//! serialized via `serde_json::Value` as an intermediate format and
//! converted to BSON documents, with the record's `id` field mapped to
//! MongoDB's `_id` convention on the way in and back on the way out. This
//! keeps ids and timestamps stored as plain strings, identical to what the
//! in-memory backend holds.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use std::marker::PhantomData;

use super::{Collection, Record};

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a `serde_json::Value` (expected to be an Object) into a BSON
/// Document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val =
        mongodb::bson::to_bson(&json).map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a `serde_json::Value`, renaming
/// `_id` → `id` for the domain record convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

// ---------------------------------------------------------------------------
// MongoCollection<T>
// ---------------------------------------------------------------------------

/// One MongoDB-backed collection of records.
#[derive(Clone, Debug)]
pub struct MongoCollection<T> {
    collection: mongodb::Collection<Document>,
    _marker: PhantomData<T>,
}

impl<T: Record> MongoCollection<T> {
    /// Create a handle over the named collection of the given database.
    pub fn new(database: Database, name: &str) -> Self {
        Self {
            collection: database.collection(name),
            _marker: PhantomData,
        }
    }

    fn record_to_document(record: &T) -> Result<Document> {
        let json = serde_json::to_value(record)
            .map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
        json_to_document(json)
    }

    fn document_to_record(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize record from document: {}", e))
    }

    async fn collect_records(
        cursor: mongodb::Cursor<Document>,
    ) -> Result<Vec<T>> {
        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect records: {}", e))?;

        docs.into_iter().map(Self::document_to_record).collect()
    }
}

#[async_trait]
impl<T: Record> Collection<T> for MongoCollection<T> {
    async fn insert(&self, id: &str, record: &T) -> Result<()> {
        let mut doc = Self::record_to_document(record)?;
        // The record carries its own id; keep _id in sync with it
        doc.insert("_id", id);

        self.collection
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert record: {}", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let doc = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to get record: {}", e))?;

        doc.map(Self::document_to_record).transpose()
    }

    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>> {
        let cursor = self
            .collection
            .find(doc! { field: value })
            .await
            .map_err(|e| anyhow!("Failed to query records: {}", e))?;

        Self::collect_records(cursor).await
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<T>> {
        // No explicit sort: listing order is backend-default by contract
        let cursor = self
            .collection
            .find(doc! {})
            .skip(offset as u64)
            .limit(limit as i64)
            .await
            .map_err(|e| anyhow!("Failed to list records: {}", e))?;

        Self::collect_records(cursor).await
    }

    async fn replace(&self, id: &str, record: &T) -> Result<bool> {
        let mut doc = Self::record_to_document(record)?;
        doc.insert("_id", id);

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, doc)
            .await
            .map_err(|e| anyhow!("Failed to replace record: {}", e))?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to delete record: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_to_document_renames_id() {
        let input = json!({"id": "abc", "name": "test"});
        let doc = json_to_document(input).unwrap();

        assert!(doc.contains_key("_id"), "document should contain _id");
        assert!(!doc.contains_key("id"), "document should not contain id");
        assert_eq!(doc.get_str("_id").unwrap(), "abc");
        assert_eq!(doc.get_str("name").unwrap(), "test");
    }

    #[test]
    fn test_json_to_document_non_object_is_error() {
        let result = json_to_document(json!("just a string"));
        assert!(result.is_err());
    }

    #[test]
    fn test_document_to_json_renames_underscore_id() {
        let doc = doc! { "_id": "abc", "subtotal": 42.5 };
        let json = document_to_json(doc);

        assert_eq!(json["id"], "abc");
        assert_eq!(json["subtotal"], 42.5);
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_roundtrip_preserves_nested_structure() {
        let original = json!({
            "id": "cart-1",
            "accountId": "acct-1",
            "items": [
                {"productId": "p1", "quantity": 2, "price": 10.0, "total": 20.0}
            ],
            "subtotal": 20.0
        });

        let doc = json_to_document(original.clone()).unwrap();
        let back = document_to_json(doc);

        assert_eq!(back["id"], "cart-1");
        assert_eq!(back["items"][0]["productId"], "p1");
        assert_eq!(back["items"][0]["total"], 20.0);
        assert_eq!(back["subtotal"], 20.0);
    }
}

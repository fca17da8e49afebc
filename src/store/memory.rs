/**
 * In-Memory Document Store
 *
 * Development and test substitute for Firestore. State lives in a
 * process-local map and is lost on restart. Filtering, limits, and
 * overwrite semantics match the Firestore backend exactly so handlers
 * cannot tell the two apart.
 */

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, Fields, StoreError};

/// In-memory document store keyed by collection name then document id
///
/// A `BTreeMap` per collection keeps iteration order deterministic,
/// which makes test assertions stable.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection (test helper)
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn matches_filters(doc: &Fields, filters: &Fields) -> bool {
    filters
        .iter()
        .all(|(field, expected)| doc.get(field) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn save(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &Fields,
        limit: usize,
    ) -> Result<Vec<Fields>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut results = Vec::new();
        for (id, doc) in docs {
            if !matches_filters(doc, filters) {
                continue;
            }
            let mut row = doc.clone();
            row.insert("id".to_string(), Value::String(id.clone()));
            results.push(row);
            if results.len() >= limit {
                break;
            }
        }
        Ok(results)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fields;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_document() {
        let store = MemoryStore::new();
        let doc = store.get("users", "nobody").await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = MemoryStore::new();
        store
            .save("users", "u1", fields([("email", json!("a@example.com"))]))
            .await
            .unwrap();

        let doc = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc.get("email"), Some(&json!("a@example.com")));
    }

    #[tokio::test]
    async fn test_save_is_full_overwrite() {
        let store = MemoryStore::new();
        store
            .save(
                "users",
                "u1",
                fields([("email", json!("a@example.com")), ("name", json!("A"))]),
            )
            .await
            .unwrap();
        store
            .save("users", "u1", fields([("email", json!("b@example.com"))]))
            .await
            .unwrap();

        let doc = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc.get("email"), Some(&json!("b@example.com")));
        // Overwrite semantics: the old "name" field is gone, not merged
        assert!(doc.get("name").is_none());
    }

    #[tokio::test]
    async fn test_query_equality_filters() {
        let store = MemoryStore::new();
        store
            .save(
                "posts",
                "p1",
                fields([("status", json!("active")), ("category", json!("general"))]),
            )
            .await
            .unwrap();
        store
            .save(
                "posts",
                "p2",
                fields([("status", json!("deleted")), ("category", json!("general"))]),
            )
            .await
            .unwrap();

        let rows = store
            .query("posts", &fields([("status", json!("active"))]), 100)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some(&json!("p1")));
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store
                .save("items", &format!("i{i}"), fields([("kind", json!("x"))]))
                .await
                .unwrap();
        }

        let rows = store
            .query("items", &fields([("kind", json!("x"))]), 3)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = MemoryStore::new();
        store
            .save("users", "u1", fields([("email", json!("a@example.com"))]))
            .await
            .unwrap();

        assert!(store.delete("users", "u1").await.unwrap());
        assert!(!store.delete("users", "u1").await.unwrap());
        assert!(store.get("users", "u1").await.unwrap().is_none());
    }
}

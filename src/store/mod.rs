/**
 * Document Store Adapter
 *
 * This module defines the uniform document store interface used by all
 * handlers, with two implementations:
 *
 * - `FirestoreStore` - the production backend, speaking the Firestore
 *   REST API over HTTPS
 * - `MemoryStore` - an in-memory substitute used when no Firestore
 *   credentials are configured (and in tests)
 *
 * # Semantics
 *
 * Both backends behave identically:
 * - `save` is a full-document overwrite, not a partial merge
 * - `query` supports equality filters only, with a capped result size
 * - last write wins; there are no transactions and no cross-document
 *   atomicity, so callers accept read-modify-write races on counters
 *
 * Handlers hold an `Arc<dyn DocumentStore>` and never know which backend
 * is live; the choice is made once at startup.
 */

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A loosely-typed document: field name to JSON value
///
/// There is no schema enforcement at this layer; request-body validation
/// at the API boundary is the only shape check.
pub type Fields = serde_json::Map<String, Value>;

/// Default cap on rows returned by `query`
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Errors produced by document store backends
///
/// These never reach clients directly; `ApiError::from` collapses them
/// into a generic 500 after logging.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the request
    #[error("store request failed: {0}")]
    Request(String),

    /// The backend returned a payload we could not interpret
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// Uniform get/save/query/delete over named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short label for logs ("firestore" or "memory")
    fn backend_tag(&self) -> &'static str;

    /// Fetch a single document, or `None` if it does not exist
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError>;

    /// Write a document, replacing any existing content under this id
    async fn save(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Fetch documents matching all equality filters, up to `limit` rows
    ///
    /// Each returned row carries its document id under the `"id"` key in
    /// addition to the stored fields.
    async fn query(
        &self,
        collection: &str,
        filters: &Fields,
        limit: usize,
    ) -> Result<Vec<Fields>, StoreError>;

    /// Delete a document; returns whether it existed
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}

/// Build a `Fields` map from (key, value) pairs
///
/// Convenience for handlers assembling documents and filters.
pub fn fields(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> Fields {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

//! Search backend trait definition.
//!
//! This module defines the untyped, JSON-level operations the document access
//! layer needs from a search engine. Typing (serialization of caller documents
//! and decoding of results) happens above this trait, in `ClientHandle`.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;

/// Abstracts the underlying search engine (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `ClientHandle`. Every method performs
/// exactly one request against the engine and holds no per-call state, so
/// implementations are shared across tasks behind an `Arc`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Check whether `index` exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(SearchError::IndexExistsCheckError)` - If the check could not be completed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create `index` with default settings.
    ///
    /// # Returns
    ///
    /// * `Ok(acknowledged)` - The engine's acknowledgement flag
    /// * `Err(SearchError::IndexAlreadyExists)` - If the engine reports the index as present
    /// * `Err(SearchError::IndexCreationError)` - If the call fails
    async fn create_index(&self, index: &str) -> Result<bool, SearchError>;

    /// Write `document` under (`index`, `id`), replacing any existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The identifier confirmed by the engine
    /// * `Err(SearchError::IndexError)` - If the write fails
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<String, SearchError>;

    /// Delete the document stored under (`index`, `id`).
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted
    /// * `Err(SearchError::NotFound)` - If there was no such document
    /// * `Err(SearchError::DeleteError)` - If the deletion fails
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError>;

    /// Fetch the stored source of the document under (`index`, `id`).
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw stored document body
    /// * `Err(SearchError::NotFound)` - If there is no such document
    /// * `Err(SearchError::GetError)` - If the fetch fails
    async fn get_source(&self, index: &str, id: &str) -> Result<Value, SearchError>;

    /// Run a search request body against `index`.
    ///
    /// The body carries the query and the result window (`from`/`size`).
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Value>)` - The `_source` of each hit, in engine order
    /// * `Err(SearchError::IndexNotFound)` - If the index does not exist
    /// * `Err(SearchError::QueryError)` - If the search fails
    async fn search(&self, index: &str, body: Value) -> Result<Vec<Value>, SearchError>;
}

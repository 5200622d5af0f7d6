//! Document access client implementation.
//!
//! This module provides the handle application code uses to provision indexes,
//! write, fetch, delete and search documents. Documents are caller-defined
//! serde types; everything below this layer is untyped JSON.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::errors::SearchError;
use crate::interfaces::SearchBackend;
use crate::opensearch::build_search_body;
use crate::types::SearchHits;
use docsearch_shared::SearchQuery;

/// The handle for document operations against one deployment.
///
/// Created once per target deployment by the client factory and shared by
/// cloning; every operation is an independent request/response sequence.
#[derive(Clone)]
pub struct ClientHandle {
    backend: Arc<dyn SearchBackend>,
}

impl ClientHandle {
    /// Create a handle over `backend`.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Make sure `index` exists, creating it with default settings if not.
    ///
    /// Existence is checked remotely on every call. Two callers racing on the
    /// same new index can both try to create it; the loser gets
    /// `SearchError::IndexAlreadyExists`.
    #[instrument(skip(self))]
    pub async fn ensure_index(&self, index: &str) -> Result<(), SearchError> {
        if self.backend.index_exists(index).await? {
            return Ok(());
        }

        info!(index = %index, "Creating new index as none existed");
        if !self.backend.create_index(index).await? {
            return Err(SearchError::CreateIndexNotAcknowledged(index.to_string()));
        }

        Ok(())
    }

    /// Write `document` under (`index`, `id`), creating the index on demand.
    ///
    /// Writing the same `id` again replaces the stored document. A failure
    /// after the index was created leaves the empty index in place.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The identifier confirmed by the engine
    /// * `Err(SearchError)` - From the existence check, creation, serialization or write
    #[instrument(skip(self, document))]
    pub async fn safe_index<T>(
        &self,
        id: &str,
        document: &T,
        index: &str,
    ) -> Result<String, SearchError>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_index(index).await?;

        let body = serde_json::to_value(document)
            .map_err(|e| SearchError::SerializationError(e.to_string()))?;

        let assigned = self.backend.index_document(index, id, body).await?;
        debug!(index = %index, doc_id = %assigned, "Document written");
        Ok(assigned)
    }

    /// Delete the document stored under (`index`, `id`).
    ///
    /// A missing document is reported as `SearchError::NotFound`.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str, index: &str) -> Result<(), SearchError> {
        self.backend.delete_document(index, id).await
    }

    /// Fetch the document stored under (`index`, `id`) as a `T`.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The decoded document
    /// * `Err(SearchError::NotFound)` - If nothing is stored under the identifier
    /// * `Err(SearchError::DeserializationError)` - If the stored body does not fit `T`
    #[instrument(skip(self))]
    pub async fn get_by_id<T>(&self, id: &str, index: &str) -> Result<T, SearchError>
    where
        T: DeserializeOwned,
    {
        let source = self.backend.get_source(index, id).await?;
        Ok(serde_json::from_value(source)?)
    }

    /// Fetch the document under (`index`, `id`) into `destination`.
    ///
    /// Returns `destination` again so calls can be chained. On error the
    /// destination is left untouched.
    pub async fn get_by_id_into<'a, T>(
        &self,
        id: &str,
        destination: &'a mut T,
        index: &str,
    ) -> Result<&'a mut T, SearchError>
    where
        T: DeserializeOwned,
    {
        *destination = self.get_by_id(id, index).await?;
        Ok(destination)
    }

    /// Find documents whose `field` starts with `term` as a phrase.
    ///
    /// Only the first window of matches is returned; there is no paging.
    pub async fn search<T>(
        &self,
        index: &str,
        field: &str,
        term: &str,
    ) -> Result<SearchHits<T>, SearchError>
    where
        T: DeserializeOwned,
    {
        self.search_query(index, &SearchQuery::phrase_prefix(field, term))
            .await
    }

    /// Find documents whose geo-point `field` lies within `distance` of (`lat`, `lon`).
    ///
    /// `distance` is a number with a unit, e.g. `"10km"`, and is not interpreted here.
    pub async fn search_by_location<T>(
        &self,
        index: &str,
        field: &str,
        distance: &str,
        lat: f64,
        lon: f64,
    ) -> Result<SearchHits<T>, SearchError>
    where
        T: DeserializeOwned,
    {
        self.search_query(index, &SearchQuery::geo_distance(field, distance, lat, lon))
            .await
    }

    /// Run `query` against `index` and decode hits lazily as `T`.
    #[instrument(skip(self))]
    pub async fn search_query<T>(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchHits<T>, SearchError>
    where
        T: DeserializeOwned,
    {
        let hits = self.backend.search(index, build_search_body(query)).await?;
        Ok(SearchHits::new(hits))
    }
}

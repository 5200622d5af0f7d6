//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchBackend`
//! using the OpenSearch Rust client over a signed transport.

use async_trait::async_trait;
use opensearch::{
    http::{response::Response, transport::Transport},
    indices::{IndicesCreateParts, IndicesExistsParts},
    DeleteParts, GetParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::errors::SearchError;
use crate::interfaces::SearchBackend;

const INDEX_ALREADY_EXISTS: &str = "resource_already_exists_exception";

/// OpenSearch client bound to a (usually signed) transport.
///
/// The engine client carries no per-call state, so one instance is shared by
/// every operation of a handle.
///
/// # Example
///
/// ```ignore
/// let transport = SignedTransportBuilder::new(url, credentials).build().await?;
/// let backend = OpenSearchClient::new(transport);
/// let handle = ClientHandle::new(Arc::new(backend));
/// ```
#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a client that sends every request through `transport`.
    pub fn new(transport: Transport) -> Self {
        Self {
            client: OpenSearch::new(transport),
        }
    }

    /// Read a JSON response body.
    async fn json_body(response: Response) -> Result<Value, SearchError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    /// Whether a failed create was rejected because the index already exists.
    fn is_already_exists(error_body: &str) -> bool {
        match serde_json::from_str::<Value>(error_body) {
            Ok(body) => body["error"]["type"] == INDEX_ALREADY_EXISTS,
            Err(_) => error_body.contains(INDEX_ALREADY_EXISTS),
        }
    }

    /// Pull the `_source` of every hit out of a search response.
    fn parse_hits(mut body: Value) -> Result<Vec<Value>, SearchError> {
        let hits = body
            .pointer_mut("/hits/hits")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| SearchError::parse("search response has no hits array"))?;

        Ok(hits
            .iter_mut()
            .map(|hit| hit.get_mut("_source").map(Value::take).unwrap_or(Value::Null))
            .collect())
    }
}

#[async_trait]
impl SearchBackend for OpenSearchClient {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::exists_check(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => {
                error!(status = status, index = %index, "Index exists check failed");
                Err(SearchError::exists_check(format!(
                    "Exists check for '{}' failed with status {}",
                    index, status
                )))
            }
        }
    }

    #[instrument(skip(self))]
    async fn create_index(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if Self::is_already_exists(&error_body) {
                return Err(SearchError::IndexAlreadyExists(index.to_string()));
            }
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SearchError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        let body = Self::json_body(response).await?;
        Ok(body["acknowledged"].as_bool().unwrap_or(false))
    }

    #[instrument(skip(self, document))]
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<String, SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        let body = Self::json_body(response).await?;
        let assigned = body["_id"]
            .as_str()
            .ok_or_else(|| SearchError::parse("index response has no _id"))?
            .to_string();

        debug!(doc_id = %assigned, "Document indexed");
        Ok(assigned)
    }

    #[instrument(skip(self))]
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::not_found(index, id));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %id, "Document deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_source(&self, index: &str, id: &str) -> Result<Value, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::get(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::not_found(index, id));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Get request failed");
            return Err(SearchError::get(format!(
                "Get failed with status {}: {}",
                status, error_body
            )));
        }

        let mut body = Self::json_body(response).await?;
        if body["found"] == false {
            return Err(SearchError::not_found(index, id));
        }

        body.get_mut("_source")
            .map(Value::take)
            .ok_or_else(|| SearchError::parse("get response has no _source"))
    }

    #[instrument(skip(self, body))]
    async fn search(&self, index: &str, body: Value) -> Result<Vec<Value>, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::IndexNotFound(index.to_string()));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let hits = Self::parse_hits(Self::json_body(response).await?)?;
        debug!(index = %index, hits = hits.len(), "Search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opensearch::test_server::{serve, CannedResponse};
    use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
    use serde_json::json;
    use url::Url;

    fn client_for(url: Url) -> OpenSearchClient {
        let transport = TransportBuilder::new(SingleNodeConnectionPool::new(url))
            .disable_proxy()
            .build()
            .unwrap();
        OpenSearchClient::new(transport)
    }

    #[tokio::test]
    async fn test_index_exists_maps_status() {
        let (url, server) = serve(vec![
            CannedResponse::empty(200),
            CannedResponse::empty(404),
        ])
        .await;
        let client = client_for(url);

        assert!(client.index_exists("events").await.unwrap());
        assert!(!client.index_exists("events").await.unwrap());
        assert_eq!(
            server.await.unwrap(),
            vec!["HEAD /events HTTP/1.1", "HEAD /events HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn test_create_index_acknowledged() {
        let (url, server) = serve(vec![CannedResponse::json(
            200,
            json!({ "acknowledged": true, "shards_acknowledged": true, "index": "events" }),
        )])
        .await;

        assert!(client_for(url).create_index("events").await.unwrap());
        assert_eq!(server.await.unwrap(), vec!["PUT /events HTTP/1.1"]);
    }

    #[tokio::test]
    async fn test_create_index_not_acknowledged() {
        let (url, _server) = serve(vec![CannedResponse::json(
            200,
            json!({ "acknowledged": false, "shards_acknowledged": false, "index": "events" }),
        )])
        .await;

        assert!(!client_for(url).create_index("events").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_index_already_exists() {
        let (url, _server) = serve(vec![CannedResponse::json(
            400,
            json!({
                "error": {
                    "type": "resource_already_exists_exception",
                    "reason": "index [events/abc] already exists"
                },
                "status": 400
            }),
        )])
        .await;

        let result = client_for(url).create_index("events").await;
        assert!(matches!(result, Err(SearchError::IndexAlreadyExists(ref index)) if index == "events"));
    }

    #[tokio::test]
    async fn test_create_index_non_json_failure_keeps_status_and_body() {
        let (url, _server) = serve(vec![CannedResponse::html(403, "<html>denied</html>")]).await;

        let result = client_for(url).create_index("events").await;
        match result {
            Err(SearchError::IndexCreationError(msg)) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("<html>denied</html>"));
            }
            other => panic!("expected IndexCreationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_index_document_returns_engine_id() {
        let (url, server) = serve(vec![CannedResponse::json(
            201,
            json!({ "_index": "events", "_id": "e1", "_version": 1, "result": "created" }),
        )])
        .await;

        let assigned = client_for(url)
            .index_document("events", "e1", json!({ "name": "kickoff" }))
            .await
            .unwrap();

        assert_eq!(assigned, "e1");
        assert_eq!(server.await.unwrap(), vec!["PUT /events/_doc/e1 HTTP/1.1"]);
    }

    #[tokio::test]
    async fn test_index_document_failure() {
        let (url, _server) = serve(vec![CannedResponse::json(
            400,
            json!({ "error": { "type": "mapper_parsing_exception" }, "status": 400 }),
        )])
        .await;

        let result = client_for(url)
            .index_document("events", "e1", json!({ "name": "kickoff" }))
            .await;
        assert!(matches!(result, Err(SearchError::IndexError(_))));
    }

    #[tokio::test]
    async fn test_get_source_found() {
        let (url, server) = serve(vec![CannedResponse::json(
            200,
            json!({ "_index": "events", "_id": "e1", "found": true, "_source": { "name": "kickoff" } }),
        )])
        .await;

        let source = client_for(url).get_source("events", "e1").await.unwrap();

        assert_eq!(source, json!({ "name": "kickoff" }));
        assert_eq!(server.await.unwrap(), vec!["GET /events/_doc/e1 HTTP/1.1"]);
    }

    #[tokio::test]
    async fn test_get_source_missing_document() {
        let (url, _server) = serve(vec![CannedResponse::json(
            404,
            json!({ "_index": "events", "_id": "x", "found": false }),
        )])
        .await;

        let result = client_for(url).get_source("events", "x").await;
        assert!(matches!(
            result,
            Err(SearchError::NotFound { ref index, ref id }) if index == "events" && id == "x"
        ));
    }

    #[tokio::test]
    async fn test_get_source_found_false_with_success_status() {
        let (url, _server) = serve(vec![CannedResponse::json(
            200,
            json!({ "_index": "events", "_id": "x", "found": false }),
        )])
        .await;

        let result = client_for(url).get_source("events", "x").await;
        assert!(matches!(result, Err(SearchError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (url, server) = serve(vec![
            CannedResponse::json(
                200,
                json!({ "_index": "events", "_id": "e1", "result": "deleted" }),
            ),
            CannedResponse::json(404, json!({ "_index": "events", "_id": "e1", "found": false })),
        ])
        .await;
        let client = client_for(url);

        client.delete_document("events", "e1").await.unwrap();
        let result = client.get_source("events", "e1").await;

        assert!(matches!(result, Err(SearchError::NotFound { .. })));
        assert_eq!(
            server.await.unwrap(),
            vec![
                "DELETE /events/_doc/e1 HTTP/1.1",
                "GET /events/_doc/e1 HTTP/1.1"
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_document() {
        let (url, _server) = serve(vec![CannedResponse::json(
            404,
            json!({ "_index": "events", "_id": "x", "result": "not_found" }),
        )])
        .await;

        let result = client_for(url).delete_document("events", "x").await;
        assert!(matches!(result, Err(SearchError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_returns_sources() {
        let (url, server) = serve(vec![CannedResponse::json(
            200,
            json!({
                "took": 2,
                "hits": {
                    "total": { "value": 1, "relation": "eq" },
                    "hits": [ { "_id": "e1", "_score": 1.0, "_source": { "name": "kickoff" } } ]
                }
            }),
        )])
        .await;

        let hits = client_for(url)
            .search("events", json!({ "query": { "match_all": {} } }))
            .await
            .unwrap();

        assert_eq!(hits, vec![json!({ "name": "kickoff" })]);
        assert_eq!(server.await.unwrap(), vec!["POST /events/_search HTTP/1.1"]);
    }

    #[tokio::test]
    async fn test_search_missing_index() {
        let (url, _server) = serve(vec![CannedResponse::json(
            404,
            json!({ "error": { "type": "index_not_found_exception" }, "status": 404 }),
        )])
        .await;

        let result = client_for(url)
            .search("events", json!({ "query": { "match_all": {} } }))
            .await;
        assert!(matches!(result, Err(SearchError::IndexNotFound(ref index)) if index == "events"));
    }

    #[test]
    fn test_is_already_exists() {
        assert!(OpenSearchClient::is_already_exists(
            r#"{"error":{"type":"resource_already_exists_exception"}}"#
        ));
        assert!(OpenSearchClient::is_already_exists(
            "resource_already_exists_exception: index exists"
        ));
        assert!(!OpenSearchClient::is_already_exists(
            r#"{"error":{"type":"index_not_found_exception"}}"#
        ));
        assert!(!OpenSearchClient::is_already_exists("<html>denied</html>"));
    }

    #[test]
    fn test_parse_hits() {
        let body = json!({
            "took": 3,
            "hits": {
                "total": { "value": 2, "relation": "eq" },
                "hits": [
                    { "_id": "e1", "_score": 1.5, "_source": { "name": "kickoff" } },
                    { "_id": "e2", "_score": 0.5, "_source": { "name": "kickback" } }
                ]
            }
        });

        let hits = OpenSearchClient::parse_hits(body).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], json!({ "name": "kickoff" }));
        assert_eq!(hits[1], json!({ "name": "kickback" }));
    }

    #[test]
    fn test_parse_hits_empty() {
        let body = json!({ "hits": { "total": { "value": 0 }, "hits": [] } });

        let hits = OpenSearchClient::parse_hits(body).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_parse_hits_without_source() {
        let body = json!({ "hits": { "hits": [ { "_id": "e1" } ] } });

        let hits = OpenSearchClient::parse_hits(body).unwrap();
        assert_eq!(hits, vec![Value::Null]);
    }

    #[test]
    fn test_parse_hits_invalid() {
        let body = json!({ "error": "boom" });

        let result = OpenSearchClient::parse_hits(body);
        assert!(matches!(result, Err(SearchError::ParseError(_))));
    }
}

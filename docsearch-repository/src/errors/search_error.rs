//! Search error types.
//!
//! This module defines the error types that can occur during document
//! operations against an already constructed client handle.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The index existence check could not be completed.
    #[error("Index exists check error: {0}")]
    IndexExistsCheckError(String),

    /// Failed to create the index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The engine answered the create call but did not acknowledge it.
    #[error("Create index not acknowledged: {0}")]
    CreateIndexNotAcknowledged(String),

    /// The engine reported the index as already created.
    #[error("Index already exists: {0}")]
    IndexAlreadyExists(String),

    /// Failed to serialize a document.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Failed to write a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to fetch a document.
    #[error("Get error: {0}")]
    GetError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// No document is stored under the identifier.
    #[error("Document not found: index={index}, id={id}")]
    NotFound { index: String, id: String },

    /// The index does not exist.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// A stored document could not be decoded into the requested type.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create an index exists check error.
    pub fn exists_check(msg: impl Into<String>) -> Self {
        Self::IndexExistsCheckError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a get error.
    pub fn get(msg: impl Into<String>) -> Self {
        Self::GetError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a not found error for a document.
    pub fn not_found(index: &str, id: &str) -> Self {
        Self::NotFound {
            index: index.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this error means the document or its index is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::IndexNotFound(_))
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::DeserializationError(err.to_string())
    }
}

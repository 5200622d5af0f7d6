//! Interface definitions for the search backend.
//!
//! This module defines the abstract `SearchBackend` trait that the document
//! access layer is written against, allowing the signed OpenSearch client to
//! be swapped for other implementations.

mod search_backend;

pub use search_backend::SearchBackend;

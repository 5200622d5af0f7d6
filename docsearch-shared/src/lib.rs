//! # Docsearch Shared
//!
//! Query types shared between the document access layer and its callers.

mod query;

pub use query::{GeoPoint, SearchQuery, SEARCH_WINDOW_FROM, SEARCH_WINDOW_SIZE};

//! Result types for document operations.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::SearchError;

/// Lazily decoded results of one search request.
///
/// Owns the raw hit sources of a single response and decodes each into `T`
/// only when it is pulled. The sequence holds at most one result window and
/// can be consumed once; a hit that does not decode into `T` yields an error
/// for that item without affecting the others.
pub struct SearchHits<T> {
    hits: std::vec::IntoIter<Value>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SearchHits<T> {
    pub(crate) fn new(hits: Vec<Value>) -> Self {
        Self {
            hits: hits.into_iter(),
            _marker: PhantomData,
        }
    }

    /// Whether there are no hits left to decode.
    pub fn is_empty(&self) -> bool {
        self.hits.len() == 0
    }
}

impl<T: DeserializeOwned> Iterator for SearchHits<T> {
    type Item = Result<T, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.hits
            .next()
            .map(|hit| serde_json::from_value(hit).map_err(SearchError::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hits.size_hint()
    }
}

impl<T: DeserializeOwned> ExactSizeIterator for SearchHits<T> {}

impl<T> fmt::Debug for SearchHits<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchHits")
            .field("remaining", &self.hits.len())
            .finish()
    }
}

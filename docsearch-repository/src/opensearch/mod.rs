//! OpenSearch implementation of the search backend.
//!
//! This module provides the SigV4-signed transport used for managed,
//! IAM-protected deployments and a `SearchBackend` implementation on top of
//! the OpenSearch Rust client.

mod client;
mod queries;
mod signed_transport;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::OpenSearchClient;
pub use queries::build_search_body;
pub use signed_transport::{check_probe_status, normalize_url, SignedTransportBuilder};

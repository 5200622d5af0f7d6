//! # Docsearch Repository
//!
//! Client-side access to a managed search engine that requires SigV4-signed
//! requests. It provides the credential sources and the signed transport, a
//! factory that turns an implementation selector into a client handle, and
//! the typed document operations on that handle.
//!
//! ```ignore
//! let client = docsearch_repository::get_client("managed-signed", url).await?;
//! let id = client.safe_index("e1", &event, "events").await?;
//! let event: Event = client.get_by_id(&id, "events").await?;
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod factory;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use client::ClientHandle;
pub use config::ClientConfig;
pub use credentials::CredentialSource;
pub use errors::{ClientError, SearchError};
pub use factory::{get_client, ClientFactory, Implementation};
pub use interfaces::SearchBackend;
pub use opensearch::OpenSearchClient;
pub use types::SearchHits;

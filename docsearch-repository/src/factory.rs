//! Client factory.
//!
//! Maps an implementation selector to a fully initialized `ClientHandle`.
//! Each selector owns its credential and transport construction; the document
//! access layer is the same for all of them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::client::ClientHandle;
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::opensearch::{normalize_url, OpenSearchClient, SignedTransportBuilder};

/// Known client implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implementation {
    /// Managed deployment behind IAM: SigV4-signed requests, no sniffing,
    /// no background health checks.
    ManagedSigned,
}

impl Implementation {
    /// The selector string for this implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManagedSigned => "managed-signed",
        }
    }
}

impl FromStr for Implementation {
    type Err = ClientError;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        match selector {
            "managed-signed" => Ok(Self::ManagedSigned),
            other => Err(ClientError::unknown_implementation(other)),
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds client handles from a selector and a deployment URL.
#[derive(Debug, Clone, Default)]
pub struct ClientFactory {
    config: ClientConfig,
}

impl ClientFactory {
    /// Create a factory with the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// The configuration handles are built with.

    /// Build a handle for `url` using the implementation named by `implementation`.
    ///
    /// An unknown selector fails before any credentials are resolved or any
    /// request is sent.
    ///
    /// # Returns
    ///
    /// * `Ok(ClientHandle)` - A handle whose transport passed the signing probe
    /// * `Err(ClientError)` - If the selector, URL, credentials or probe fail
    #[instrument(skip(self))]
    pub async fn get_client(
        &self,
        implementation: &str,
        url: &str,
    ) -> Result<ClientHandle, ClientError> {
        match implementation.parse::<Implementation>()? {
            Implementation::ManagedSigned => self.managed_signed(url).await,
        }
    }

    async fn managed_signed(&self, url: &str) -> Result<ClientHandle, ClientError> {
        let url = normalize_url(url)?;
        let credentials = self.config.credentials.resolve(&self.config.region).await?;

        let transport = SignedTransportBuilder::new(url.clone(), credentials)
            .region(self.config.region.as_str())
            .service_name(self.config.service_name.as_str())
            .build()
            .await?;

        info!(
            url = %url,
            implementation = %Implementation::ManagedSigned,
            "Created signed OpenSearch client"
        );

        Ok(ClientHandle::new(Arc::new(OpenSearchClient::new(transport))))
    }
}

/// Build a handle with the default configuration.
///
/// Shorthand for `ClientFactory::default().get_client(implementation, url)`.
pub async fn get_client(implementation: &str, url: &str) -> Result<ClientHandle, ClientError> {
    ClientFactory::default().get_client(implementation, url).await
}

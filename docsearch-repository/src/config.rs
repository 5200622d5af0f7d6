//! Configuration types for the client factory.

use crate::credentials::CredentialSource;

/// Region the managed deployment lives in unless configured otherwise.
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// Service name used when signing requests for the managed search service.
pub const DEFAULT_SERVICE_NAME: &str = "es";

/// Configuration for building signed client handles.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Region used in request signatures.
    pub region: String,
    /// Service name used in request signatures.
    pub service_name: String,
    /// Where signing credentials are resolved from.
    pub credentials: CredentialSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            credentials: CredentialSource::default(),
        }
    }
}

impl ClientConfig {
    /// Use a different signing region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Use a different signing service name.
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Use a different credential source.
    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }
}

//! Signing credential sources.
//!
//! Credentials are resolved eagerly when a client is built, so a missing or
//! broken credential chain fails construction instead of the first request.

use std::fmt;

use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_types::region::Region;
use tracing::debug;

use crate::errors::ClientError;

const STATIC_PROVIDER_NAME: &str = "docsearch-static";

/// Where request signing credentials come from.
#[derive(Clone, Default)]
pub enum CredentialSource {
    /// The default AWS provider chain (environment, profile, web identity,
    /// container and instance metadata).
    #[default]
    Environment,

    /// An explicit key pair with an optional session token.
    Static {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },

    /// Instance metadata (IMDS) role credentials only.
    InstanceRole,

    /// A caller-supplied provider.
    Provider(SharedCredentialsProvider),
}

impl CredentialSource {
    /// Create a static credential source.
    pub fn static_keys(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self::Static {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    /// Build the provider for this source and resolve credentials once.
    ///
    /// # Returns
    ///
    /// * `Ok(SharedCredentialsProvider)` - A provider that has produced credentials
    /// * `Err(ClientError::CredentialError)` - If no credentials could be resolved
    pub async fn resolve(&self, region: &str) -> Result<SharedCredentialsProvider, ClientError> {
        let provider = match self {
            Self::Environment => {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region.to_string()))
                    .load()
                    .await;
                sdk_config
                    .credentials_provider()
                    .ok_or_else(|| {
                        ClientError::credential("no credentials provider found in the environment")
                    })?
            }
            Self::Static {
                access_key_id,
                secret_access_key,
                session_token,
            } => SharedCredentialsProvider::new(Credentials::new(
                access_key_id.clone(),
                secret_access_key.clone(),
                session_token.clone(),
                None,
                STATIC_PROVIDER_NAME,
            )),
            Self::InstanceRole => {
                SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build())
            }
            Self::Provider(provider) => provider.clone(),
        };

        provider
            .provide_credentials()
            .await
            .map_err(|e| ClientError::credential(format!("{} credentials: {}", self.kind(), e)))?;

        debug!(source = self.kind(), "Resolved signing credentials");
        Ok(provider)
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Static { .. } => "static",
            Self::InstanceRole => "instance-role",
            Self::Provider(_) => "provider",
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"** redacted **")
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}

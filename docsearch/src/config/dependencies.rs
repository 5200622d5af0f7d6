//! Dependency initialization and wiring for docsearch.

use std::env;
use tracing::info;

use crate::AppError;
use docsearch_repository::config::DEFAULT_REGION;
use docsearch_repository::{ClientConfig, ClientFactory, ClientHandle, Implementation};

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Deployment URL.
    pub url: String,
    /// Implementation selector passed to the client factory.
    pub implementation: String,
    /// Signing region.
    pub region: String,
    /// Log output format (`json` or plain text).
    pub log_format: Option<String>,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DOCSEARCH_URL`: deployment URL (required)
    /// - `DOCSEARCH_IMPLEMENTATION`: implementation selector (default: managed-signed)
    /// - `DOCSEARCH_REGION`: signing region (falls back to `AWS_REGION`, then ap-southeast-2)
    /// - `LOG_FORMAT`: `json` for JSON log lines
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DOCSEARCH_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::config("DOCSEARCH_URL is not set"))?;
        let implementation = lookup("DOCSEARCH_IMPLEMENTATION")
            .unwrap_or_else(|| Implementation::ManagedSigned.as_str().to_string());
        let region = lookup("DOCSEARCH_REGION")
            .or_else(|| lookup("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            url,
            implementation,
            region,
            log_format: lookup("LOG_FORMAT"),
        })
    }

    /// Client configuration for these settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default().with_region(self.region.clone())
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Handle for document operations, already verified against the deployment.
    pub client: ClientHandle,
}

impl Dependencies {
    /// Build the client handle described by `settings`.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the handle could not be built
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        info!(
            url = %settings.url,
            implementation = %settings.implementation,
            region = %settings.region,
            "Initializing dependencies"
        );

        let client = ClientFactory::new(settings.client_config())
            .get_client(&settings.implementation, &settings.url)
            .await?;

        info!("Search deployment connection verified");

        Ok(Self { client })
    }
}

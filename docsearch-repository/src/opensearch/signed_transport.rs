//! SigV4-signed transport construction.
//!
//! A misconfigured signer does not fail at the transport layer; the endpoint
//! simply answers 403. The builder therefore probes the endpoint once through
//! the new transport and refuses to hand it out unless the probe returns 200.

use aws_credential_types::provider::SharedCredentialsProvider;
use aws_types::region::Region;
use opensearch::{
    auth::Credentials,
    http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder},
    OpenSearch,
};
use tracing::{debug, error, info};
use url::Url;

use crate::config::{DEFAULT_REGION, DEFAULT_SERVICE_NAME};
use crate::errors::ClientError;

/// Builds a transport that signs every request for one region and service.
///
/// # Example
///
/// ```ignore
/// let url = normalize_url("search-events.ap-southeast-2.es.amazonaws.com")?;
/// let credentials = CredentialSource::Environment.resolve("ap-southeast-2").await?;
/// let transport = SignedTransportBuilder::new(url, credentials)
///     .region("ap-southeast-2")
///     .build()
///     .await?;
/// ```
pub struct SignedTransportBuilder {
    url: Url,
    credentials: SharedCredentialsProvider,
    region: String,
    service_name: String,
}

impl SignedTransportBuilder {
    /// Create a builder for `url` signing with `credentials`.
    pub fn new(url: Url, credentials: SharedCredentialsProvider) -> Self {
        Self {
            url,
            credentials,
            region: DEFAULT_REGION.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }

    /// Set the signing region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the signing service name.
    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Build the transport and verify signing with a single probe request.
    ///
    /// # Returns
    ///
    /// * `Ok(Transport)` - A transport whose signed probe returned 200
    /// * `Err(ClientError::ConnectionError)` - If the transport could not be built
    /// * `Err(ClientError::SigningVerificationFailed)` - If the probe failed
    pub async fn build(self) -> Result<Transport, ClientError> {
        let transport = self.build_unverified()?;

        verify_signing(&transport).await?;

        info!(
            url = %self.url,
            region = %self.region,
            service = %self.service_name,
            "Signed transport verified"
        );

        Ok(transport)
    }

    fn build_unverified(&self) -> Result<Transport, ClientError> {
        let conn_pool = SingleNodeConnectionPool::new(self.url.clone());

        TransportBuilder::new(conn_pool)
            .auth(Credentials::AwsSigV4(
                self.credentials.clone(),
                Region::new(self.region.clone()),
            ))
            .service_name(&self.service_name)
            .disable_proxy()
            .build()
            .map_err(|e| ClientError::connection(e.to_string()))
    }
}

/// Issue one signed `GET /` and require a 200 response.
async fn verify_signing(transport: &Transport) -> Result<(), ClientError> {
    let response = OpenSearch::new(transport.clone())
        .info()
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, "Signing probe request failed");
            ClientError::signing_verification(None, e.to_string())
        })?;

    let status = response.status_code().as_u16();
    if let Err(err) = check_probe_status(status) {
        let body = response.text().await.unwrap_or_default();
        error!(status = status, body = %body, "Signing probe rejected");
        return Err(err);
    }

    debug!("Signing probe succeeded");
    Ok(())
}

/// Accept exactly HTTP 200 from the signing probe.
pub fn check_probe_status(status: u16) -> Result<(), ClientError> {
    if status == 200 {
        Ok(())
    } else {
        Err(ClientError::signing_verification(
            Some(status),
            format!("probe returned status {}", status),
        ))
    }
}

/// Parse a deployment URL, enforcing the `https` scheme.
///
/// A bare host is treated as an HTTPS host and an `http` URL is upgraded.
/// Other schemes are rejected.
pub fn normalize_url(url: &str) -> Result<Url, ClientError> {
    let candidate = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    let mut parsed = Url::parse(&candidate)
        .map_err(|e| ClientError::connection(format!("Invalid URL '{}': {}", url, e)))?;

    let scheme = parsed.scheme().to_string();
    match scheme.as_str() {
        "https" => {}
        "http" => parsed
            .set_scheme("https")
            .map_err(|_| ClientError::connection(format!("Cannot use https for '{}'", url)))?,
        other => {
            return Err(ClientError::connection(format!(
                "Unsupported scheme '{}' in '{}'",
                other, url
            )))
        }
    }

    Ok(parsed)
}

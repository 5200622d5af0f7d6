//! Client construction error types.
//!
//! Every variant here prevents a `ClientHandle` from being returned.

use thiserror::Error;

/// Errors that can occur while building a client handle.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Signing credentials could not be resolved.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// The probe request through the signed transport did not return 200.
    #[error("Signing verification failed: {reason}")]
    SigningVerificationFailed {
        /// HTTP status of the probe response, if one was received.
        status: Option<u16>,
        reason: String,
    },

    /// The implementation selector is not recognized.
    #[error("Unknown implementation: {0}")]
    UnknownImplementation(String),

    /// The target URL is invalid or the transport could not be built.
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ClientError {
    /// Create a credential error.
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::CredentialError(msg.into())
    }

    /// Create a signing verification error.
    pub fn signing_verification(status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::SigningVerificationFailed {
            status,
            reason: reason.into(),
        }
    }

    /// Create an unknown implementation error.
    pub fn unknown_implementation(selector: impl Into<String>) -> Self {
        Self::UnknownImplementation(selector.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }
}

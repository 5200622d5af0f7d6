//! # Docsearch
//!
//! Entry point helpers for the docsearch connectivity check: configuration
//! from the environment, logging setup and handle construction.

pub mod config;

pub use config::{init_tracing, Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur while starting up.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Client construction error.
    #[error("Failed to build search client")]
    ClientError(#[from] docsearch_repository::ClientError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

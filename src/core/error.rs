//! Error types for registry operations.

use thiserror::Error;

/// Errors produced by the callback registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The interrupt check fired while waiting for due callbacks.
    #[error("wait interrupted")]
    Interrupted,
    /// Registry configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

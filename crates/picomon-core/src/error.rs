//! Error types for phase-data reduction
//!
//! Provides a unified error type for all picomon crates.

use thiserror::Error;

/// Core error type for picomon operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Fewer samples than a statistic requires
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The data source query failed or returned nothing
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The persistence target is not writable
    #[error("Persistence denied: {0}")]
    PersistenceDenied(String),

    /// Chart back end failure
    #[error("Render error: {0}")]
    Render(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a series shorter than `expected`
    pub fn insufficient(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }

    /// Create an error for a non-positive tau
    pub fn invalid_tau(tau: f64) -> Self {
        Self::InvalidParameter(format!("Tau {tau} must be positive and finite"))
    }

    /// Whether this error only means a statistic could not be computed
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

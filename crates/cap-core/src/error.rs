//! Error types for catalog loading.
//!
//! The selector itself never fails; only reading a custom catalog does.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for a catalog.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An outcome has an empty code.
    #[error("outcome '{0}' has an empty code")]
    EmptyCode(String),

    /// Two outcomes share the same code.
    #[error("duplicate outcome code: {0}")]
    DuplicateCode(String),
}

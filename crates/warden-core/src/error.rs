//! Error types for Warden Core.

use thiserror::Error;

/// Errors raised by identifier validation and canonical encoding.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

//! Error types for the permission registry.

use thiserror::Error;

/// Errors that can occur while configuring the registry.
///
/// Both kinds are configuration bugs: callers are expected to halt startup
/// rather than continue with an incomplete registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A registration call received an empty or malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The call is not allowed in the registry's current phase.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] warden_core::CoreError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

//! Error types for startup.

use thiserror::Error;
use warden_perms::RegistryError;

/// Errors that halt startup.
#[derive(Debug, Error)]
pub enum WardenError {
    /// Registry error outside any module (sealing, publishing).
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A feature module failed to register its permissions.
    #[error("module {module} failed to register permissions: {source}")]
    Module {
        module: String,
        #[source]
        source: RegistryError,
    },

    /// Two modules share a name.
    #[error("duplicate module: {0}")]
    DuplicateModule(String),

    /// A manifest could not be read.
    #[error("manifest {path}: {source}")]
    ManifestIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed manifest or configuration document.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for startup operations.
pub type Result<T> = std::result::Result<T, WardenError>;

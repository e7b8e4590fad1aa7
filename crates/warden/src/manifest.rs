//! Declarative permission manifests.
//!
//! A manifest lists registrations for deployment-specific entity types in
//! JSON, so they can be added without writing a feature module:
//!
//! ```json
//! {
//!   "entities": [
//!     { "entity_type": "Document", "permissions": ["document_view"] },
//!     {
//!       "entity_type": "DocumentPage",
//!       "permissions": ["page_view"],
//!       "inherits_from": "Document"
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use warden_core::{Blake3Hash, EntityType, Permission};
use warden_perms::{PermissionRegistry, Result as RegistryResult};

use crate::error::{Result, WardenError};
use crate::module::AppModule;

/// One entity type declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub entity_type: EntityType,
    pub permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits_from: Option<EntityType>,
}

/// A parsed manifest. Runs as a feature module named `manifest:<source>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionManifest {
    pub entities: Vec<ManifestEntry>,

    #[serde(skip)]
    name: String,
}

impl PermissionManifest {
    /// Parse a manifest from a JSON string.
    ///
    /// The manifest is named after a digest of `json`, so distinct inline
    /// manifests can run in the same startup. Passing the same document
    /// twice still yields a duplicate module.
    pub fn from_json(json: &str) -> Result<Self> {
        let digest = Blake3Hash::hash(json.as_bytes());
        Self::parse(json, &format!("inline-{digest}"))
    }

    /// Parse a manifest from a JSON string under an explicit source name.
    pub fn from_json_named(json: &str, source: &str) -> Result<Self> {
        Self::parse(json, source)
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WardenError::ManifestIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&json, &path.display().to_string())
    }

    fn parse(json: &str, source: &str) -> Result<Self> {
        let mut manifest: Self = serde_json::from_str(json)?;
        manifest.name = format!("manifest:{source}");
        debug!(
            manifest = %manifest.name,
            entities = manifest.entities.len(),
            "parsed permission manifest"
        );
        Ok(manifest)
    }
}

impl AppModule for PermissionManifest {
    fn name(&self) -> &str {
        &self.name
    }

    /// Registers every entry in document order, then the inheritance links,
    /// so a link may name a parent declared later in the same manifest.
    fn register_permissions(&self, registry: &mut PermissionRegistry) -> RegistryResult<()> {
        for entry in &self.entities {
            registry.register(&entry.entity_type, &entry.permissions)?;
        }
        for entry in &self.entities {
            if let Some(parent) = &entry.inherits_from {
                registry.register_inheritance(&entry.entity_type, parent)?;
            }
        }
        Ok(())
    }
}

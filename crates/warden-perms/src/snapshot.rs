//! Serializable registry snapshots and content fingerprints.
//!
//! A snapshot is what administrative tooling sees of a registry. Its
//! fingerprint lets operators compare the registries of two processes
//! without shipping the full contents.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};
use warden_core::{canonical_value_bytes, Blake3Hash, EntityType, Permission};

use crate::error::Result;
use crate::registry::Phase;

/// Digest identifying the contents of a registry.
pub type RegistryFingerprint = Blake3Hash;

/// Domain separator for registry fingerprints.
pub const FINGERPRINT_DOMAIN: &[u8] = b"warden-registry-v1:";

/// Field keys of the canonical encoding.
mod keys {
    pub const VERSION: u64 = 0;
    pub const ENTRIES: u64 = 1;
    pub const INHERITANCE: u64 = 2;
}

const ENCODING_VERSION: u64 = 1;

/// Contents of a registry at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Phase of the registry when the snapshot was taken.
    pub phase: Phase,

    /// One entry per registered entity type.
    pub entries: Vec<EntrySnapshot>,

    /// Inheritance links.
    #[serde(default)]
    pub inheritance: Vec<InheritanceLink>,
}

/// Permissions of a single entity type, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub entity_type: EntityType,
    pub permissions: Vec<Permission>,
}

/// `child` honors the permissions registered for `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritanceLink {
    pub child: EntityType,
    pub parent: EntityType,
}

impl RegistrySnapshot {
    /// Canonical CBOR bytes of the snapshot contents.
    ///
    /// Entries and links are sorted by entity type, so the encoding does not
    /// depend on the order they were registered in. Permission order within
    /// an entry is significant. The phase is not part of the encoding.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        let mut entries: Vec<&EntrySnapshot> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.entity_type.cmp(&b.entity_type));

        let mut links: Vec<&InheritanceLink> = self.inheritance.iter().collect();
        links.sort_by(|a, b| a.child.cmp(&b.child));

        let entries_value = Value::Array(
            entries
                .into_iter()
                .map(|entry| {
                    Value::Array(vec![
                        Value::Text(entry.entity_type.as_str().to_owned()),
                        Value::Array(
                            entry
                                .permissions
                                .iter()
                                .map(|p| Value::Text(p.as_str().to_owned()))
                                .collect(),
                        ),
                    ])
                })
                .collect(),
        );

        let links_value = Value::Array(
            links
                .into_iter()
                .map(|link| {
                    Value::Array(vec![
                        Value::Text(link.child.as_str().to_owned()),
                        Value::Text(link.parent.as_str().to_owned()),
                    ])
                })
                .collect(),
        );

        let value = Value::Map(vec![
            (
                Value::Integer(keys::VERSION.into()),
                Value::Integer(ENCODING_VERSION.into()),
            ),
            (Value::Integer(keys::ENTRIES.into()), entries_value),
            (Value::Integer(keys::INHERITANCE.into()), links_value),
        ]);

        Ok(canonical_value_bytes(&value)?)
    }

    /// Blake3 digest of the canonical bytes, domain separated.
    pub fn fingerprint(&self) -> Result<RegistryFingerprint> {
        let bytes = self.canonical_bytes()?;
        Ok(Blake3Hash::hash_with_domain(FINGERPRINT_DOMAIN, &bytes))
    }
}

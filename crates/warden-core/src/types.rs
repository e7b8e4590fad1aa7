//! Strong type definitions for Warden identifiers.
//!
//! Entity types and permissions are both plain strings on the wire, but they
//! are newtypes here so one can never be passed where the other is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{CoreError, Result};

/// Identifier for a class of managed objects, such as `"User"` or `"Group"`.
///
/// Implements `Borrow<str>`, so registry lookups accept a plain `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Create an entity type identifier. Validity is checked at registration.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier may be registered.
    pub fn is_valid(&self) -> bool {
        is_valid_identifier(&self.0)
    }

    /// Return an error if this identifier is empty or blank.
    pub fn validate(&self) -> Result<()> {
        validate_identifier("entity type", &self.0)
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityType({:?})", self.0)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&EntityType> for EntityType {
    fn from(entity: &EntityType) -> Self {
        entity.clone()
    }
}

impl AsRef<str> for EntityType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier naming an allowed operation, such as `"user_edit"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Create a permission identifier. Validity is checked at registration.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier may be registered.
    pub fn is_valid(&self) -> bool {
        is_valid_identifier(&self.0)
    }

    /// Return an error if this identifier is empty or blank.
    pub fn validate(&self) -> Result<()> {
        validate_identifier("permission", &self.0)
    }
}

impl fmt::Debug for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permission({:?})", self.0)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Permission {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Permission> for Permission {
    fn from(permission: &Permission) -> Self {
        permission.clone()
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

fn is_valid_identifier(s: &str) -> bool {
    !s.trim().is_empty()
}

fn validate_identifier(kind: &'static str, s: &str) -> Result<()> {
    if is_valid_identifier(s) {
        Ok(())
    } else {
        Err(CoreError::InvalidIdentifier {
            kind,
            value: s.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_blank_identifiers_are_invalid() {
        assert!(!EntityType::new("").is_valid());
        assert!(!EntityType::new("   ").is_valid());
        assert!(!Permission::new("\t\n").is_valid());

        assert!(EntityType::new("Group").is_valid());
        assert!(Permission::new("group_view").is_valid());
    }

    #[test]
    fn test_validate_reports_kind() {
        let err = Permission::new("").validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidIdentifier { kind: "permission", .. }));

        let err = EntityType::new(" ").validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidIdentifier { kind: "entity type", .. }));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(EntityType::from("User"), 1);

        assert_eq!(map.get("User"), Some(&1));
        assert_eq!(map.get("Group"), None);
    }

    #[test]
    fn test_display_and_debug() {
        let entity = EntityType::from("Group");
        assert_eq!(entity.to_string(), "Group");
        assert_eq!(format!("{:?}", entity), "EntityType(\"Group\")");

        let permission = Permission::from("acl_edit");
        assert_eq!(permission.to_string(), "acl_edit");
        assert_eq!(format!("{:?}", permission), "Permission(\"acl_edit\")");
    }

    #[test]
    fn test_serde_transparent() {
        let permission = Permission::from("acl_view");
        let json = serde_json::to_string(&permission).unwrap();
        assert_eq!(json, "\"acl_view\"");

        let entity: EntityType = serde_json::from_str("\"User\"").unwrap();
        assert_eq!(entity.as_str(), "User");
    }
}

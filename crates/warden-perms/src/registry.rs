//! The permission registry.
//!
//! Feature modules register the permissions that govern each entity type
//! while the registry is [`Phase::Open`]. Once startup completes the registry
//! is sealed and published as a [`SharedRegistry`] for concurrent readers.

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use warden_core::{EntityType, Permission};

use crate::error::{RegistryError, Result};
use crate::snapshot::{EntrySnapshot, InheritanceLink, RegistryFingerprint, RegistrySnapshot};

/// Lifecycle phase of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Registrations are accepted.
    Open,
    /// Read-only. There is no way back to `Open`.
    Sealed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Open => f.write_str("open"),
            Phase::Sealed => f.write_str("sealed"),
        }
    }
}

/// The ordered permission set registered for one entity type.
#[derive(Debug, Clone, Default)]
pub struct RegistryEntry {
    /// Permissions in first-seen order.
    permissions: Vec<Permission>,

    /// Membership index over `permissions`.
    index: HashSet<Permission>,
}

impl RegistryEntry {
    /// Insert a permission, returning `false` if it was already present.
    fn insert(&mut self, permission: Permission) -> bool {
        if self.index.contains(&permission) {
            return false;
        }
        self.index.insert(permission.clone());
        self.permissions.push(permission);
        true
    }

    /// Permissions in registration order.
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Whether the permission is part of this entry.
    pub fn contains<Q>(&self, permission: &Q) -> bool
    where
        Permission: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(permission)
    }

    /// Number of permissions in this entry.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the entry holds no permissions. Never true for a registered entity.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// Maps entity types to the permissions that govern operations on them.
///
/// The registry is owned by whoever drives startup and handed to feature
/// modules by `&mut`. There is no global instance.
#[derive(Debug)]
pub struct PermissionRegistry {
    /// Registered entries, keyed by entity type.
    entries: BTreeMap<EntityType, RegistryEntry>,

    /// Inheritance links: child -> parent.
    parents: BTreeMap<EntityType, EntityType>,

    phase: Phase,
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionRegistry {
    /// Create an empty, open registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            parents: BTreeMap::new(),
            phase: Phase::Open,
        }
    }

    /// Rebuild a registry from a snapshot.
    ///
    /// The result is sealed if the snapshot was taken from a sealed registry.
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Result<Self> {
        let mut registry = Self::new();
        for entry in &snapshot.entries {
            registry.register(&entry.entity_type, &entry.permissions)?;
        }
        for link in &snapshot.inheritance {
            registry.register_inheritance(&link.child, &link.parent)?;
        }
        if snapshot.phase == Phase::Sealed {
            registry.seal()?;
        }
        Ok(registry)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Add `permissions` to the entry for `entity_type`, creating it if absent.
    ///
    /// Permissions already present are skipped, so repeating a call is a
    /// no-op. Returns the number of permissions that were newly added.
    ///
    /// All arguments are validated before anything is mutated: a failed call
    /// leaves the registry unchanged.
    pub fn register<I, P>(
        &mut self,
        entity_type: impl Into<EntityType>,
        permissions: I,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let entity_type = entity_type.into();
        self.ensure_open("register permissions")?;
        entity_type.validate().map_err(invalid_argument)?;

        let permissions: Vec<Permission> = permissions.into_iter().map(Into::into).collect();
        if permissions.is_empty() {
            return Err(RegistryError::InvalidArgument(format!(
                "no permissions given for entity type {entity_type}"
            )));
        }
        for permission in &permissions {
            permission.validate().map_err(invalid_argument)?;
        }

        let entry = self.entries.entry(entity_type.clone()).or_default();
        let mut added = 0;
        for permission in permissions {
            if entry.insert(permission) {
                added += 1;
            }
        }

        debug!(
            entity = %entity_type,
            added,
            total = entry.len(),
            "registered permissions"
        );
        Ok(added)
    }

    /// Declare that objects of `child` also honor the permissions of `parent`.
    ///
    /// A child has at most one parent and links may not form a cycle.
    /// Declaring an existing link again is a no-op.
    pub fn register_inheritance(
        &mut self,
        child: impl Into<EntityType>,
        parent: impl Into<EntityType>,
    ) -> Result<()> {
        let child = child.into();
        let parent = parent.into();
        self.ensure_open("register inheritance")?;
        child.validate().map_err(invalid_argument)?;
        parent.validate().map_err(invalid_argument)?;

        if child == parent {
            return Err(RegistryError::InvalidArgument(format!(
                "entity type {child} cannot inherit from itself"
            )));
        }

        if let Some(existing) = self.parents.get(&child) {
            if *existing == parent {
                return Ok(());
            }
            return Err(RegistryError::InvalidArgument(format!(
                "entity type {child} already inherits from {existing}"
            )));
        }

        let mut cursor = Some(&parent);
        while let Some(ancestor) = cursor {
            if *ancestor == child {
                return Err(RegistryError::InvalidArgument(format!(
                    "inheritance {child} -> {parent} would form a cycle"
                )));
            }
            cursor = self.parents.get(ancestor);
        }

        debug!(child = %child, parent = %parent, "registered permission inheritance");
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Transition from `Open` to `Sealed`. Fails if already sealed.
    pub fn seal(&mut self) -> Result<()> {
        self.ensure_open("seal")?;
        let fingerprint = self.fingerprint()?;
        self.phase = Phase::Sealed;

        info!(
            entities = self.entries.len(),
            links = self.parents.len(),
            fingerprint = %fingerprint,
            "permission registry sealed"
        );
        Ok(())
    }

    /// Publish a sealed registry for concurrent readers.
    pub fn into_shared(self) -> Result<SharedRegistry> {
        if self.phase != Phase::Sealed {
            return Err(RegistryError::InvalidState(
                "registry must be sealed before it is shared".into(),
            ));
        }
        Ok(SharedRegistry(Arc::new(self)))
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.phase == Phase::Sealed {
            warn!(operation, "rejected call on sealed permission registry");
            return Err(RegistryError::InvalidState(format!(
                "cannot {operation}: registry is sealed"
            )));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the registry has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.phase == Phase::Sealed
    }

    /// Permissions registered for `entity_type`, in registration order.
    ///
    /// An entity type that was never registered has no restricted
    /// operations, so this returns an empty slice rather than an error.
    pub fn permissions_for<Q>(&self, entity_type: &Q) -> &[Permission]
    where
        EntityType: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries
            .get(entity_type)
            .map(RegistryEntry::permissions)
            .unwrap_or(&[])
    }

    /// The entry for `entity_type`, if registered.
    pub fn entry<Q>(&self, entity_type: &Q) -> Option<&RegistryEntry>
    where
        EntityType: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(entity_type)
    }

    /// All entity types with at least one registered permission.
    pub fn registered_entity_types(&self) -> BTreeSet<EntityType> {
        self.entity_types().cloned().collect()
    }

    /// Iterate over registered entity types in sorted order.
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.entries.keys()
    }

    /// Whether `permission` is registered for `entity_type`.
    pub fn contains(&self, entity_type: &str, permission: &str) -> bool {
        self.entry(entity_type)
            .is_some_and(|entry| entry.contains(permission))
    }

    /// Entity types for which `permission` is registered.
    pub fn entity_types_with<Q>(&self, permission: &Q) -> BTreeSet<EntityType>
    where
        Permission: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.contains(permission))
            .map(|(entity_type, _)| entity_type.clone())
            .collect()
    }

    /// The entity type `child` inherits permissions from, if any.
    pub fn parent_of<Q>(&self, child: &Q) -> Option<&EntityType>
    where
        EntityType: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.parents.get(child)
    }

    /// Own permissions followed by inherited ones, nearest ancestor first.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn effective_permissions_for<Q>(&self, entity_type: &Q) -> Vec<Permission>
    where
        EntityType: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut chain = vec![self.permissions_for(entity_type)];
        let mut cursor = self.parents.get(entity_type);
        while let Some(parent) = cursor {
            chain.push(self.permissions_for::<EntityType>(parent));
            cursor = self.parents.get::<EntityType>(parent);
        }

        let mut seen = HashSet::new();
        chain
            .into_iter()
            .flatten()
            .filter(|permission| seen.insert(*permission))
            .cloned()
            .collect()
    }

    /// Number of registered entity types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy the registry contents into a serializable snapshot.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            phase: self.phase,
            entries: self
                .entries
                .iter()
                .map(|(entity_type, entry)| EntrySnapshot {
                    entity_type: entity_type.clone(),
                    permissions: entry.permissions.clone(),
                })
                .collect(),
            inheritance: self
                .parents
                .iter()
                .map(|(child, parent)| InheritanceLink {
                    child: child.clone(),
                    parent: parent.clone(),
                })
                .collect(),
        }
    }

    /// Content fingerprint of the registry. See [`RegistrySnapshot::fingerprint`].
    pub fn fingerprint(&self) -> Result<RegistryFingerprint> {
        self.snapshot().fingerprint()
    }
}

fn invalid_argument(err: warden_core::CoreError) -> RegistryError {
    RegistryError::InvalidArgument(err.to_string())
}

/// A sealed registry shared between readers.
///
/// Only obtainable from [`PermissionRegistry::into_shared`], so every holder
/// sees a registry that can no longer change.
#[derive(Debug, Clone)]
pub struct SharedRegistry(Arc<PermissionRegistry>);

impl Deref for SharedRegistry {
    type Target = PermissionRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP_PERMISSIONS: [&str; 5] = [
        "acl_edit",
        "acl_view",
        "group_delete",
        "group_edit",
        "group_view",
    ];
    const USER_PERMISSIONS: [&str; 5] = [
        "acl_edit",
        "acl_view",
        "user_delete",
        "user_edit",
        "user_view",
    ];

    fn names(permissions: &[Permission]) -> Vec<&str> {
        permissions.iter().map(Permission::as_str).collect()
    }

    #[test]
    fn test_group_and_user_scenario() {
        let mut registry = PermissionRegistry::new();
        registry.register("Group", GROUP_PERMISSIONS).unwrap();
        registry.register("User", USER_PERMISSIONS).unwrap();

        assert_eq!(names(registry.permissions_for("Group")), GROUP_PERMISSIONS);
        assert_eq!(names(registry.permissions_for("User")), USER_PERMISSIONS);

        let types = registry.registered_entity_types();
        let expected: BTreeSet<EntityType> =
            ["Group", "User"].into_iter().map(EntityType::from).collect();
        assert_eq!(types, expected);

        assert!(registry.permissions_for("Role").is_empty());
    }

    #[test]
    fn test_union_preserves_first_seen_order() {
        let mut registry = PermissionRegistry::new();
        assert_eq!(registry.register("Doc", ["a", "b"]).unwrap(), 2);
        assert_eq!(registry.register("Doc", ["b", "c"]).unwrap(), 1);

        assert_eq!(names(registry.permissions_for("Doc")), ["a", "b", "c"]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = PermissionRegistry::new();
        registry.register("Doc", ["view", "edit"]).unwrap();
        let before = registry.snapshot();

        assert_eq!(registry.register("Doc", ["view", "edit"]).unwrap(), 0);
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_duplicates_within_one_call_are_merged() {
        let mut registry = PermissionRegistry::new();
        assert_eq!(registry.register("Doc", ["view", "view", "edit"]).unwrap(), 2);
        assert_eq!(names(registry.permissions_for("Doc")), ["view", "edit"]);
    }

    #[test]
    fn test_entity_types_are_isolated() {
        let mut registry = PermissionRegistry::new();
        registry.register("Group", ["group_view"]).unwrap();
        registry.register("User", ["user_view"]).unwrap();

        assert_eq!(names(registry.permissions_for("Group")), ["group_view"]);
        assert_eq!(names(registry.permissions_for("User")), ["user_view"]);
    }

    #[test]
    fn test_empty_entity_type_rejected() {
        let mut registry = PermissionRegistry::new();
        let err = registry.register("", ["view"]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        let err = registry.register("  ", ["view"]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_permission_set_rejected() {
        let mut registry = PermissionRegistry::new();
        let err = registry.register("Doc", Vec::<Permission>::new()).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
        assert!(registry.registered_entity_types().is_empty());
    }

    #[test]
    fn test_failed_call_leaves_registry_unchanged() {
        let mut registry = PermissionRegistry::new();
        registry.register("Doc", ["view"]).unwrap();

        let err = registry.register("Doc", ["edit", ""]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
        assert_eq!(names(registry.permissions_for("Doc")), ["view"]);
    }

    #[test]
    fn test_register_after_seal_fails() {
        let mut registry = PermissionRegistry::new();
        registry.register("Doc", ["view"]).unwrap();
        registry.seal().unwrap();
        let before = registry.snapshot();

        let err = registry.register("Doc", ["edit"]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidState(_)));

        let err = registry.register("Other", ["view"]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidState(_)));

        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_seal_is_one_time() {
        let mut registry = PermissionRegistry::new();
        assert_eq!(registry.phase(), Phase::Open);

        registry.seal().unwrap();
        assert!(registry.is_sealed());

        let err = registry.seal().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidState(_)));
        assert_eq!(registry.phase(), Phase::Sealed);
    }

    #[test]
    fn test_into_shared_requires_seal() {
        let registry = PermissionRegistry::new();
        let err = registry.into_shared().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidState(_)));

        let mut registry = PermissionRegistry::new();
        registry.register("Doc", ["view"]).unwrap();
        registry.seal().unwrap();
        let shared = registry.into_shared().unwrap();
        let reader = shared.clone();

        assert_eq!(names(reader.permissions_for("Doc")), ["view"]);
        assert!(reader.is_sealed());
    }

    #[test]
    fn test_shared_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PermissionRegistry>();
        assert_send_sync::<SharedRegistry>();
    }

    #[test]
    fn test_contains_and_reverse_lookup() {
        let mut registry = PermissionRegistry::new();
        registry.register("Group", GROUP_PERMISSIONS).unwrap();
        registry.register("User", USER_PERMISSIONS).unwrap();

        assert!(registry.contains("Group", "group_edit"));
        assert!(!registry.contains("Group", "user_edit"));
        assert!(!registry.contains("Role", "acl_edit"));

        let with_acl = registry.entity_types_with("acl_edit");
        assert_eq!(with_acl.len(), 2);

        let with_user_edit = registry.entity_types_with("user_edit");
        assert_eq!(
            with_user_edit.into_iter().collect::<Vec<_>>(),
            vec![EntityType::from("User")]
        );
        assert!(registry.entity_types_with("missing").is_empty());

        let entry = registry.entry("Group").unwrap();
        assert_eq!(entry.entity_type(), &EntityType::from("Group"));
        assert!(entry.contains("group_edit"));
        assert!(registry.entry("Role").is_none());

        let types: Vec<&str> = registry.entity_types().map(EntityType::as_str).collect();
        assert_eq!(types, ["Group", "User"]);
    }

    #[test]
    fn test_inheritance_effective_permissions() {
        let mut registry = PermissionRegistry::new();
        registry.register("Cabinet", ["cabinet_view", "acl_view"]).unwrap();
        registry.register("Document", ["document_view", "acl_view"]).unwrap();
        registry.register("DocumentPage", ["page_view"]).unwrap();
        registry.register_inheritance("Document", "Cabinet").unwrap();
        registry.register_inheritance("DocumentPage", "Document").unwrap();

        assert_eq!(
            names(&registry.effective_permissions_for("DocumentPage")),
            ["page_view", "document_view", "acl_view", "cabinet_view"]
        );
        assert_eq!(names(registry.permissions_for("DocumentPage")), ["page_view"]);

        // Lookups keyed by an owned entity type walk the same chain.
        let page = EntityType::from("DocumentPage");
        assert_eq!(
            registry.effective_permissions_for(&page),
            registry.effective_permissions_for("DocumentPage")
        );
        assert_eq!(
            names(&registry.effective_permissions_for("Document")),
            ["document_view", "acl_view", "cabinet_view"]
        );
        assert_eq!(
            registry.parent_of("DocumentPage"),
            Some(&EntityType::from("Document"))
        );
        assert_eq!(registry.parent_of("Cabinet"), None);
    }

    #[test]
    fn test_inheritance_from_unregistered_child() {
        let mut registry = PermissionRegistry::new();
        registry.register("Group", ["group_view"]).unwrap();
        registry.register_inheritance("Membership", "Group").unwrap();

        assert_eq!(names(&registry.effective_permissions_for("Membership")), ["group_view"]);
        assert!(!registry.registered_entity_types().contains("Membership"));
    }

    #[test]
    fn test_inheritance_rules() {
        let mut registry = PermissionRegistry::new();
        registry.register_inheritance("B", "A").unwrap();
        registry.register_inheritance("C", "B").unwrap();

        // Repeating a link is a no-op.
        registry.register_inheritance("B", "A").unwrap();

        let err = registry.register_inheritance("A", "A").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        let err = registry.register_inheritance("B", "C").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        let err = registry.register_inheritance("A", "C").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        let err = registry.register_inheritance("", "A").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        registry.seal().unwrap();
        let err = registry.register_inheritance("D", "A").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidState(_)));
    }

    #[test]
    fn test_snapshot_restore_preserves_fingerprint() {
        let mut registry = PermissionRegistry::new();
        registry.register("Group", GROUP_PERMISSIONS).unwrap();
        registry.register("User", USER_PERMISSIONS).unwrap();
        registry.register_inheritance("Membership", "Group").unwrap();
        registry.seal().unwrap();

        let snapshot = registry.snapshot();
        let restored = PermissionRegistry::from_snapshot(&snapshot).unwrap();

        assert!(restored.is_sealed());
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(
            restored.fingerprint().unwrap(),
            registry.fingerprint().unwrap()
        );
    }
}

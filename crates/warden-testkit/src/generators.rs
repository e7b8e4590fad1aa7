//! Proptest generators for property-based testing.

use proptest::prelude::*;

use warden_core::{EntityType, Permission};
use warden_perms::PermissionRegistry;

/// Entity type names drawn from a small pool so scripts revisit entries.
pub const ENTITY_POOL: [&str; 5] = ["Group", "User", "Document", "Cabinet", "Tag"];

/// Generate an entity type from [`ENTITY_POOL`].
pub fn entity_type() -> impl Strategy<Value = EntityType> {
    prop::sample::select(ENTITY_POOL.to_vec()).prop_map(EntityType::from)
}

/// Generate a permission from a small alphabet, so calls overlap often.
pub fn permission() -> impl Strategy<Value = Permission> {
    "[a-f]{1,2}".prop_map(Permission::from)
}

/// Generate a non-empty permission list of at most `max_len` items.
pub fn permission_set(max_len: usize) -> impl Strategy<Value = Vec<Permission>> {
    prop::collection::vec(permission(), 1..=max_len.max(1))
}

/// A single valid `register` call.
#[derive(Debug, Clone)]
pub struct Registration {
    pub entity_type: EntityType,
    pub permissions: Vec<Permission>,
}

impl Arbitrary for Registration {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (entity_type(), permission_set(6))
            .prop_map(|(entity_type, permissions)| Registration {
                entity_type,
                permissions,
            })
            .boxed()
    }
}

/// Generate a sequence of up to `max_len` registrations.
pub fn registration_script(max_len: usize) -> impl Strategy<Value = Vec<Registration>> {
    prop::collection::vec(any::<Registration>(), 0..=max_len)
}

/// Apply a script to a fresh, open registry. Panics if any call fails.
pub fn apply_script(script: &[Registration]) -> PermissionRegistry {
    let mut registry = PermissionRegistry::new();
    for registration in script {
        if let Err(err) = registry.register(&registration.entity_type, &registration.permissions) {
            panic!("generated registration rejected: {err}");
        }
    }
    registry
}

/// First-seen-order union of every permission the script registers for `entity_type`.
pub fn expected_permissions(script: &[Registration], entity_type: &EntityType) -> Vec<Permission> {
    let mut expected: Vec<Permission> = Vec::new();
    for registration in script.iter().filter(|r| &r.entity_type == entity_type) {
        for permission in &registration.permissions {
            if !expected.contains(permission) {
                expected.push(permission.clone());
            }
        }
    }
    expected
}

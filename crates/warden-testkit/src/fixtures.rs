//! Test fixtures and helpers.
//!
//! Common setup code for registry tests.

use warden::{AppModule, UserManagement};
use warden_core::Permission;
use warden_perms::{PermissionRegistry, SharedRegistry};

/// A test fixture wrapping an open registry.
pub struct RegistryFixture {
    pub registry: PermissionRegistry,
}

impl RegistryFixture {
    /// An empty, open registry.
    pub fn new() -> Self {
        Self {
            registry: PermissionRegistry::new(),
        }
    }

    /// An open registry with the built-in `Group` and `User` registrations.
    pub fn user_management() -> Self {
        let mut fixture = Self::new();
        fixture.apply(&UserManagement);
        fixture
    }

    /// Run a module against the fixture registry. Panics on failure.
    pub fn apply(&mut self, module: &dyn AppModule) -> &mut Self {
        if let Err(err) = module.register_permissions(&mut self.registry) {
            panic!("fixture module {} failed: {err}", module.name());
        }
        self
    }

    /// Register permissions. Panics on failure.
    pub fn register(&mut self, entity_type: &str, permissions: &[&str]) -> &mut Self {
        if let Err(err) = self.registry.register(entity_type, permissions.iter().copied()) {
            panic!("fixture registration for {entity_type} failed: {err}");
        }
        self
    }

    /// Permission names registered for `entity_type`, in order.
    pub fn names(&self, entity_type: &str) -> Vec<&str> {
        permission_names(self.registry.permissions_for(entity_type))
    }

    /// Seal and publish the registry. Panics on failure.
    pub fn into_shared(mut self) -> SharedRegistry {
        if let Err(err) = self.registry.seal() {
            panic!("fixture could not be sealed: {err}");
        }
        match self.registry.into_shared() {
            Ok(shared) => shared,
            Err(err) => panic!("fixture could not be shared: {err}"),
        }
    }
}

impl Default for RegistryFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrow the names of a permission slice.
pub fn permission_names(permissions: &[Permission]) -> Vec<&str> {
    permissions.iter().map(Permission::as_str).collect()
}

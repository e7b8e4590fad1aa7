//! Feature modules.
//!
//! A feature module owns a set of entity types and declares which permissions
//! govern them. Modules are run once, in order, against the open registry.

use warden_perms::{PermissionRegistry, Result};

/// A unit of application functionality that registers permissions at startup.
pub trait AppModule {
    /// Unique module name, used in logs and errors.
    fn name(&self) -> &str;

    /// Register this module's permissions and inheritance links.
    fn register_permissions(&self, registry: &mut PermissionRegistry) -> Result<()>;
}

impl<M: AppModule + ?Sized> AppModule for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn register_permissions(&self, registry: &mut PermissionRegistry) -> Result<()> {
        (**self).register_permissions(registry)
    }
}

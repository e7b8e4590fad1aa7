//! Built-in user management module.
//!
//! Registers the `Group` and `User` entity types. Both carry the ACL
//! permissions so access control lists can be edited on individual users
//! and groups.

use warden_perms::{PermissionRegistry, Result};

use crate::module::AppModule;

/// Entity type for user groups.
pub const GROUP: &str = "Group";

/// Entity type for user accounts.
pub const USER: &str = "User";

/// Permission identifiers registered by this module.
pub mod permissions {
    pub const ACL_EDIT: &str = "acl_edit";
    pub const ACL_VIEW: &str = "acl_view";

    pub const GROUP_DELETE: &str = "group_delete";
    pub const GROUP_EDIT: &str = "group_edit";
    pub const GROUP_VIEW: &str = "group_view";

    pub const USER_DELETE: &str = "user_delete";
    pub const USER_EDIT: &str = "user_edit";
    pub const USER_VIEW: &str = "user_view";
}

/// Permissions governing groups, in registration order.
pub const GROUP_PERMISSIONS: [&str; 5] = [
    permissions::ACL_EDIT,
    permissions::ACL_VIEW,
    permissions::GROUP_DELETE,
    permissions::GROUP_EDIT,
    permissions::GROUP_VIEW,
];

/// Permissions governing users, in registration order.
pub const USER_PERMISSIONS: [&str; 5] = [
    permissions::ACL_EDIT,
    permissions::ACL_VIEW,
    permissions::USER_DELETE,
    permissions::USER_EDIT,
    permissions::USER_VIEW,
];

/// The user management feature module.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserManagement;

impl UserManagement {
    /// Module name.
    pub const NAME: &'static str = "user_management";
}

impl AppModule for UserManagement {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register_permissions(&self, registry: &mut PermissionRegistry) -> Result<()> {
        registry.register(GROUP, GROUP_PERMISSIONS)?;
        registry.register(USER, USER_PERMISSIONS)?;
        Ok(())
    }
}

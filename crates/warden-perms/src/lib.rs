//! # Warden Permissions
//!
//! A registry mapping entity types to the permissions that govern them.
//!
//! ## Overview
//!
//! Each feature module registers, during startup, which permissions apply to
//! the entity types it manages. An authorization engine later asks the
//! registry which permissions are checkable for an object, and administrative
//! tooling enumerates the registered entity types.
//!
//! ## Lifecycle
//!
//! 1. **Open**: `register` and `register_inheritance` are accepted
//! 2. **Sealed**: read-only; further registration fails with `InvalidState`
//!
//! A sealed registry is published as a [`SharedRegistry`] and read by any
//! number of threads without locking.
//!
//! ## Usage
//!
//! ```rust
//! use warden_perms::PermissionRegistry;
//!
//! let mut registry = PermissionRegistry::new();
//! registry.register("Group", ["acl_edit", "acl_view", "group_view"]).unwrap();
//! registry.register("Group", ["group_view", "group_edit"]).unwrap();
//! registry.seal().unwrap();
//!
//! let shared = registry.into_shared().unwrap();
//! let names: Vec<&str> = shared
//!     .permissions_for("Group")
//!     .iter()
//!     .map(|p| p.as_str())
//!     .collect();
//! assert_eq!(names, ["acl_edit", "acl_view", "group_view", "group_edit"]);
//! assert!(shared.permissions_for("Role").is_empty());
//! ```

pub mod error;
pub mod registry;
pub mod snapshot;

pub use error::{RegistryError, Result};
pub use registry::{Phase, PermissionRegistry, RegistryEntry, SharedRegistry};
pub use snapshot::{EntrySnapshot, InheritanceLink, RegistryFingerprint, RegistrySnapshot};
pub use warden_core::{EntityType, Permission};

//! # Warden
//!
//! Startup wiring for access-control registration: feature modules declare
//! which permissions govern their entity types, and the resulting registry is
//! sealed and shared with the rest of the process.
//!
//! ## Overview
//!
//! - **Modules**: implement [`AppModule`] to register permissions
//! - **Manifests**: JSON documents registering permissions without code
//! - **Startup**: runs every module once, seals, and publishes a [`SharedRegistry`]
//!
//! There is no global registry. The host owns the [`Startup`], and the
//! [`SharedRegistry`] it returns is passed to whatever needs to read it.
//!
//! ## Usage
//!
//! ```rust
//! use warden::{AppModule, PermissionRegistry, Startup};
//!
//! struct Documents;
//!
//! impl AppModule for Documents {
//!     fn name(&self) -> &str {
//!         "documents"
//!     }
//!
//!     fn register_permissions(
//!         &self,
//!         registry: &mut PermissionRegistry,
//!     ) -> warden::perms::Result<()> {
//!         registry.register("Document", ["acl_edit", "acl_view", "document_view"])?;
//!         Ok(())
//!     }
//! }
//!
//! let registry = Startup::default().with_module(Documents).run().unwrap();
//! assert_eq!(registry.permissions_for("Group").len(), 5);
//! assert_eq!(registry.permissions_for("Document").len(), 3);
//! ```
//!
//! ## Re-exports
//!
//! - `warden::core` - Identifiers and canonical encoding
//! - `warden::perms` - The permission registry

pub mod config;
pub mod error;
pub mod manifest;
pub mod module;
pub mod startup;
pub mod user_management;

// Re-export component crates
pub use warden_core as core;
pub use warden_perms as perms;

pub use config::StartupConfig;
pub use error::{Result, WardenError};
pub use manifest::{ManifestEntry, PermissionManifest};
pub use module::AppModule;
pub use startup::Startup;
pub use user_management::UserManagement;

// Re-export commonly used registry types
pub use warden_perms::{
    EntityType, Permission, PermissionRegistry, Phase, RegistryError, RegistrySnapshot,
    SharedRegistry,
};

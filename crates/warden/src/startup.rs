//! Startup: builds, seals and publishes the permission registry.
//!
//! Startup is the only place a registry is mutated. Every module runs in
//! order against one open registry; the first failure aborts startup, since
//! a missing registration would silently leave operations unprotected.

use std::collections::HashSet;

use tracing::{debug, info};
use warden_perms::{PermissionRegistry, SharedRegistry};

use crate::config::StartupConfig;
use crate::error::{Result, WardenError};
use crate::manifest::PermissionManifest;
use crate::module::AppModule;
use crate::user_management::UserManagement;

/// Drives permission registration for a process.
pub struct Startup {
    config: StartupConfig,
    modules: Vec<Box<dyn AppModule>>,
}

impl Default for Startup {
    fn default() -> Self {
        Self::new(StartupConfig::default())
    }
}

impl Startup {
    /// Create a startup with the given configuration and no extra modules.
    pub fn new(config: StartupConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
        }
    }

    /// Add a feature module. Modules run in the order they are added.
    pub fn with_module<M: AppModule + 'static>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Add a feature module in place.
    pub fn add_module<M: AppModule + 'static>(&mut self, module: M) -> &mut Self {
        self.modules.push(Box::new(module));
        self
    }

    /// The configuration in effect.
    pub fn config(&self) -> &StartupConfig {
        &self.config
    }

    /// Run all modules and return the sealed registry.
    ///
    /// Order: the built-in user management module (if enabled), then added
    /// modules, then configured manifests.
    pub fn build(self) -> Result<PermissionRegistry> {
        let modules = self.resolve_modules()?;

        let mut registry = PermissionRegistry::new();
        for module in &modules {
            let name = module.name();
            debug!(module = name, "registering module permissions");
            module
                .register_permissions(&mut registry)
                .map_err(|source| WardenError::Module {
                    module: name.to_owned(),
                    source,
                })?;
        }

        registry.seal()?;
        info!(
            modules = modules.len(),
            entities = registry.len(),
            "startup complete"
        );
        Ok(registry)
    }

    /// Run all modules, seal, and publish the registry for readers.
    pub fn run(self) -> Result<SharedRegistry> {
        Ok(self.build()?.into_shared()?)
    }

    fn resolve_modules(self) -> Result<Vec<Box<dyn AppModule>>> {
        let mut modules: Vec<Box<dyn AppModule>> = Vec::new();
        if self.config.include_user_management {
            modules.push(Box::new(UserManagement));
        }
        modules.extend(self.modules);
        for path in &self.config.manifests {
            modules.push(Box::new(PermissionManifest::load(path)?));
        }

        {
            let mut seen = HashSet::new();
            for module in &modules {
                if !seen.insert(module.name()) {
                    return Err(WardenError::DuplicateModule(module.name().to_owned()));
                }
            }
        }

        Ok(modules)
    }
}

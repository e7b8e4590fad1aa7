//! Startup configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for [`Startup`](crate::Startup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartupConfig {
    /// Register the built-in user management module before any other module.
    pub include_user_management: bool,

    /// Manifest files applied after all modules, in order.
    pub manifests: Vec<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            include_user_management: true,
            manifests: Vec::new(),
        }
    }
}

impl StartupConfig {
    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a manifest file.
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifests.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StartupConfig::default();
        assert!(config.include_user_management);
        assert!(config.manifests.is_empty());

        assert_eq!(StartupConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_from_json() {
        let config = StartupConfig::from_json(
            r#"{ "include_user_management": false, "manifests": ["a.json", "b.json"] }"#,
        )
        .unwrap();

        assert!(!config.include_user_management);
        assert_eq!(
            config.manifests,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(StartupConfig::from_json(r#"{ "seal": false }"#).is_err());
    }
}

//! Engine configuration
//!
//! Read from `helmshim.yaml`:
//!
//! ```yaml
//! namespace: _shims
//! strict: true
//! templateExtensions: [".yaml", ".tpl"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Engine configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Name of the global object carrying the shims
    pub namespace: String,

    /// Fail on undefined variables
    pub strict: bool,

    /// File extensions rendered when rendering a directory
    pub template_extensions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            strict: true,
            template_extensions: [".yaml", ".yml", ".tpl", ".j2", ".txt"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    /// File looked up by [`EngineConfig::discover`]
    pub const FILE_NAME: &'static str = "helmshim.yaml";

    /// Namespace used by generated templates
    pub const DEFAULT_NAMESPACE: &'static str = "_shims";

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `helmshim.yaml` from `dir` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check that the namespace is usable as a template identifier
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.namespace.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());

        if !valid {
            return Err(EngineError::Config {
                message: format!("invalid shim namespace '{}'", self.namespace),
            });
        }
        Ok(())
    }

    /// Whether a file name has one of the template extensions
    pub fn is_template(&self, file_name: &str) -> bool {
        self.template_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.namespace, "_shims");
        assert!(config.strict);
        assert!(config.is_template("deployment.yaml"));
        assert!(config.is_template("_helpers.tpl"));
        assert!(!config.is_template("README.md"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EngineConfig = serde_yaml::from_str("strict: false\n").unwrap();
        assert!(!config.strict);
        assert_eq!(config.namespace, "_shims");
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            EngineConfig::discover(dir.path()).unwrap(),
            EngineConfig::default()
        );

        std::fs::write(
            dir.path().join(EngineConfig::FILE_NAME),
            "namespace: shims\ntemplateExtensions: [\".tpl\"]\n",
        )
        .unwrap();
        let config = EngineConfig::discover(dir.path()).unwrap();
        assert_eq!(config.namespace, "shims");
        assert!(!config.is_template("a.yaml"));
    }

    #[test]
    fn test_invalid_namespace() {
        let config = EngineConfig {
            namespace: "my-shims".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config { .. })));
    }
}

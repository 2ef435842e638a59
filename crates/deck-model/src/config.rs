//! Engine configuration
//!
//! [`EngineConfig`] controls category creation defaults and the empty
//! category heuristics. Loadable from TOML; every field has a default.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordering engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base display name of new categories
    pub new_category_name: String,
    /// Icon of new categories
    pub new_category_icon: String,
    /// Prefix of generated category ids
    pub custom_id_prefix: String,
    /// Hide empty, untouched custom categories after every mutation
    pub auto_hide_empty: bool,
    /// Drop empty, untouched custom categories when saving
    pub prune_on_save: bool,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With new category name
    #[inline]
    #[must_use]
    pub fn with_new_category_name(mut self, name: impl Into<String>) -> Self {
        self.new_category_name = name.into();
        self
    }

    /// With new category icon
    #[inline]
    #[must_use]
    pub fn with_new_category_icon(mut self, icon: impl Into<String>) -> Self {
        self.new_category_icon = icon.into();
        self
    }

    /// With auto-hide enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_auto_hide(mut self, enabled: bool) -> Self {
        self.auto_hide_empty = enabled;
        self
    }

    /// With save-time pruning enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_prune_on_save(mut self, enabled: bool) -> Self {
        self.prune_on_save = enabled;
        self
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns error on malformed TOML or empty name/prefix values
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for blank names or prefixes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.new_category_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "new_category_name",
                reason: "must not be blank".to_string(),
            });
        }
        if self.custom_id_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "custom_id_prefix",
                reason: "must not be blank".to_string(),
            });
        }
        if self.custom_id_prefix == crate::ids::AVAILABLE {
            return Err(ConfigError::Invalid {
                field: "custom_id_prefix",
                reason: "collides with the available category".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            new_category_name: "New Category".to_string(),
            new_category_icon: "Tag".to_string(),
            custom_id_prefix: "custom-".to_string(),
            auto_hide_empty: true,
            prune_on_save: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = EngineConfig::from_toml_str(
            r#"
            new_category_name = "Group"
            prune_on_save = false
            "#,
        )
        .unwrap();
        assert_eq!(config.new_category_name, "Group");
        assert!(!config.prune_on_save);
        assert!(config.auto_hide_empty);
    }

    #[test]
    fn blank_prefix_is_rejected() {
        let err = EngineConfig::from_toml_str(r#"custom_id_prefix = " ""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "custom_id_prefix", .. }));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "new_category_icon = \"Folder\"").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.new_category_icon, "Folder");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/deck.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

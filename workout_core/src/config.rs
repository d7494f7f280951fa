//! Configuration file support for wod.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/wod/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Limitations active when a session starts
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    #[serde(default)]
    pub limitations: Vec<String>,
}

/// Session lifecycle policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Clear the limitation profile when a document is reset or reloaded
    #[serde(default)]
    pub reset_profile_on_reload: bool,
}

/// Display catalog: known limitations and section titles
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_known_limitations")]
    pub limitations: Vec<String>,

    /// Overrides keyed by section key
    #[serde(default)]
    pub section_titles: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            limitations: default_known_limitations(),
            section_titles: BTreeMap::new(),
        }
    }
}

fn default_known_limitations() -> Vec<String> {
    crate::catalog::KNOWN_LIMITATIONS
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            Some(config_path) => {
                tracing::info!("No config file found at {:?}, using defaults", config_path);
                Ok(Self::default())
            }
            None => {
                tracing::info!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("wod").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        let blank = self
            .profile
            .limitations
            .iter()
            .chain(&self.catalog.limitations)
            .any(|tag| tag.trim().is_empty());
        if blank {
            return Err(Error::Config("limitation tags must not be blank".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.profile.limitations.is_empty());
        assert!(!config.session.reset_profile_on_reload);
        assert_eq!(config.catalog.limitations.len(), 6);
        assert!(config.catalog.section_titles.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profile.limitations = vec!["knee".into()];
        config
            .catalog
            .section_titles
            .insert("fase1".into(), "Heavy day".into());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.profile.limitations, vec!["knee".to_string()]);
        assert_eq!(loaded.catalog.section_titles["fase1"], "Heavy day");
        assert_eq!(loaded.catalog.limitations, config.catalog.limitations);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[session]
reset_profile_on_reload = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.session.reset_profile_on_reload);
        assert_eq!(config.catalog.limitations.len(), 6); // default
    }

    #[test]
    fn test_blank_limitation_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[profile]\nlimitations = [\"knee\", \"  \"]\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[profile\nlimitations = 3").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}

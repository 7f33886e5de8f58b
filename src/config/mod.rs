//! Project configuration for version resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PROPERTY_FILE, VersionPropDef};

/// Project configuration file name, looked up in the project root.
pub const CONFIG_FILE: &str = "version-prop.toml";

/// Project configuration.
///
/// Every field is optional; an absent file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Property file, relative to the project root unless absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_file: Option<PathBuf>,

    /// Literal version name suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Environment variable to read the suffix from (e.g. `BUILD_RUN_NUMBER`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_env: Option<String>,
}

impl Config {
    /// Load the configuration of the project rooted at `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read or parsed.
    pub fn load(project_dir: &Path) -> anyhow::Result<Self> {
        let path = Self::config_path(project_dir);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no project config, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    /// Get the configuration file path for a project.
    #[must_use]
    pub fn config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_FILE)
    }

    /// Apply command-line overrides (they win over file values).
    pub fn merge_overrides(&mut self, property_file: Option<PathBuf>, suffix: Option<String>) {
        if property_file.is_some() {
            self.property_file = property_file;
        }
        if suffix.is_some() {
            self.suffix = suffix;
        }
    }

    /// Property file path for a project.
    #[must_use]
    pub fn property_file_path(&self, project_dir: &Path) -> PathBuf {
        let file = self
            .property_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_PROPERTY_FILE));
        project_dir.join(file)
    }

    /// Effective suffix, reading the process environment for `suffix_env`.
    #[must_use]
    pub fn suffix(&self) -> Option<String> {
        self.suffix_with(|name| std::env::var(name).ok())
    }

    /// Effective suffix: the literal `suffix` first, then the variable named by
    /// `suffix_env` looked up through `lookup`.
    #[must_use]
    pub fn suffix_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.suffix
            .clone()
            .or_else(|| self.suffix_env.as_deref().and_then(lookup))
    }

    /// Build the resolution inputs for a project.
    #[must_use]
    pub fn definition(&self, project_dir: &Path) -> VersionPropDef {
        VersionPropDef::new(project_dir)
            .with_property_file(self.property_file_path(project_dir))
            .with_version_name_suffix(self.suffix())
    }
}

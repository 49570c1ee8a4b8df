//! Configuration loaded from YAML
//!
//! Every field has a default, so an empty file (or no file) yields the
//! stock heuristic:
//!
//! ```yaml
//! placement:
//!   strong_match: 5
//!   threshold: 3
//!   connectives: [however, therefore, because, although, meanwhile]
//! analysis:
//!   max_keywords: 10
//! ```

use crate::analysis::HeuristicSettings;
use crate::placement::PlacementWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Crate configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub placement: PlacementWeights,
    pub analysis: HeuristicSettings,
}

impl Config {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null rather than an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_yaml(&yaml)
    }

    /// `<config dir>/keyweave/config.yaml`, e.g. `~/.config/keyweave/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keyweave").join("config.yaml"))
    }

    /// Load the default config file if it exists, otherwise defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placement.prefix_len == 0 {
            return Err(ConfigError::Invalid(
                "placement.prefix_len must be at least 1".to_string(),
            ));
        }
        if self.analysis.max_keywords == 0 {
            return Err(ConfigError::Invalid(
                "analysis.max_keywords must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

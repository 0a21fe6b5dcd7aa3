//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the scoring
//! model from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{CategoriesConfig, RatingMetadata, ScoringConfig, TiersConfig};

/// Loads and provides access to the scoring configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/csr/
/// ├── rating.yaml       # Rating name and version
/// ├── categories.yaml   # Per-category penalty caps
/// └── tiers.yaml        # Tier thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use csr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/csr").unwrap();
/// println!("Loaded rating: {} ({})", loader.metadata().name, loader.metadata().version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScoringConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The caps or thresholds are inconsistent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RatingMetadata>(&path.join("rating.yaml"))?;
        let categories = Self::load_yaml::<CategoriesConfig>(&path.join("categories.yaml"))?;
        let tiers = Self::load_yaml::<TiersConfig>(&path.join("tiers.yaml"))?;

        let config = ScoringConfig::new(metadata, categories.categories, tiers.tiers)?;

        info!(
            path = %path.display(),
            rating = %config.metadata().name,
            version = %config.metadata().version,
            "Loaded scoring configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Returns the rating metadata.
    pub fn metadata(&self) -> &RatingMetadata {
        self.config.metadata()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(ScoringConfig::default())
    }
}

//! Configuration loading and management for the CSR engine.
//!
//! This module loads the scoring model (category caps and tier thresholds)
//! from YAML files, and falls back to the standard weights when no
//! configuration directory is supplied.
//!
//! # Example
//!
//! ```no_run
//! use csr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/csr").unwrap();
//! println!("Baseline score: {}", config.config().baseline_score());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CategoriesConfig, CategoryCaps, RatingMetadata, ScoringConfig, TierThresholds, TiersConfig,
};

//! Application state for the CSR engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, ScoringConfig};
use crate::registry::ComplianceRegistry;

/// Shared application state.
///
/// The compliance registry owns the scoring configuration, so stateless
/// `POST /score` requests and registry-backed scores always use the same
/// caps and thresholds.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<ComplianceRegistry>,
}

impl AppState {
    /// Creates application state with an empty registry scoring with `config`.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            registry: Arc::new(ComplianceRegistry::new(config.config().clone())),
        }
    }

    /// Returns the scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        self.registry.config()
    }

    /// Returns the compliance registry.
    pub fn registry(&self) -> &ComplianceRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_config_comes_from_loader() {
        let loader = ConfigLoader::default();
        let state = AppState::new(loader.clone());
        assert_eq!(state.config(), loader.config());
        assert_eq!(state.config().metadata().name, "Company Safety Rating");
    }

    #[tokio::test]
    async fn test_clones_share_registry() {
        let state = AppState::new(ConfigLoader::default());
        let clone = state.clone();

        let as_of = chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        state
            .registry()
            .register_company("acme_rope", as_of)
            .await
            .unwrap();

        assert_eq!(clone.registry().len().await, 1);
    }
}

//! In-memory compliance registry.
//!
//! The registry holds the compliance facts for every registered company and
//! recalculates a company's score whenever one of its facts changes. Scores
//! are never stored: every read and every write recomputes from the facts,
//! so a score can never go stale.

mod events;
mod store;

use std::collections::HashMap;
use std::time::Instant;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::calculation::compute_score;
use crate::config::ScoringConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{ComplianceSnapshot, ScoreResult};

pub use events::ComplianceEvent;
use store::CompanyRecord;

/// Shared store of per-company compliance facts.
#[derive(Debug)]
pub struct ComplianceRegistry {
    config: ScoringConfig,
    companies: RwLock<HashMap<String, CompanyRecord>>,
}

impl ComplianceRegistry {
    /// Creates an empty registry that scores with `config`.
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            companies: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Registers a new company with no facts, returning its baseline score.
    pub async fn register_company(
        &self,
        company_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<ScoreResult> {
        if company_id.trim().is_empty() {
            return Err(EngineError::InvalidSnapshot {
                field: "company_id".to_string(),
                message: "must not be blank".to_string(),
            });
        }

        let snapshot = {
            let mut companies = self.companies.write().await;
            if companies.contains_key(company_id) {
                return Err(EngineError::CompanyAlreadyExists {
                    company_id: company_id.to_string(),
                });
            }
            let record = CompanyRecord::default();
            let snapshot = record.snapshot(company_id, as_of);
            companies.insert(company_id.to_string(), record);
            snapshot
        };

        debug!(company_id, "Company registered");
        self.score_snapshot(&snapshot)
    }

    /// Applies an event to a company's facts and returns the recalculated score.
    ///
    /// An event that does not fit the current facts (an unknown project,
    /// a duplicate employee) is rejected with `InvalidEvent` and changes
    /// nothing.
    pub async fn apply(
        &self,
        company_id: &str,
        event: ComplianceEvent,
        as_of: NaiveDate,
    ) -> EngineResult<ScoreResult> {
        let event_name = event.name();
        let snapshot = {
            let mut companies = self.companies.write().await;
            let record = companies
                .get_mut(company_id)
                .ok_or_else(|| EngineError::CompanyNotFound {
                    company_id: company_id.to_string(),
                })?;

            // apply to a copy so a rejected event leaves no partial change
            let mut updated = record.clone();
            updated
                .apply(event)
                .map_err(|message| EngineError::InvalidEvent {
                    company_id: company_id.to_string(),
                    message,
                })?;
            *record = updated;
            record.snapshot(company_id, as_of)
        };

        debug!(company_id, event = event_name, "Compliance event applied");
        self.score_snapshot(&snapshot)
    }

    /// Returns the current facts for a company as a scoring snapshot.
    pub async fn snapshot(
        &self,
        company_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<ComplianceSnapshot> {
        let companies = self.companies.read().await;
        companies
            .get(company_id)
            .map(|record| record.snapshot(company_id, as_of))
            .ok_or_else(|| EngineError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }

    /// Computes a company's current score.
    pub async fn score(&self, company_id: &str, as_of: NaiveDate) -> EngineResult<ScoreResult> {
        let snapshot = self.snapshot(company_id, as_of).await?;
        self.score_snapshot(&snapshot)
    }

    /// Returns the number of registered companies.
    pub async fn len(&self) -> usize {
        self.companies.read().await.len()
    }

    /// Returns true if no companies are registered.
    pub async fn is_empty(&self) -> bool {
        self.companies.read().await.is_empty()
    }

    fn score_snapshot(&self, snapshot: &ComplianceSnapshot) -> EngineResult<ScoreResult> {
        let start = Instant::now();
        let result = compute_score(snapshot, &self.config)?;
        info!(
            company_id = %result.company_id,
            score = %result.score,
            tier = result.tier.as_str(),
            duration_us = start.elapsed().as_micros() as u64,
            "Score recalculated"
        );
        Ok(result)
    }
}

impl Default for ComplianceRegistry {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

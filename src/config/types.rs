//! Configuration types for safety rating calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::ComplianceCategory;

/// Metadata about the rating model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RatingMetadata {
    /// The human-readable name of the rating.
    pub name: String,
    /// The version of the weighting model.
    pub version: String,
}

/// Maximum penalty each category can impose.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryCaps {
    /// Cap for missing or expired core documents.
    pub core_documents: Decimal,
    /// Cap for incomplete project documentation.
    pub project_documentation: Decimal,
    /// Cap for missed harness inspections.
    pub harness_inspections: Decimal,
    /// Cap for unsigned employee acknowledgments.
    pub employee_acknowledgments: Decimal,
}

/// Categories configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Per-category penalty caps.
    pub categories: CategoryCaps,
}

/// Lowest score (inclusive) of each tier above red.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TierThresholds {
    /// Scores at or above this are green.
    pub green: Decimal,
    /// Scores at or above this are yellow.
    pub yellow: Decimal,
    /// Scores at or above this are orange; anything lower is red.
    pub orange: Decimal,
}

/// Tiers configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// Tier thresholds.
    pub tiers: TierThresholds,
}

/// The complete scoring configuration.
///
/// [`ScoringConfig::default`] carries the standard weights: 25 points each
/// for core documents, project documentation and harness inspections, 5 for
/// acknowledgments, and tiers at 90/70/50.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    metadata: RatingMetadata,
    caps: CategoryCaps,
    tiers: TierThresholds,
}

impl ScoringConfig {
    /// Creates a validated ScoringConfig from its component parts.
    ///
    /// Returns `InvalidConfig` if a cap is negative, the caps sum above 100,
    /// or the tier thresholds are not strictly descending within (0, 100].
    pub fn new(
        metadata: RatingMetadata,
        caps: CategoryCaps,
        tiers: TierThresholds,
    ) -> EngineResult<Self> {
        let config = Self {
            metadata,
            caps,
            tiers,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> EngineResult<()> {
        let hundred = Decimal::ONE_HUNDRED;

        for category in ComplianceCategory::ALL {
            if self.cap(category).is_sign_negative() {
                return Err(EngineError::InvalidConfig {
                    message: format!("cap for '{}' must not be negative", category.as_str()),
                });
            }
        }

        let total: Decimal = ComplianceCategory::ALL.iter().map(|c| self.cap(*c)).sum();
        if total > hundred {
            return Err(EngineError::InvalidConfig {
                message: format!("category caps sum to {}, which exceeds 100", total),
            });
        }

        let TierThresholds {
            green,
            yellow,
            orange,
        } = &self.tiers;
        if !(*green <= hundred && green > yellow && yellow > orange && *orange > Decimal::ZERO) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "tier thresholds must satisfy 100 >= green > yellow > orange > 0 (got {}/{}/{})",
                    green, yellow, orange
                ),
            });
        }

        Ok(())
    }

    /// Returns the rating metadata.
    pub fn metadata(&self) -> &RatingMetadata {
        &self.metadata
    }

    /// Returns the category caps.
    pub fn caps(&self) -> &CategoryCaps {
        &self.caps
    }

    /// Returns the tier thresholds.
    pub fn tiers(&self) -> &TierThresholds {
        &self.tiers
    }

    /// Returns the penalty cap for one category.
    pub fn cap(&self, category: ComplianceCategory) -> Decimal {
        match category {
            ComplianceCategory::CoreDocuments => self.caps.core_documents,
            ComplianceCategory::ProjectDocumentation => self.caps.project_documentation,
            ComplianceCategory::HarnessInspections => self.caps.harness_inspections,
            ComplianceCategory::EmployeeAcknowledgments => self.caps.employee_acknowledgments,
        }
    }

    /// Returns the score of a company with no core documents and nothing else
    /// to measure.
    pub fn baseline_score(&self) -> Decimal {
        Decimal::ONE_HUNDRED - self.caps.core_documents
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            metadata: RatingMetadata {
                name: "Company Safety Rating".to_string(),
                version: "2026-01".to_string(),
            },
            caps: CategoryCaps {
                core_documents: Decimal::new(25, 0),
                project_documentation: Decimal::new(25, 0),
                harness_inspections: Decimal::new(25, 0),
                employee_acknowledgments: Decimal::new(5, 0),
            },
            tiers: TierThresholds {
                green: Decimal::new(90, 0),
                yellow: Decimal::new(70, 0),
                orange: Decimal::new(50, 0),
            },
        }
    }
}

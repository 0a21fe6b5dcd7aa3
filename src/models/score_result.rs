//! Score result models for the CSR engine.
//!
//! This module contains the [`ScoreResult`] type and its associated structures
//! that capture everything the calculator produces: the clamped score, its
//! tier, the per-category breakdown, remediation hints and an audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four-way colour classification of a score.
///
/// # Example
///
/// ```
/// use csr_engine::models::ScoreTier;
///
/// assert_eq!(ScoreTier::Green.as_str(), "green");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    /// Below the orange threshold.
    Red,
    /// At or above the orange threshold.
    Orange,
    /// At or above the yellow threshold.
    Yellow,
    /// At or above the green threshold.
    Green,
}

impl ScoreTier {
    /// Returns the lowercase tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Red => "red",
            ScoreTier::Orange => "orange",
            ScoreTier::Yellow => "yellow",
            ScoreTier::Green => "green",
        }
    }
}

/// A scored compliance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCategory {
    /// Company-level core documents.
    CoreDocuments,
    /// Per-project safety records.
    ProjectDocumentation,
    /// Harness inspections before each work session.
    HarnessInspections,
    /// Employee signatures on safety documents.
    EmployeeAcknowledgments,
}

impl ComplianceCategory {
    /// Every category, in scoring order.
    pub const ALL: [ComplianceCategory; 4] = [
        ComplianceCategory::CoreDocuments,
        ComplianceCategory::ProjectDocumentation,
        ComplianceCategory::HarnessInspections,
        ComplianceCategory::EmployeeAcknowledgments,
    ];

    /// Returns the stable snake_case identifier, also used as the audit rule id.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceCategory::CoreDocuments => "core_documents",
            ComplianceCategory::ProjectDocumentation => "project_documentation",
            ComplianceCategory::HarnessInspections => "harness_inspections",
            ComplianceCategory::EmployeeAcknowledgments => "employee_acknowledgments",
        }
    }

    /// Returns the human-readable category name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ComplianceCategory::CoreDocuments => "Core Documents",
            ComplianceCategory::ProjectDocumentation => "Project Documentation",
            ComplianceCategory::HarnessInspections => "Harness Inspections",
            ComplianceCategory::EmployeeAcknowledgments => "Employee Acknowledgments",
        }
    }
}

/// How one category contributed to the score.
///
/// # Example
///
/// ```
/// use csr_engine::models::{CategoryBreakdown, ComplianceCategory};
/// use rust_decimal::Decimal;
///
/// let breakdown = CategoryBreakdown {
///     category: ComplianceCategory::HarnessInspections,
///     cap: Decimal::new(25, 0),
///     penalty: Decimal::new(5, 0),
///     earned: Decimal::new(20, 0),
///     deficient: 2,
///     total: 10,
/// };
/// assert_eq!(breakdown.cap - breakdown.penalty, breakdown.earned);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// The category.
    pub category: ComplianceCategory,
    /// The maximum penalty this category can impose.
    pub cap: Decimal,
    /// The penalty actually imposed (0 ..= cap).
    pub penalty: Decimal,
    /// The points retained (cap - penalty).
    pub earned: Decimal,
    /// Number of deficient items (missing documents, missed sessions, ...).
    pub deficient: u32,
    /// Number of items measured.
    pub total: u32,
}

/// A concrete action that would raise the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationHint {
    /// The category the action improves.
    pub category: ComplianceCategory,
    /// The document, project or employee the action concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
    /// What to do.
    pub message: String,
}

/// A single step in the audit trace recording a scoring decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a score calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of scoring steps.
    pub steps: Vec<AuditStep>,
}

/// The complete result of scoring one snapshot.
///
/// The result is a pure function of the snapshot and scoring configuration:
/// scoring the same snapshot twice yields equal results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// The version of the engine that produced the score.
    pub engine_version: String,
    /// The company that was scored.
    pub company_id: String,
    /// The evaluation date of the snapshot.
    pub as_of: NaiveDate,
    /// The score, 0–100, rounded to two decimal places.
    pub score: Decimal,
    /// The score rounded to a whole percentage for badges.
    pub percentage: u8,
    /// The tier derived from `score`.
    pub tier: ScoreTier,
    /// Per-category contributions, in scoring order.
    pub categories: Vec<CategoryBreakdown>,
    /// Actions that would raise the score.
    pub remediation: Vec<RemediationHint>,
    /// Every rule decision made while scoring.
    pub audit_trace: AuditTrace,
}

impl ScoreResult {
    /// Returns the breakdown for one category.
    pub fn category(&self, category: ComplianceCategory) -> Option<&CategoryBreakdown> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Returns the sum of all category penalties.
    pub fn total_penalty(&self) -> Decimal {
        self.categories.iter().map(|c| c.penalty).sum()
    }
}

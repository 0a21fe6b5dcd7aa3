//! Company Safety Rating calculation.
//!
//! This module ties the category calculations together: it validates the
//! snapshot, scores each category against its cap, subtracts the penalties
//! from 100, clamps, and classifies the result into a tier.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::ScoringConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, ComplianceCategory, ComplianceSnapshot, ScoreResult};

use super::acknowledgments::calculate_acknowledgments;
use super::core_documents::calculate_core_documents;
use super::harness_inspection::calculate_harness_inspections;
use super::penalty::{CategoryResult, round_points};
use super::project_documentation::calculate_project_documentation;
use super::tier::classify_tier;
use super::validation::validate_snapshot;

/// Computes the safety rating for a snapshot.
///
/// This is a pure function: it performs no I/O, and scoring the same
/// snapshot with the same configuration always yields an equal result.
///
/// # Returns
///
/// The [`ScoreResult`], or `InvalidSnapshot` if the snapshot is malformed.
///
/// # Examples
///
/// A brand-new company with nothing uploaded sits at the baseline:
///
/// ```
/// use csr_engine::calculation::compute_score;
/// use csr_engine::config::ScoringConfig;
/// use csr_engine::models::{ComplianceSnapshot, ScoreTier};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = ComplianceSnapshot::new("acme_rope", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// let result = compute_score(&snapshot, &ScoringConfig::default()).unwrap();
///
/// assert_eq!(result.score, Decimal::new(75, 0));
/// assert_eq!(result.tier, ScoreTier::Yellow);
/// ```
pub fn compute_score(
    snapshot: &ComplianceSnapshot,
    config: &ScoringConfig,
) -> EngineResult<ScoreResult> {
    validate_snapshot(snapshot)?;

    let category_results: Vec<CategoryResult> = vec![
        calculate_core_documents(snapshot, config.cap(ComplianceCategory::CoreDocuments), 1),
        calculate_project_documentation(
            snapshot,
            config.cap(ComplianceCategory::ProjectDocumentation),
            2,
        ),
        calculate_harness_inspections(
            &snapshot.inspections,
            config.cap(ComplianceCategory::HarnessInspections),
            3,
        ),
        calculate_acknowledgments(
            &snapshot.acknowledgments,
            config.cap(ComplianceCategory::EmployeeAcknowledgments),
            4,
        ),
    ];

    let mut categories = Vec::with_capacity(category_results.len());
    let mut remediation = Vec::new();
    let mut steps = Vec::with_capacity(category_results.len() + 2);
    for result in category_results {
        categories.push(result.breakdown);
        remediation.extend(result.remediation);
        steps.push(result.audit_step);
    }

    let total_penalty: Decimal = categories.iter().map(|c| c.penalty).sum();
    let raw_score = Decimal::ONE_HUNDRED - total_penalty;
    let score = round_points(raw_score.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED));
    // floor so the badge never shows a percentage belonging to a higher tier
    let percentage = score.floor().to_u8().unwrap_or(0);

    steps.push(AuditStep {
        step_number: 5,
        rule_id: "final_score".to_string(),
        rule_name: "Final Score".to_string(),
        input: serde_json::json!({
            "penalties": categories
                .iter()
                .map(|c| {
                    (
                        c.category.as_str().to_string(),
                        serde_json::Value::from(c.penalty.normalize().to_string()),
                    )
                })
                .collect::<serde_json::Map<_, _>>()
        }),
        output: serde_json::json!({
            "score": score.normalize().to_string(),
            "percentage": percentage
        }),
        reasoning: format!(
            "100 - {} total penalty = {}, clamped to [0, 100] = {}",
            total_penalty.normalize(),
            raw_score.normalize(),
            score.normalize()
        ),
    });

    let tier = classify_tier(score, config.tiers());
    steps.push(AuditStep {
        step_number: 6,
        rule_id: "tier_classification".to_string(),
        rule_name: "Tier Classification".to_string(),
        input: serde_json::json!({
            "score": score.normalize().to_string(),
            "green": config.tiers().green.normalize().to_string(),
            "yellow": config.tiers().yellow.normalize().to_string(),
            "orange": config.tiers().orange.normalize().to_string()
        }),
        output: serde_json::json!({ "tier": tier.as_str() }),
        reasoning: format!("Score {} falls in the {} tier", score.normalize(), tier.as_str()),
    });

    Ok(ScoreResult {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        company_id: snapshot.company_id.clone(),
        as_of: snapshot.as_of,
        score,
        percentage,
        tier,
        categories,
        remediation,
        audit_trace: AuditTrace { steps },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        Acknowledgment, CoreDocumentKind, CoreDocumentStatus, InspectionTally, JobType,
        ProjectDocumentation, ProjectRequirement, ScoreTier,
    };
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn new_company() -> ComplianceSnapshot {
        ComplianceSnapshot::new("acme_rope", as_of())
    }

    fn all_core_documents() -> Vec<CoreDocumentStatus> {
        CoreDocumentKind::ALL
            .into_iter()
            .map(|kind| CoreDocumentStatus {
                kind,
                present: true,
                expires_at: Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
            })
            .collect()
    }

    fn complete_project(id: &str) -> ProjectDocumentation {
        ProjectDocumentation {
            project_id: id.to_string(),
            job_type: JobType::RopeAccess,
            completed: ProjectRequirement::ALL.into_iter().collect(),
        }
    }

    fn ack(employee_id: &str, document_id: &str, signed: bool) -> Acknowledgment {
        Acknowledgment {
            employee_id: employee_id.to_string(),
            document_id: document_id.to_string(),
            signed,
        }
    }

    /// Everything satisfied, with history in every category.
    fn fully_compliant() -> ComplianceSnapshot {
        let mut snapshot = new_company();
        snapshot.core_documents = all_core_documents();
        snapshot.projects = vec![complete_project("tower_a"), complete_project("tower_b")];
        snapshot.inspections = InspectionTally {
            missed: 0,
            total_sessions: 48,
        };
        snapshot.acknowledgments = vec![
            ack("emp_001", "hs_v3", true),
            ack("emp_002", "hs_v3", true),
        ];
        snapshot
    }

    fn score(snapshot: &ComplianceSnapshot) -> ScoreResult {
        compute_score(snapshot, &ScoringConfig::default()).unwrap()
    }

    /// CS-001: new company with nothing uploaded
    #[test]
    fn test_new_company_scores_baseline_yellow() {
        let result = score(&new_company());

        assert_eq!(result.score, dec("75"));
        assert_eq!(result.percentage, 75);
        assert_eq!(result.tier, ScoreTier::Yellow);
        assert_eq!(result.remediation.len(), 3);
    }

    /// CS-002: core documents uploaded, nothing else to measure
    #[test]
    fn test_core_documents_only_scores_100_green() {
        let mut snapshot = new_company();
        snapshot.core_documents = all_core_documents();

        let result = score(&snapshot);

        assert_eq!(result.score, dec("100"));
        assert_eq!(result.tier, ScoreTier::Green);
        assert!(result.remediation.is_empty());
    }

    /// CS-003: every category satisfied
    #[test]
    fn test_fully_compliant_scores_100_green() {
        let result = score(&fully_compliant());

        assert_eq!(result.score, dec("100"));
        assert_eq!(result.percentage, 100);
        assert_eq!(result.tier, ScoreTier::Green);
        assert_eq!(result.total_penalty(), Decimal::ZERO);
    }

    /// CS-004: core documents missing, everything else perfect
    #[test]
    fn test_missing_core_documents_otherwise_perfect_scores_75() {
        let mut snapshot = fully_compliant();
        snapshot.core_documents.clear();

        let result = score(&snapshot);

        assert_eq!(result.score, dec("75"));
        assert_eq!(result.tier, ScoreTier::Yellow);
    }

    /// CS-005: one project missing all four records
    #[test]
    fn test_project_missing_all_records_is_penalized() {
        let mut snapshot = new_company();
        snapshot.core_documents = all_core_documents();
        snapshot.projects = vec![ProjectDocumentation {
            project_id: "tower_a".to_string(),
            job_type: JobType::RopeAccess,
            completed: Default::default(),
        }];

        let result = score(&snapshot);

        let projects = result
            .category(ComplianceCategory::ProjectDocumentation)
            .unwrap();
        assert_eq!(projects.penalty, dec("25"));
        assert!(projects.penalty <= projects.cap);
        assert!(result.score < dec("100"));
        assert_eq!(result.score, dec("75"));
    }

    /// CS-006: every measured category at its cap
    #[test]
    fn test_worst_case_score_is_20_and_red() {
        let mut snapshot = new_company();
        snapshot.projects = vec![ProjectDocumentation {
            project_id: "tower_a".to_string(),
            job_type: JobType::RopeAccess,
            completed: Default::default(),
        }];
        snapshot.inspections = InspectionTally {
            missed: 4,
            total_sessions: 4,
        };
        snapshot.acknowledgments = vec![ack("emp_001", "hs_v3", false)];

        let result = score(&snapshot);

        assert_eq!(result.score, dec("20"));
        assert_eq!(result.tier, ScoreTier::Red);
    }

    /// CS-007: new employee temporarily lowers a perfect score
    #[test]
    fn test_new_employee_depresses_score_until_signed() {
        let mut snapshot = fully_compliant();
        snapshot.acknowledgments.push(ack("emp_new", "hs_v3", false));

        let before = score(&snapshot);
        assert!(before.score < dec("100"));
        assert_eq!(before.score, dec("98.33"));

        snapshot.acknowledgments.last_mut().unwrap().signed = true;
        let after = score(&snapshot);
        assert_eq!(after.score, dec("100"));
    }

    /// CS-008: zero sessions never divides by zero
    #[test]
    fn test_zero_sessions_is_not_penalized() {
        let mut snapshot = fully_compliant();
        snapshot.inspections = InspectionTally::default();

        let result = score(&snapshot);
        assert_eq!(
            result
                .category(ComplianceCategory::HarnessInspections)
                .unwrap()
                .penalty,
            Decimal::ZERO
        );
    }

    /// CS-009: expired insurance drops a perfect company out of green
    #[test]
    fn test_expired_insurance_lowers_score() {
        let mut snapshot = fully_compliant();
        snapshot.core_documents[0].expires_at = Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let result = score(&snapshot);

        assert_eq!(result.score, dec("91.67"));
        assert_eq!(result.percentage, 91);
        assert_eq!(result.tier, ScoreTier::Green);
    }

    #[test]
    fn test_percentage_is_floored() {
        let mut snapshot = fully_compliant();
        // one of three core documents and one of three project records missing
        snapshot.core_documents.pop();
        snapshot.projects = vec![ProjectDocumentation {
            project_id: "lobby_glass".to_string(),
            job_type: JobType::NonRope,
            completed: [ProjectRequirement::RopeAccessPlan, ProjectRequirement::ToolboxMeeting]
                .into_iter()
                .collect(),
        }];

        let result = score(&snapshot);

        // 100 - 8.33 - 8.33 = 83.34
        assert_eq!(result.score, dec("83.34"));
        assert_eq!(result.percentage, 83);
    }

    #[test]
    fn test_invalid_snapshot_is_rejected() {
        let mut snapshot = new_company();
        snapshot.inspections = InspectionTally {
            missed: 5,
            total_sessions: 1,
        };

        let result = compute_score(&snapshot, &ScoringConfig::default());
        assert!(matches!(result, Err(EngineError::InvalidSnapshot { .. })));
    }

    #[test]
    fn test_audit_trace_has_one_step_per_rule() {
        let result = score(&new_company());

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "core_documents",
                "project_documentation",
                "harness_inspections",
                "employee_acknowledgments",
                "final_score",
                "tier_classification"
            ]
        );

        let step_numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_final_score_step_explains_arithmetic() {
        let result = score(&new_company());
        let final_step = &result.audit_trace.steps[4];

        assert_eq!(final_step.output["score"].as_str().unwrap(), "75");
        assert_eq!(
            final_step.input["penalties"]["core_documents"].as_str().unwrap(),
            "25"
        );
        assert!(final_step.reasoning.starts_with("100 - 25 total penalty"));
    }

    #[test]
    fn test_categories_reported_in_scoring_order() {
        let result = score(&fully_compliant());
        let order: Vec<ComplianceCategory> = result.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, ComplianceCategory::ALL.to_vec());
    }

    #[test]
    fn test_result_carries_company_and_date() {
        let result = score(&new_company());
        assert_eq!(result.company_id, "acme_rope");
        assert_eq!(result.as_of, as_of());
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }

    fn arb_snapshot() -> impl Strategy<Value = ComplianceSnapshot> {
        (
            proptest::collection::vec(any::<bool>(), 3),
            proptest::collection::vec(
                (any::<bool>(), proptest::collection::vec(any::<bool>(), 4)),
                0..6,
            ),
            (0u32..200, 0u32..200),
            proptest::collection::vec(any::<bool>(), 0..12),
        )
            .prop_map(|(docs, projects, (a, b), acks)| {
                let mut snapshot = ComplianceSnapshot::new("acme_rope", as_of());
                snapshot.core_documents = CoreDocumentKind::ALL
                    .into_iter()
                    .zip(docs)
                    .map(|(kind, present)| CoreDocumentStatus {
                        kind,
                        present,
                        expires_at: None,
                    })
                    .collect();
                snapshot.projects = projects
                    .into_iter()
                    .enumerate()
                    .map(|(i, (rope, done))| {
                        let job_type = if rope { JobType::RopeAccess } else { JobType::NonRope };
                        ProjectDocumentation {
                            project_id: format!("project_{}", i),
                            job_type,
                            completed: ProjectRequirement::required_for(job_type)
                                .into_iter()
                                .zip(done)
                                .filter(|(_, d)| *d)
                                .map(|(req, _)| req)
                                .collect(),
                        }
                    })
                    .collect();
                snapshot.inspections = InspectionTally {
                    missed: a.min(b),
                    total_sessions: a.max(b),
                };
                snapshot.acknowledgments = acks
                    .into_iter()
                    .enumerate()
                    .map(|(i, signed)| ack(&format!("emp_{}", i), "hs_v3", signed))
                    .collect();
                snapshot
            })
    }

    proptest! {
        #[test]
        fn prop_score_is_clamped_and_tier_consistent(snapshot in arb_snapshot()) {
            let config = ScoringConfig::default();
            let result = compute_score(&snapshot, &config).unwrap();

            prop_assert!(result.score >= Decimal::ZERO);
            prop_assert!(result.score <= Decimal::ONE_HUNDRED);
            prop_assert_eq!(result.tier, classify_tier(result.score, config.tiers()));
            for category in &result.categories {
                prop_assert!(category.penalty >= Decimal::ZERO);
                prop_assert!(category.penalty <= category.cap);
            }
        }

        #[test]
        fn prop_compute_score_is_idempotent(snapshot in arb_snapshot()) {
            let config = ScoringConfig::default();
            let first = compute_score(&snapshot, &config).unwrap();
            let second = compute_score(&snapshot, &config).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_unsigned_acknowledgment_never_raises_score(snapshot in arb_snapshot()) {
            let config = ScoringConfig::default();
            let before = compute_score(&snapshot, &config).unwrap();

            let mut worse = snapshot.clone();
            worse.acknowledgments.push(ack("emp_extra", "hs_v3", false));
            let after = compute_score(&worse, &config).unwrap();

            prop_assert!(after.score <= before.score);
        }

        #[test]
        fn prop_more_sessions_dilute_the_same_misses(missed in 1u32..50, extra in 1u32..500) {
            let config = ScoringConfig::default();
            let mut few = ComplianceSnapshot::new("acme_rope", as_of());
            few.inspections = InspectionTally { missed, total_sessions: missed * 2 };
            let mut many = few.clone();
            many.inspections.total_sessions += extra;

            let few_result = compute_score(&few, &config).unwrap();
            let many_result = compute_score(&many, &config).unwrap();
            let penalty = |r: &ScoreResult| {
                r.category(ComplianceCategory::HarnessInspections).unwrap().penalty
            };

            prop_assert!(penalty(&many_result) <= penalty(&few_result));
        }
    }
}

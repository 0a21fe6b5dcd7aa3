//! Harness inspection penalty calculation.
//!
//! The penalty is proportional to the share of work sessions that started
//! without a completed harness inspection. Because it is a ratio, a long
//! clean history dilutes a single miss, while a company with only a handful
//! of sessions feels one miss heavily.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ComplianceCategory, InspectionTally, RemediationHint};

use super::penalty::{CategoryResult, breakdown, proportional_penalty};

/// Calculates the harness inspection penalty.
///
/// `penalty = min(cap, cap * missed / total_sessions)`, and zero when no
/// sessions have been logged.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::calculate_harness_inspections;
/// use csr_engine::models::InspectionTally;
/// use rust_decimal::Decimal;
///
/// let tally = InspectionTally { missed: 1, total_sessions: 2 };
/// let result = calculate_harness_inspections(&tally, Decimal::new(25, 0), 3);
/// assert_eq!(result.breakdown.penalty, Decimal::new(1250, 2));
/// ```
pub fn calculate_harness_inspections(
    tally: &InspectionTally,
    cap: Decimal,
    step_number: u32,
) -> CategoryResult {
    let penalty = proportional_penalty(cap, tally.missed, tally.total_sessions);

    let remediation = if tally.missed > 0 {
        vec![RemediationHint {
            category: ComplianceCategory::HarnessInspections,
            subject: None,
            message: format!(
                "Complete a harness inspection before every work session; {} of {} sessions started without one",
                tally.missed, tally.total_sessions
            ),
        }]
    } else {
        Vec::new()
    };

    let reasoning = if tally.total_sessions == 0 {
        "No work sessions logged; nothing to measure".to_string()
    } else {
        format!(
            "{} x {}/{} missed sessions = {} point penalty",
            cap.normalize(),
            tally.missed,
            tally.total_sessions,
            penalty.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: ComplianceCategory::HarnessInspections.as_str().to_string(),
        rule_name: "Harness Inspection Penalty".to_string(),
        input: serde_json::json!({
            "missed": tally.missed,
            "total_sessions": tally.total_sessions,
            "cap": cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "penalty": penalty.normalize().to_string()
        }),
        reasoning,
    };

    CategoryResult {
        breakdown: breakdown(
            ComplianceCategory::HarnessInspections,
            cap,
            penalty,
            tally.missed,
            tally.total_sessions,
        ),
        remediation,
        audit_step,
    }
}

//! Employee acknowledgment penalty calculation.
//!
//! Every employee owes a signature on every published safety document
//! version. The penalty is the cap scaled by the share of those signatures
//! still outstanding, so a newly added employee drags the score down until
//! they sign.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Acknowledgment, AuditStep, ComplianceCategory, RemediationHint};

use super::penalty::{CategoryResult, breakdown, proportional_penalty};

/// Calculates the employee acknowledgment penalty.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::calculate_acknowledgments;
/// use csr_engine::models::Acknowledgment;
/// use rust_decimal::Decimal;
///
/// let acks = vec![
///     Acknowledgment { employee_id: "emp_001".into(), document_id: "hs_v3".into(), signed: true },
///     Acknowledgment { employee_id: "emp_002".into(), document_id: "hs_v3".into(), signed: false },
/// ];
/// let result = calculate_acknowledgments(&acks, Decimal::new(5, 0), 4);
/// assert_eq!(result.breakdown.penalty, Decimal::new(250, 2));
/// ```
pub fn calculate_acknowledgments(
    acknowledgments: &[Acknowledgment],
    cap: Decimal,
    step_number: u32,
) -> CategoryResult {
    // employee -> outstanding document ids, ordered for stable output
    let mut outstanding: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for ack in acknowledgments.iter().filter(|a| !a.signed) {
        outstanding
            .entry(ack.employee_id.as_str())
            .or_default()
            .push(ack.document_id.as_str());
    }

    let total = acknowledgments.len() as u32;
    let unsigned: u32 = outstanding.values().map(|docs| docs.len() as u32).sum();
    let penalty = proportional_penalty(cap, unsigned, total);

    let remediation = outstanding
        .iter()
        .map(|(employee_id, documents)| RemediationHint {
            category: ComplianceCategory::EmployeeAcknowledgments,
            subject: Some((*employee_id).to_string()),
            message: format!(
                "Have employee '{}' sign {} outstanding safety document{}: {}",
                employee_id,
                documents.len(),
                if documents.len() == 1 { "" } else { "s" },
                documents.join(", ")
            ),
        })
        .collect();

    let reasoning = if total == 0 {
        "No acknowledgments required".to_string()
    } else {
        format!(
            "{} x {}/{} unsigned acknowledgments = {} point penalty",
            cap.normalize(),
            unsigned,
            total,
            penalty.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: ComplianceCategory::EmployeeAcknowledgments.as_str().to_string(),
        rule_name: "Employee Acknowledgment Penalty".to_string(),
        input: serde_json::json!({
            "required": total,
            "unsigned": unsigned,
            "cap": cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "employees_outstanding": outstanding.keys().collect::<Vec<_>>(),
            "penalty": penalty.normalize().to_string()
        }),
        reasoning,
    };

    CategoryResult {
        breakdown: breakdown(
            ComplianceCategory::EmployeeAcknowledgments,
            cap,
            penalty,
            unsigned,
            total,
        ),
        remediation,
        audit_step,
    }
}

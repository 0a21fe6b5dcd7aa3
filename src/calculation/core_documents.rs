//! Core document penalty calculation.
//!
//! Each of the three core documents (insurance certificate, safety manual,
//! company policy) that is missing or expired costs an equal share of the
//! category cap. With all three missing the category costs the full cap,
//! which is what puts a brand-new company at the baseline score.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AuditStep, ComplianceCategory, ComplianceSnapshot, CoreDocumentKind, RemediationHint,
};

use super::penalty::{CategoryResult, breakdown, proportional_penalty};

/// Why a core document failed to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deficiency {
    Missing,
    Expired(NaiveDate),
}

/// Calculates the core document penalty for a snapshot.
///
/// A document kind that does not appear in the snapshot, or appears with
/// `present: false`, is missing. A present document whose expiry date is
/// before `snapshot.as_of` is expired.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::calculate_core_documents;
/// use csr_engine::models::ComplianceSnapshot;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = ComplianceSnapshot::new("acme_rope", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// let result = calculate_core_documents(&snapshot, Decimal::new(25, 0), 1);
/// assert_eq!(result.breakdown.penalty, Decimal::new(25, 0));
/// assert_eq!(result.remediation.len(), 3);
/// ```
pub fn calculate_core_documents(
    snapshot: &ComplianceSnapshot,
    cap: Decimal,
    step_number: u32,
) -> CategoryResult {
    let as_of = snapshot.as_of;

    let deficiencies: Vec<(CoreDocumentKind, Deficiency)> = CoreDocumentKind::ALL
        .into_iter()
        .filter_map(|kind| match snapshot.core_document(kind) {
            Some(doc) if doc.is_valid_on(as_of) => None,
            Some(doc) if doc.present => doc
                .expires_at
                .map(|expiry| (kind, Deficiency::Expired(expiry))),
            _ => Some((kind, Deficiency::Missing)),
        })
        .collect();

    let total = CoreDocumentKind::ALL.len() as u32;
    let deficient = deficiencies.len() as u32;
    let penalty = proportional_penalty(cap, deficient, total);

    let remediation = deficiencies
        .iter()
        .map(|(kind, deficiency)| RemediationHint {
            category: ComplianceCategory::CoreDocuments,
            subject: Some(kind.as_str().to_string()),
            message: match deficiency {
                Deficiency::Missing => format!("Upload the {}", kind.display_name()),
                Deficiency::Expired(expiry) => format!(
                    "Renew the {}; it expired on {}",
                    kind.display_name(),
                    expiry
                ),
            },
        })
        .collect();

    let missing: Vec<&str> = deficiencies
        .iter()
        .filter(|(_, d)| *d == Deficiency::Missing)
        .map(|(kind, _)| kind.as_str())
        .collect();
    let expired: Vec<&str> = deficiencies
        .iter()
        .filter(|(_, d)| matches!(d, Deficiency::Expired(_)))
        .map(|(kind, _)| kind.as_str())
        .collect();

    let reasoning = if deficient == 0 {
        format!("All {} core documents present and current", total)
    } else {
        format!(
            "{} of {} core documents missing or expired: {} x {}/{} = {} point penalty",
            deficient,
            total,
            cap.normalize(),
            deficient,
            total,
            penalty.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: ComplianceCategory::CoreDocuments.as_str().to_string(),
        rule_name: "Core Document Penalty".to_string(),
        input: serde_json::json!({
            "as_of": as_of.to_string(),
            "documents": snapshot.core_documents.iter().map(|d| serde_json::json!({
                "kind": d.kind.as_str(),
                "present": d.present,
                "expires_at": d.expires_at.map(|e| e.to_string()),
            })).collect::<Vec<_>>(),
            "cap": cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "missing": missing,
            "expired": expired,
            "penalty": penalty.normalize().to_string()
        }),
        reasoning,
    };

    CategoryResult {
        breakdown: breakdown(
            ComplianceCategory::CoreDocuments,
            cap,
            penalty,
            deficient,
            total,
        ),
        remediation,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoreDocumentStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn doc(kind: CoreDocumentKind, present: bool, expires_at: Option<&str>) -> CoreDocumentStatus {
        CoreDocumentStatus {
            kind,
            present,
            expires_at: expires_at.map(make_date),
        }
    }

    fn snapshot_with(docs: Vec<CoreDocumentStatus>) -> ComplianceSnapshot {
        let mut snapshot = ComplianceSnapshot::new("acme_rope", make_date("2026-01-15"));
        snapshot.core_documents = docs;
        snapshot
    }

    fn all_present() -> Vec<CoreDocumentStatus> {
        CoreDocumentKind::ALL
            .into_iter()
            .map(|kind| doc(kind, true, None))
            .collect()
    }

    /// CD-001: no documents uploaded costs the full cap
    #[test]
    fn test_no_documents_costs_full_cap() {
        let result = calculate_core_documents(&snapshot_with(vec![]), dec("25"), 1);

        assert_eq!(result.breakdown.penalty, dec("25"));
        assert_eq!(result.breakdown.earned, Decimal::ZERO);
        assert_eq!(result.breakdown.deficient, 3);
        assert_eq!(result.remediation.len(), 3);
    }

    /// CD-002: all documents present costs nothing
    #[test]
    fn test_all_documents_present_costs_nothing() {
        let result = calculate_core_documents(&snapshot_with(all_present()), dec("25"), 1);

        assert_eq!(result.breakdown.penalty, Decimal::ZERO);
        assert_eq!(result.breakdown.earned, dec("25"));
        assert!(result.remediation.is_empty());
        assert!(result.audit_step.reasoning.contains("All 3 core documents"));
    }

    /// CD-003: one missing document costs a third of the cap
    #[test]
    fn test_one_missing_document_costs_one_third() {
        let mut docs = all_present();
        docs[2].present = false;

        let result = calculate_core_documents(&snapshot_with(docs), dec("25"), 1);

        assert_eq!(result.breakdown.penalty, dec("8.33"));
        assert_eq!(result.remediation.len(), 1);
        assert_eq!(
            result.remediation[0].subject.as_deref(),
            Some("company_policy")
        );
        assert_eq!(result.remediation[0].message, "Upload the Company Policy");
    }

    /// CD-004: expired document counts like a missing one
    #[test]
    fn test_expired_document_is_penalized() {
        let mut docs = all_present();
        docs[0] = doc(
            CoreDocumentKind::CertificateOfInsurance,
            true,
            Some("2026-01-14"),
        );

        let result = calculate_core_documents(&snapshot_with(docs), dec("25"), 1);

        assert_eq!(result.breakdown.penalty, dec("8.33"));
        assert!(result.remediation[0].message.contains("Renew"));
        assert!(result.remediation[0].message.contains("2026-01-14"));
        assert_eq!(
            result.audit_step.output["expired"][0].as_str().unwrap(),
            "certificate_of_insurance"
        );
    }

    /// CD-005: document expiring on the evaluation date still counts
    #[test]
    fn test_document_expiring_on_as_of_is_current() {
        let mut docs = all_present();
        docs[0] = doc(
            CoreDocumentKind::CertificateOfInsurance,
            true,
            Some("2026-01-15"),
        );

        let result = calculate_core_documents(&snapshot_with(docs), dec("25"), 1);
        assert_eq!(result.breakdown.penalty, Decimal::ZERO);
    }

    /// CD-006: absent document with a stale expiry date is reported as missing
    #[test]
    fn test_absent_document_with_expiry_is_missing() {
        let mut docs = all_present();
        docs[1] = doc(
            CoreDocumentKind::HealthSafetyManual,
            false,
            Some("2025-01-01"),
        );

        let result = calculate_core_documents(&snapshot_with(docs), dec("25"), 1);

        assert_eq!(
            result.audit_step.output["missing"][0].as_str().unwrap(),
            "health_safety_manual"
        );
        assert_eq!(
            result.remediation[0].message,
            "Upload the Health & Safety Manual"
        );
    }

    #[test]
    fn test_audit_step_identifies_rule() {
        let result = calculate_core_documents(&snapshot_with(vec![]), dec("25"), 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "core_documents");
        assert_eq!(result.audit_step.output["penalty"].as_str().unwrap(), "25");
        assert!(result.audit_step.reasoning.contains("3 of 3"));
    }
}

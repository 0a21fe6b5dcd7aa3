//! Project documentation penalty calculation.
//!
//! Every project owes a set of safety records (anchor inspection for rope
//! work, rope access plan, toolbox meeting, FLHA). Each project weighs
//! equally: the category penalty is the cap scaled by the average fraction
//! of required records that are missing across all projects.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, ComplianceCategory, ComplianceSnapshot, ProjectRequirement, RemediationHint,
};

use super::penalty::{CategoryResult, breakdown, scaled_penalty};

/// Calculates the project documentation penalty for a snapshot.
///
/// A company with no projects incurs no penalty.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::calculate_project_documentation;
/// use csr_engine::models::{ComplianceSnapshot, JobType, ProjectDocumentation};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut snapshot = ComplianceSnapshot::new("acme_rope", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// snapshot.projects.push(ProjectDocumentation {
///     project_id: "tower_a".to_string(),
///     job_type: JobType::RopeAccess,
///     completed: Default::default(),
/// });
///
/// let result = calculate_project_documentation(&snapshot, Decimal::new(25, 0), 2);
/// assert_eq!(result.breakdown.penalty, Decimal::new(25, 0));
/// ```
pub fn calculate_project_documentation(
    snapshot: &ComplianceSnapshot,
    cap: Decimal,
    step_number: u32,
) -> CategoryResult {
    let mut remediation = Vec::new();
    let mut project_details = Vec::with_capacity(snapshot.projects.len());
    let mut missing_fraction_sum = Decimal::ZERO;
    let mut deficient_projects: u32 = 0;

    for project in &snapshot.projects {
        let required = ProjectRequirement::required_for(project.job_type);
        let missing = project.missing();

        if !missing.is_empty() {
            deficient_projects += 1;
            missing_fraction_sum +=
                Decimal::from(missing.len() as u32) / Decimal::from(required.len() as u32);

            let names: Vec<&str> = missing.iter().map(|req| req.display_name()).collect();
            remediation.push(RemediationHint {
                category: ComplianceCategory::ProjectDocumentation,
                subject: Some(project.project_id.clone()),
                message: format!(
                    "Complete the {} for project '{}'",
                    names.join(", "),
                    project.project_id
                ),
            });
        }

        project_details.push(serde_json::json!({
            "project_id": project.project_id,
            "required": required.len(),
            "missing": missing.iter().map(|req| req.as_str()).collect::<Vec<_>>(),
        }));
    }

    let total_projects = snapshot.projects.len() as u32;
    let penalty = if total_projects == 0 {
        Decimal::ZERO
    } else {
        scaled_penalty(cap, missing_fraction_sum / Decimal::from(total_projects))
    };

    let reasoning = if total_projects == 0 {
        "No projects to measure".to_string()
    } else if deficient_projects == 0 {
        format!("All {} projects have their required records", total_projects)
    } else {
        format!(
            "{} of {} projects missing records (average {}% missing): {} point penalty",
            deficient_projects,
            total_projects,
            (missing_fraction_sum * Decimal::ONE_HUNDRED / Decimal::from(total_projects))
                .round_dp(2)
                .normalize(),
            penalty.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: ComplianceCategory::ProjectDocumentation.as_str().to_string(),
        rule_name: "Project Documentation Penalty".to_string(),
        input: serde_json::json!({
            "projects": project_details,
            "cap": cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "deficient_projects": deficient_projects,
            "penalty": penalty.normalize().to_string()
        }),
        reasoning,
    };

    CategoryResult {
        breakdown: breakdown(
            ComplianceCategory::ProjectDocumentation,
            cap,
            penalty,
            deficient_projects,
            total_projects,
        ),
        remediation,
        audit_step,
    }
}

//! Snapshot validation.
//!
//! Malformed snapshots are rejected before scoring rather than silently
//! producing a number.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::{ComplianceSnapshot, ProjectRequirement};

fn invalid(field: impl Into<String>, message: impl Into<String>) -> EngineError {
    EngineError::InvalidSnapshot {
        field: field.into(),
        message: message.into(),
    }
}

/// Checks a snapshot for structural problems.
///
/// # Returns
///
/// `InvalidSnapshot` naming the first offending field if:
/// - `company_id` is blank
/// - a core document kind is listed more than once
/// - a project id is blank or duplicated
/// - a project lists a completed record its job type does not require
/// - more inspections were missed than sessions were logged
/// - an acknowledgment has a blank employee or document id
/// - an (employee, document) pair is listed more than once
pub fn validate_snapshot(snapshot: &ComplianceSnapshot) -> EngineResult<()> {
    if snapshot.company_id.trim().is_empty() {
        return Err(invalid("company_id", "must not be blank"));
    }

    let mut kinds = HashSet::new();
    for (index, doc) in snapshot.core_documents.iter().enumerate() {
        if !kinds.insert(doc.kind) {
            return Err(invalid(
                format!("core_documents[{}].kind", index),
                format!("duplicate core document '{}'", doc.kind.as_str()),
            ));
        }
    }

    let mut project_ids = HashSet::new();
    for (index, project) in snapshot.projects.iter().enumerate() {
        if project.project_id.trim().is_empty() {
            return Err(invalid(
                format!("projects[{}].project_id", index),
                "must not be blank",
            ));
        }
        if !project_ids.insert(project.project_id.as_str()) {
            return Err(invalid(
                format!("projects[{}].project_id", index),
                format!("duplicate project '{}'", project.project_id),
            ));
        }
        let required = ProjectRequirement::required_for(project.job_type);
        if let Some(extra) = project.completed.iter().find(|req| !required.contains(*req)) {
            return Err(invalid(
                format!("projects[{}].completed", index),
                format!(
                    "{} is not required for project '{}'",
                    extra.as_str(),
                    project.project_id
                ),
            ));
        }
    }

    let tally = &snapshot.inspections;
    if tally.missed > tally.total_sessions {
        return Err(invalid(
            "inspections.missed",
            format!(
                "{} missed inspections exceeds {} total sessions",
                tally.missed, tally.total_sessions
            ),
        ));
    }

    let mut pairs = HashSet::new();
    for (index, ack) in snapshot.acknowledgments.iter().enumerate() {
        if ack.employee_id.trim().is_empty() {
            return Err(invalid(
                format!("acknowledgments[{}].employee_id", index),
                "must not be blank",
            ));
        }
        if ack.document_id.trim().is_empty() {
            return Err(invalid(
                format!("acknowledgments[{}].document_id", index),
                "must not be blank",
            ));
        }
        if !pairs.insert((ack.employee_id.as_str(), ack.document_id.as_str())) {
            return Err(invalid(
                format!("acknowledgments[{}]", index),
                format!(
                    "duplicate acknowledgment of '{}' by '{}'",
                    ack.document_id, ack.employee_id
                ),
            ));
        }
    }

    Ok(())
}

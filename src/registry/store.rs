//! Per-company fact storage.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::{
    Acknowledgment, ComplianceSnapshot, CoreDocumentKind, CoreDocumentStatus, InspectionTally,
    ProjectDocumentation, ProjectRequirement,
};

use super::events::ComplianceEvent;

/// Everything the registry knows about one company.
///
/// Acknowledgments are not stored directly: the required set is every
/// (employee, published document) pair, and `signatures` records which of
/// those have been signed.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompanyRecord {
    core_documents: BTreeMap<CoreDocumentKind, Option<NaiveDate>>,
    projects: Vec<ProjectDocumentation>,
    inspections: InspectionTally,
    employees: BTreeSet<String>,
    safety_documents: BTreeSet<String>,
    signatures: BTreeSet<(String, String)>,
}

fn require_id(value: &str, what: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} must not be blank", what))
    } else {
        Ok(())
    }
}

impl CompanyRecord {
    /// Applies an event, or explains why it does not fit the current facts.
    ///
    /// A rejected event leaves the record unchanged.
    pub(crate) fn apply(&mut self, event: ComplianceEvent) -> Result<(), String> {
        match event {
            ComplianceEvent::CoreDocumentUploaded { kind, expires_at } => {
                self.core_documents.insert(kind, expires_at);
            }
            ComplianceEvent::CoreDocumentRemoved { kind } => {
                if self.core_documents.remove(&kind).is_none() {
                    return Err(format!("{} is not on file", kind.display_name()));
                }
            }
            ComplianceEvent::ProjectAdded {
                project_id,
                job_type,
            } => {
                require_id(&project_id, "project_id")?;
                if self.projects.iter().any(|p| p.project_id == project_id) {
                    return Err(format!("project '{}' already exists", project_id));
                }
                self.projects.push(ProjectDocumentation {
                    project_id,
                    job_type,
                    completed: BTreeSet::new(),
                });
            }
            ComplianceEvent::ProjectRecordCompleted {
                project_id,
                requirement,
            } => {
                let project = self
                    .projects
                    .iter_mut()
                    .find(|p| p.project_id == project_id)
                    .ok_or_else(|| format!("unknown project '{}'", project_id))?;
                if !ProjectRequirement::required_for(project.job_type).contains(&requirement) {
                    return Err(format!(
                        "{} is not required for project '{}'",
                        requirement.display_name(),
                        project_id
                    ));
                }
                project.completed.insert(requirement);
            }
            ComplianceEvent::WorkSessionLogged {
                inspection_completed,
            } => {
                self.inspections.total_sessions = self.inspections.total_sessions.saturating_add(1);
                if !inspection_completed {
                    self.inspections.missed = self.inspections.missed.saturating_add(1);
                }
            }
            ComplianceEvent::SafetyDocumentPublished { document_id } => {
                require_id(&document_id, "document_id")?;
                if !self.safety_documents.insert(document_id.clone()) {
                    return Err(format!("safety document '{}' already published", document_id));
                }
            }
            ComplianceEvent::EmployeeAdded { employee_id } => {
                require_id(&employee_id, "employee_id")?;
                if !self.employees.insert(employee_id.clone()) {
                    return Err(format!("employee '{}' already exists", employee_id));
                }
            }
            ComplianceEvent::AcknowledgmentSigned {
                employee_id,
                document_id,
            } => {
                if !self.employees.contains(&employee_id) {
                    return Err(format!("unknown employee '{}'", employee_id));
                }
                if !self.safety_documents.contains(&document_id) {
                    return Err(format!("unknown safety document '{}'", document_id));
                }
                // signing twice is a no-op
                self.signatures.insert((employee_id, document_id));
            }
        }
        Ok(())
    }

    /// Builds the scoring snapshot for the given evaluation date.
    pub(crate) fn snapshot(&self, company_id: &str, as_of: NaiveDate) -> ComplianceSnapshot {
        let core_documents = self
            .core_documents
            .iter()
            .map(|(kind, expires_at)| CoreDocumentStatus {
                kind: *kind,
                present: true,
                expires_at: *expires_at,
            })
            .collect();

        let mut acknowledgments =
            Vec::with_capacity(self.employees.len() * self.safety_documents.len());
        for employee_id in &self.employees {
            for document_id in &self.safety_documents {
                acknowledgments.push(Acknowledgment {
                    employee_id: employee_id.clone(),
                    document_id: document_id.clone(),
                    signed: self
                        .signatures
                        .contains(&(employee_id.clone(), document_id.clone())),
                });
            }
        }

        ComplianceSnapshot {
            company_id: company_id.to_string(),
            as_of,
            core_documents,
            projects: self.projects.clone(),
            inspections: self.inspections,
            acknowledgments,
        }
    }
}

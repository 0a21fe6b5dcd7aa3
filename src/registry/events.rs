//! Business events that change a company's compliance facts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CoreDocumentKind, JobType, ProjectRequirement};

/// A change to one company's compliance facts.
///
/// Every event triggers an immediate recalculation of the company's score.
/// On the wire events are tagged by `type`:
///
/// ```json
/// { "type": "work_session_logged", "inspection_completed": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComplianceEvent {
    /// A core document was uploaded, replacing any earlier version.
    CoreDocumentUploaded {
        /// Which core document.
        kind: CoreDocumentKind,
        /// When it expires, if ever.
        #[serde(default)]
        expires_at: Option<NaiveDate>,
    },
    /// A core document was removed.
    CoreDocumentRemoved {
        /// Which core document.
        kind: CoreDocumentKind,
    },
    /// A project was created.
    ProjectAdded {
        /// Project identifier, unique within the company.
        project_id: String,
        /// Determines which records the project owes.
        job_type: JobType,
    },
    /// A required record was completed for a project.
    ProjectRecordCompleted {
        /// The project.
        project_id: String,
        /// The record that was completed.
        requirement: ProjectRequirement,
    },
    /// A work session started, with or without a harness inspection.
    WorkSessionLogged {
        /// Whether the harness inspection was done first.
        inspection_completed: bool,
    },
    /// A safety document version was published; every employee owes a signature.
    SafetyDocumentPublished {
        /// Document version identifier.
        document_id: String,
    },
    /// An employee joined; they owe a signature on every published document.
    EmployeeAdded {
        /// Employee identifier.
        employee_id: String,
    },
    /// An employee signed a safety document.
    AcknowledgmentSigned {
        /// Employee identifier.
        employee_id: String,
        /// Document version identifier.
        document_id: String,
    },
}

impl ComplianceEvent {
    /// Returns the snake_case event name, as used in the `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            ComplianceEvent::CoreDocumentUploaded { .. } => "core_document_uploaded",
            ComplianceEvent::CoreDocumentRemoved { .. } => "core_document_removed",
            ComplianceEvent::ProjectAdded { .. } => "project_added",
            ComplianceEvent::ProjectRecordCompleted { .. } => "project_record_completed",
            ComplianceEvent::WorkSessionLogged { .. } => "work_session_logged",
            ComplianceEvent::SafetyDocumentPublished { .. } => "safety_document_published",
            ComplianceEvent::EmployeeAdded { .. } => "employee_added",
            ComplianceEvent::AcknowledgmentSigned { .. } => "acknowledgment_signed",
        }
    }
}

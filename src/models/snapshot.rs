//! Compliance snapshot model and related types.
//!
//! A [`ComplianceSnapshot`] is the complete set of facts the calculator needs
//! to score one company at one point in time. Callers assemble it from their
//! document, inspection and acknowledgment stores before scoring.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the three company-level core compliance documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreDocumentKind {
    /// Certificate of Insurance.
    CertificateOfInsurance,
    /// Health & Safety Manual.
    HealthSafetyManual,
    /// Company Policy.
    CompanyPolicy,
}

impl CoreDocumentKind {
    /// Every core document kind, in display order.
    pub const ALL: [CoreDocumentKind; 3] = [
        CoreDocumentKind::CertificateOfInsurance,
        CoreDocumentKind::HealthSafetyManual,
        CoreDocumentKind::CompanyPolicy,
    ];

    /// Returns the stable snake_case identifier used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreDocumentKind::CertificateOfInsurance => "certificate_of_insurance",
            CoreDocumentKind::HealthSafetyManual => "health_safety_manual",
            CoreDocumentKind::CompanyPolicy => "company_policy",
        }
    }

    /// Returns the human-readable document name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CoreDocumentKind::CertificateOfInsurance => "Certificate of Insurance",
            CoreDocumentKind::HealthSafetyManual => "Health & Safety Manual",
            CoreDocumentKind::CompanyPolicy => "Company Policy",
        }
    }
}

/// Upload status of a single core document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreDocumentStatus {
    /// Which core document this is.
    pub kind: CoreDocumentKind,
    /// Whether the document has been uploaded.
    pub present: bool,
    /// Expiration date, if the document expires.
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
}

impl CoreDocumentStatus {
    /// Returns true if the document is present and not expired on `as_of`.
    ///
    /// A document expiring on `as_of` is still valid for that day.
    ///
    /// # Examples
    ///
    /// ```
    /// use csr_engine::models::{CoreDocumentKind, CoreDocumentStatus};
    /// use chrono::NaiveDate;
    ///
    /// let doc = CoreDocumentStatus {
    ///     kind: CoreDocumentKind::CertificateOfInsurance,
    ///     present: true,
    ///     expires_at: Some(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()),
    /// };
    /// assert!(doc.is_valid_on(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()));
    /// assert!(!doc.is_valid_on(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
    /// ```
    pub fn is_valid_on(&self, as_of: NaiveDate) -> bool {
        self.present && !self.is_expired_on(as_of)
    }

    /// Returns true if the document carries an expiry date before `as_of`.
    pub fn is_expired_on(&self, as_of: NaiveDate) -> bool {
        self.expires_at.is_some_and(|expiry| expiry < as_of)
    }
}

/// The kind of work a project performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// Work performed on rope; anchors must be inspected.
    RopeAccess,
    /// Work without rope (ground level, lifts); anchor inspection is waived.
    NonRope,
}

/// One of the per-project safety records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRequirement {
    /// Anchor inspection, required only for rope access work.
    AnchorInspection,
    /// Rope access plan.
    RopeAccessPlan,
    /// Toolbox meeting record.
    ToolboxMeeting,
    /// Field-Level Hazard Assessment.
    Flha,
}

impl ProjectRequirement {
    /// Every project requirement, in display order.
    pub const ALL: [ProjectRequirement; 4] = [
        ProjectRequirement::AnchorInspection,
        ProjectRequirement::RopeAccessPlan,
        ProjectRequirement::ToolboxMeeting,
        ProjectRequirement::Flha,
    ];

    /// Returns the requirements that apply to a project of the given job type.
    ///
    /// # Examples
    ///
    /// ```
    /// use csr_engine::models::{JobType, ProjectRequirement};
    ///
    /// assert_eq!(ProjectRequirement::required_for(JobType::RopeAccess).len(), 4);
    /// assert_eq!(ProjectRequirement::required_for(JobType::NonRope).len(), 3);
    /// ```
    pub fn required_for(job_type: JobType) -> Vec<ProjectRequirement> {
        Self::ALL
            .into_iter()
            .filter(|req| job_type == JobType::RopeAccess || *req != Self::AnchorInspection)
            .collect()
    }

    /// Returns the stable snake_case identifier used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRequirement::AnchorInspection => "anchor_inspection",
            ProjectRequirement::RopeAccessPlan => "rope_access_plan",
            ProjectRequirement::ToolboxMeeting => "toolbox_meeting",
            ProjectRequirement::Flha => "flha",
        }
    }

    /// Returns the human-readable record name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectRequirement::AnchorInspection => "Anchor Inspection",
            ProjectRequirement::RopeAccessPlan => "Rope Access Plan",
            ProjectRequirement::ToolboxMeeting => "Toolbox Meeting",
            ProjectRequirement::Flha => "FLHA",
        }
    }
}

/// The documentation state of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDocumentation {
    /// Unique identifier for the project.
    pub project_id: String,
    /// The kind of work the project performs.
    pub job_type: JobType,
    /// The records that have been completed for this project.
    pub completed: BTreeSet<ProjectRequirement>,
}

impl ProjectDocumentation {
    /// Returns the required records that have not been completed.
    pub fn missing(&self) -> Vec<ProjectRequirement> {
        ProjectRequirement::required_for(self.job_type)
            .into_iter()
            .filter(|req| !self.completed.contains(req))
            .collect()
    }
}

/// Aggregate harness inspection counts across all work sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectionTally {
    /// Work sessions that started without a completed harness inspection.
    pub missed: u32,
    /// Total work sessions logged.
    pub total_sessions: u32,
}

/// Whether one employee has signed one safety document version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Acknowledgment {
    /// The employee who owes the signature.
    pub employee_id: String,
    /// The safety document version to be acknowledged.
    pub document_id: String,
    /// Whether the employee has signed.
    pub signed: bool,
}

/// All compliance facts for one company at one evaluation date.
///
/// Every category must be sent, even when empty. Only `inspections` may be
/// omitted, which reads as a company with no work sessions yet. Unknown keys
/// are rejected.
///
/// # Example
///
/// ```
/// use csr_engine::models::ComplianceSnapshot;
/// use chrono::NaiveDate;
///
/// let snapshot = ComplianceSnapshot::new("acme_rope", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert!(snapshot.core_documents.is_empty());
/// assert_eq!(snapshot.inspections.total_sessions, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceSnapshot {
    /// The company being scored.
    pub company_id: String,
    /// The date against which document expiry is evaluated.
    pub as_of: NaiveDate,
    /// Core document statuses; absent kinds count as missing.
    pub core_documents: Vec<CoreDocumentStatus>,
    /// Documentation state for every active project.
    pub projects: Vec<ProjectDocumentation>,
    /// Harness inspection counts; zero sessions when omitted.
    #[serde(default)]
    pub inspections: InspectionTally,
    /// Required employee acknowledgments.
    pub acknowledgments: Vec<Acknowledgment>,
}

impl ComplianceSnapshot {
    /// Creates an empty snapshot: no documents, projects, sessions or employees.
    pub fn new(company_id: impl Into<String>, as_of: NaiveDate) -> Self {
        Self {
            company_id: company_id.into(),
            as_of,
            core_documents: Vec::new(),
            projects: Vec::new(),
            inspections: InspectionTally::default(),
            acknowledgments: Vec::new(),
        }
    }

    /// Returns the status recorded for a core document kind, if any.
    pub fn core_document(&self, kind: CoreDocumentKind) -> Option<&CoreDocumentStatus> {
        self.core_documents.iter().find(|doc| doc.kind == kind)
    }
}

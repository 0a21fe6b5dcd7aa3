//! Core data models for the CSR engine.
//!
//! This module contains all the domain models used throughout the engine.

mod score_result;
mod snapshot;
mod viewer;

pub use score_result::{
    AuditStep, AuditTrace, CategoryBreakdown, ComplianceCategory, RemediationHint, ScoreResult,
    ScoreTier,
};
pub use snapshot::{
    Acknowledgment, ComplianceSnapshot, CoreDocumentKind, CoreDocumentStatus, InspectionTally,
    JobType, ProjectDocumentation, ProjectRequirement,
};
pub use viewer::{ScoreView, Viewer, ViewerRole};

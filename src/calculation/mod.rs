//! Calculation logic for the Company Safety Rating.
//!
//! Each compliance category has its own penalty calculation returning a
//! breakdown, remediation hints, and an audit step. [`compute_score`]
//! validates the snapshot, runs the categories in order, and turns the
//! summed penalties into a clamped score and tier.

mod acknowledgments;
mod compliance_score;
mod core_documents;
mod harness_inspection;
mod penalty;
mod project_documentation;
mod tier;
mod validation;

pub use acknowledgments::calculate_acknowledgments;
pub use compliance_score::compute_score;
pub use core_documents::calculate_core_documents;
pub use harness_inspection::calculate_harness_inspections;
pub use penalty::{
    CategoryResult, SCORE_DECIMAL_PLACES, proportional_penalty, round_points, scaled_penalty,
};
pub use project_documentation::calculate_project_documentation;
pub use tier::classify_tier;
pub use validation::validate_snapshot;

//! Role-based projection of score results.
//!
//! All visibility policy lives in [`capabilities_for`]: a lookup table from
//! role to the parts of a [`ScoreResult`] that role may see. Roles absent
//! from the table see nothing and get `UnauthorizedView`.

use crate::error::{EngineError, EngineResult};
use crate::models::{ScoreResult, ScoreView, Viewer, ViewerRole};

/// The parts of a score result a role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Numeric score and percentage.
    pub score: bool,
    /// Colour tier.
    pub tier: bool,
    /// Per-category breakdown.
    pub breakdown: bool,
    /// Remediation hints.
    pub remediation: bool,
    /// Access is limited to companies the viewer manages.
    pub managed_only: bool,
}

const FULL: Capabilities = Capabilities {
    score: true,
    tier: true,
    breakdown: true,
    remediation: true,
    managed_only: false,
};

const SCORE_ONLY: Capabilities = Capabilities {
    score: true,
    tier: false,
    breakdown: false,
    remediation: false,
    managed_only: false,
};

const VENDOR_REVIEW: Capabilities = Capabilities {
    score: true,
    tier: true,
    breakdown: true,
    remediation: false,
    managed_only: true,
};

/// Returns what a role may see, or `None` if it has no access at all.
pub fn capabilities_for(role: ViewerRole) -> Option<Capabilities> {
    match role {
        ViewerRole::Owner => Some(FULL),
        ViewerRole::Technician => Some(SCORE_ONLY),
        ViewerRole::PropertyManager => Some(VENDOR_REVIEW),
        ViewerRole::BuildingManager | ViewerRole::Resident | ViewerRole::Competitor => None,
    }
}

/// Projects a score result down to what `viewer` is allowed to see.
///
/// # Returns
///
/// `UnauthorizedView` if the role has no access, or if a property manager
/// asks about a company outside their managed vendors.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::compute_score;
/// use csr_engine::config::ScoringConfig;
/// use csr_engine::models::{ComplianceSnapshot, Viewer, ViewerRole};
/// use csr_engine::visibility::project_for_viewer;
/// use chrono::NaiveDate;
///
/// let snapshot = ComplianceSnapshot::new("acme_rope", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// let result = compute_score(&snapshot, &ScoringConfig::default()).unwrap();
///
/// let view = project_for_viewer(&result, &Viewer::new(ViewerRole::Technician)).unwrap();
/// assert!(view.score.is_some());
/// assert!(view.categories.is_none());
///
/// assert!(project_for_viewer(&result, &Viewer::new(ViewerRole::Resident)).is_err());
/// ```
pub fn project_for_viewer(result: &ScoreResult, viewer: &Viewer) -> EngineResult<ScoreView> {
    let denied = || EngineError::UnauthorizedView {
        role: viewer.role.as_str().to_string(),
        company_id: result.company_id.clone(),
    };

    let caps = capabilities_for(viewer.role).ok_or_else(denied)?;
    if caps.managed_only && !viewer.manages(&result.company_id) {
        return Err(denied());
    }

    Ok(ScoreView {
        company_id: result.company_id.clone(),
        role: viewer.role,
        score: caps.score.then_some(result.score),
        percentage: caps.score.then_some(result.percentage),
        tier: caps.tier.then_some(result.tier),
        categories: caps.breakdown.then(|| result.categories.clone()),
        remediation: caps.remediation.then(|| result.remediation.clone()),
    })
}

//! Viewer model and the projected score view.
//!
//! A [`Viewer`] describes who is asking to see a company's rating, and a
//! [`ScoreView`] is the subset of a score result that viewer may see.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryBreakdown, RemediationHint, ScoreTier};

/// The closed set of roles that may ask for a safety rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    /// The company's own owner or administrator.
    Owner,
    /// A technician evaluating the company as a prospective employer.
    Technician,
    /// A property or portfolio manager evaluating a vendor.
    PropertyManager,
    /// A building manager.
    BuildingManager,
    /// A building resident.
    Resident,
    /// Another rope access company.
    Competitor,
}

impl ViewerRole {
    /// Returns the stable snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerRole::Owner => "owner",
            ViewerRole::Technician => "technician",
            ViewerRole::PropertyManager => "property_manager",
            ViewerRole::BuildingManager => "building_manager",
            ViewerRole::Resident => "resident",
            ViewerRole::Competitor => "competitor",
        }
    }
}

/// Who is viewing a rating.
///
/// Property managers only see vendors listed in `managed_companies`; the
/// field is ignored for every other role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// The viewer's role.
    pub role: ViewerRole,
    /// Companies this viewer manages as vendors.
    #[serde(default)]
    pub managed_companies: BTreeSet<String>,
}

impl Viewer {
    /// Creates a viewer with the given role and no managed vendors.
    pub fn new(role: ViewerRole) -> Self {
        Self {
            role,
            managed_companies: BTreeSet::new(),
        }
    }

    /// Creates a property manager viewer for the given vendors.
    ///
    /// # Examples
    ///
    /// ```
    /// use csr_engine::models::{Viewer, ViewerRole};
    ///
    /// let viewer = Viewer::property_manager(["acme_rope"]);
    /// assert_eq!(viewer.role, ViewerRole::PropertyManager);
    /// assert!(viewer.manages("acme_rope"));
    /// assert!(!viewer.manages("other_co"));
    /// ```
    pub fn property_manager<I, S>(companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            role: ViewerRole::PropertyManager,
            managed_companies: companies.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the viewer manages the given company.
    pub fn manages(&self, company_id: &str) -> bool {
        self.managed_companies.contains(company_id)
    }
}

/// The part of a score result a viewer is allowed to see.
///
/// Fields the viewer may not see are `None` and omitted from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    /// The company the view describes.
    pub company_id: String,
    /// The role the view was built for.
    pub role: ViewerRole,
    /// The numeric score.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<Decimal>,
    /// The whole-number percentage.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub percentage: Option<u8>,
    /// The colour tier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tier: Option<ScoreTier>,
    /// Per-category contributions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub categories: Option<Vec<CategoryBreakdown>>,
    /// Actions that would raise the score.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub remediation: Option<Vec<RemediationHint>>,
}

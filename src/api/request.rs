//! Request types for the CSR engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ComplianceSnapshot, Viewer, ViewerRole};

/// Request body for `POST /score`.
///
/// Scores a caller-supplied snapshot and returns what `viewer` may see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// The compliance facts to score.
    pub snapshot: ComplianceSnapshot,
    /// Who is asking.
    pub viewer: Viewer,
}

/// Request body for `POST /companies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCompanyRequest {
    /// Identifier for the new company.
    pub company_id: String,
    /// Evaluation date for the returned score; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Query string for endpoints that only need an evaluation date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsOfQuery {
    /// Evaluation date; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Query string for `GET /companies/:company_id/score`.
///
/// `managed` is a comma-separated list of companies a property manager
/// manages, e.g. `?role=property_manager&managed=acme_rope,other_co`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreQuery {
    /// The viewer's role.
    pub role: ViewerRole,
    /// Comma-separated managed company ids.
    #[serde(default)]
    pub managed: Option<String>,
    /// Evaluation date; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ScoreQuery {
    /// Builds the viewer described by the query.
    pub fn viewer(&self) -> Viewer {
        let mut viewer = Viewer::new(self.role);
        if let Some(managed) = &self.managed {
            viewer.managed_companies = managed
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
        }
        viewer
    }
}

//! HTTP API module for the CSR engine.
//!
//! This module provides the REST endpoints for scoring snapshots, managing
//! company facts through compliance events, and reading role-filtered scores.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AsOfQuery, RegisterCompanyRequest, ScoreQuery, ScoreRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

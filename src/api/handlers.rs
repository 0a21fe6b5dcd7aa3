//! HTTP request handlers for the CSR engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_score;
use crate::registry::ComplianceEvent;
use crate::visibility::project_for_viewer;

use super::request::{AsOfQuery, RegisterCompanyRequest, ScoreQuery, ScoreRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .route("/companies", post(register_company_handler))
        .route("/companies/:company_id/events", post(apply_event_handler))
        .route("/companies/:company_id/score", get(company_score_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Maps a JSON body rejection to an API error, logging it.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // the body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_rejection_error(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn engine_error(correlation_id: Uuid, err: crate::error::EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    error_response(err.into())
}

/// Handler for `POST /score`.
///
/// Scores the snapshot in the request body and returns the requesting
/// viewer's projection of the result.
async fn score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing score request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let start_time = Instant::now();
    let result = match compute_score(&request.snapshot, state.config()) {
        Ok(result) => result,
        Err(err) => return engine_error(correlation_id, err),
    };
    let view = match project_for_viewer(&result, &request.viewer) {
        Ok(view) => view,
        Err(err) => return engine_error(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        company_id = %result.company_id,
        role = request.viewer.role.as_str(),
        score = %result.score,
        tier = result.tier.as_str(),
        duration_us = start_time.elapsed().as_micros(),
        "Score calculated"
    );
    json_response(StatusCode::OK, view)
}

/// Handler for `POST /companies`.
///
/// Registers a company and returns its full baseline result.
async fn register_company_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterCompanyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing company registration");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let as_of = request.as_of.unwrap_or_else(today);
    match state
        .registry()
        .register_company(&request.company_id, as_of)
        .await
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                company_id = %result.company_id,
                score = %result.score,
                "Company registered"
            );
            json_response(StatusCode::CREATED, result)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `POST /companies/:company_id/events`.
///
/// Applies one compliance event and returns the recalculated result.
async fn apply_event_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
    payload: Result<Json<ComplianceEvent>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %company_id,
        "Processing compliance event"
    );

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(query_rejection_error(correlation_id, rejection)),
    };
    let event = match payload {
        Ok(Json(event)) => event,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let event_name = event.name();
    let as_of = query.as_of.unwrap_or_else(today);
    match state.registry().apply(&company_id, event, as_of).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                company_id = %company_id,
                event = event_name,
                score = %result.score,
                tier = result.tier.as_str(),
                "Compliance event applied"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `GET /companies/:company_id/score`.
///
/// Recomputes the company's score and returns the viewer's projection.
async fn company_score_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    query: Result<Query<ScoreQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %company_id,
        "Processing company score request"
    );

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(query_rejection_error(correlation_id, rejection)),
    };

    let as_of = query.as_of.unwrap_or_else(today);
    let result = match state.registry().score(&company_id, as_of).await {
        Ok(result) => result,
        Err(err) => return engine_error(correlation_id, err),
    };
    match project_for_viewer(&result, &query.viewer()) {
        Ok(view) => json_response(StatusCode::OK, view),
        Err(err) => engine_error(correlation_id, err),
    }
}

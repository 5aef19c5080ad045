//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    LeaveValueInputs, detect_date_conflicts, select_leave_day_value,
    select_leave_day_value_detailed, select_leave_remaining, summarize_hours,
};
use crate::error::EngineError;

use super::request::{
    ConflictCheckRequest, HoursSummaryRequest, LeaveDayValueRequest, LeaveRemainingRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ConflictCheckResponse, LeaveDayValueResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave/day-value", post(leave_day_value_handler))
        .route("/hours/summary", post(hours_summary_handler))
        .route("/leave/remaining", post(leave_remaining_handler))
        .route("/time-entries/conflicts", post(conflicts_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn engine_error_response(error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a body extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /leave/day-value.
///
/// Values one leave day. Settings and services missing from the request
/// come from the organization configuration.
async fn leave_day_value_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveDayValueRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave day value request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Leave day value request rejected"
        );
        return engine_error_response(err);
    }

    let config = state.config();
    let services = if request.services.is_empty() {
        config.services()
    } else {
        request.services.as_slice()
    };
    let inputs = LeaveValueInputs {
        employees: &request.employees,
        work_sessions: &request.work_sessions,
        services,
        leave_pay_policy: request.leave_pay_policy.as_ref(),
        settings: Some(request.settings.as_ref().unwrap_or(config.settings())),
    };

    let start_time = Instant::now();
    if request.collect_diagnostics {
        let result = select_leave_day_value_detailed(&request.employee_id, request.date, &inputs);
        info!(
            correlation_id = %correlation_id,
            employee_id = %request.employee_id,
            date = %request.date,
            method = %result.method,
            value = %result.value,
            insufficient_data = result.insufficient_data,
            duration_us = start_time.elapsed().as_micros(),
            "Leave day valued"
        );
        json_response(StatusCode::OK, result)
    } else {
        let value = select_leave_day_value(&request.employee_id, request.date, &inputs);
        info!(
            correlation_id = %correlation_id,
            employee_id = %request.employee_id,
            date = %request.date,
            value = %value,
            duration_us = start_time.elapsed().as_micros(),
            "Leave day valued"
        );
        json_response(StatusCode::OK, LeaveDayValueResponse { value })
    }
}

/// Handler for POST /hours/summary.
async fn hours_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<HoursSummaryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing hours summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let services = if request.services.is_empty() {
        state.config().services()
    } else {
        request.services.as_slice()
    };
    let summary = summarize_hours(
        &request.work_sessions,
        &request.employees,
        services,
        &request.filters,
    );
    info!(
        correlation_id = %correlation_id,
        rows = request.work_sessions.len(),
        total_hours = %summary.total_hours,
        "Hours summarized"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /leave/remaining.
async fn leave_remaining_handler(
    payload: Result<Json<LeaveRemainingRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave remaining request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let remaining = select_leave_remaining(
        &request.employee_id,
        request.date,
        &request.balances,
        request.leave_type.as_deref(),
    );
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        remaining = %remaining.remaining,
        "Leave balance read"
    );
    json_response(StatusCode::OK, remaining)
}

/// Handler for POST /time-entries/conflicts.
///
/// Always answers 200; an empty `conflicts` list means the rows can be saved.
async fn conflicts_handler(
    payload: Result<Json<ConflictCheckRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time-entry conflict check");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let conflicts = detect_date_conflicts(&request.existing, &request.incoming);
    if !conflicts.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            incoming = request.incoming.len(),
            conflicts = conflicts.len(),
            "Time-entry conflicts detected"
        );
    }
    json_response(StatusCode::OK, ConflictCheckResponse { conflicts })
}

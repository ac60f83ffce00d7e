//! HTTP request handlers for the expense audit API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::{department_mapping_summary, department_view, process_dashboard_data};
use crate::assistant::Assistant;
use crate::ingest::ingest_files;

use super::request::{
    AssistantRequest, DashboardRequest, DepartmentViewRequest, IngestRequest,
    parse_department_filter,
};
use super::response::{ApiError, ApiErrorResponse, AssistantResponse, IngestResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().upload().max_bytes;
    Router::new()
        .route("/ingest", post(ingest_handler))
        .route("/dashboard", post(dashboard_handler))
        .route("/department-view", post(department_view_handler))
        .route("/assistant", post(assistant_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Handler for POST /ingest endpoint.
///
/// Parses uploaded files and returns the records with a dashboard over them.
async fn ingest_handler(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ingest request");

    let request = match extract(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    let result = parse_department_filter(request.department.as_deref()).and_then(|department| {
        let report = ingest_files(&request.files, state.parser(), state.config().upload())?;
        let dashboard = process_dashboard_data(&report.records, department);
        let department_mapping = department_mapping_summary(&report.records);
        Ok(IngestResponse {
            records: report.records,
            skipped_rows: report.skipped,
            dashboard,
            department_mapping,
        })
    });

    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                files = request.files.len(),
                records = body.records.len(),
                skipped = body.skipped_rows.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Ingest completed successfully"
            );
            ok(body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Ingest failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /dashboard endpoint.
async fn dashboard_handler(payload: Result<Json<DashboardRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dashboard request");

    let request = match extract(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    match parse_department_filter(request.department.as_deref()) {
        Ok(department) => {
            let dashboard = process_dashboard_data(&request.records, department);
            info!(
                correlation_id = %correlation_id,
                records = request.records.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Dashboard completed successfully"
            );
            ok(dashboard)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid department filter");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /department-view endpoint.
async fn department_view_handler(
    State(state): State<AppState>,
    payload: Result<Json<DepartmentViewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing department view request");

    let request = match extract(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    match request.department.parse() {
        Ok(department) => {
            let view = department_view(&request.records, department, state.config().review());
            info!(
                correlation_id = %correlation_id,
                department = %department,
                records = request.records.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Department view completed successfully"
            );
            ok(view)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid department");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /assistant endpoint.
async fn assistant_handler(payload: Result<Json<AssistantRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assistant request");

    let request = match extract(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let reply = Assistant::new().respond(&request.records, &request.message);
    info!(
        correlation_id = %correlation_id,
        records = request.records.len(),
        "Assistant replied"
    );
    ok(AssistantResponse { reply })
}

/// Unwraps a JSON payload, mapping rejections to API errors.
fn extract<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let (status, error) = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(body_text))
            } else {
                (StatusCode::BAD_REQUEST, ApiError::malformed_json(body_text))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            (
                StatusCode::BAD_REQUEST,
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err)),
            )
        }
        JsonRejection::MissingJsonContentType(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json"),
        ),
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(correlation_id = %correlation_id, "Request body too large");
            (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiError::new("PAYLOAD_TOO_LARGE", other.body_text()),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            ApiError::malformed_json("Failed to parse request body"),
        ),
    };
    Err(ApiErrorResponse::new(status, error))
}

fn ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

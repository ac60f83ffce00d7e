//! Response types for the expense audit API.
//!
//! This module defines the success bodies, the error response structures
//! and the mapping from [`AuditError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::aggregation::DepartmentMapping;
use crate::error::AuditError;
use crate::ingest::FileSkippedRow;
use crate::models::{DashboardData, ExpenseRecord};

/// Response body for the `/ingest` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Records parsed from every file, in request order.
    pub records: Vec<ExpenseRecord>,
    /// Lines that did not produce a record.
    pub skipped_rows: Vec<FileSkippedRow>,
    /// Dashboard over the parsed records.
    pub dashboard: DashboardData,
    /// How source department labels were mapped.
    pub department_mapping: Vec<DepartmentMapping>,
}

/// Response body for the `/assistant` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    /// The assistant's reply.
    pub reply: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<AuditError> for ApiErrorResponse {
    fn from(error: AuditError) -> Self {
        let message = error.to_string();
        match error {
            AuditError::EmptyInput => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("EMPTY_INPUT", message),
            ),
            AuditError::MissingColumn { column, headers } => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "MISSING_COLUMN",
                    message,
                    format!(
                        "Missing column '{}'; observed headers: {}",
                        column,
                        headers.join(", ")
                    ),
                ),
            ),
            AuditError::NoValidRecords => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("NO_VALID_RECORDS", message),
            ),
            AuditError::BinarySpreadsheet { file_name } => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ApiError::with_details(
                    "BINARY_SPREADSHEET",
                    message,
                    format!("File '{}' is not comma-separated text", file_name),
                ),
            ),
            AuditError::UnsupportedFile { file_name } => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ApiError::with_details(
                    "UNSUPPORTED_FILE",
                    message,
                    format!("File '{}' could not be parsed", file_name),
                ),
            ),
            AuditError::NoFiles => {
                Self::new(StatusCode::BAD_REQUEST, ApiError::new("NO_FILES", message))
            }
            AuditError::UnknownDepartment { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_DEPARTMENT",
                    message,
                    "Department must be one of DPTID1 to DPTID7",
                ),
            ),
            AuditError::ConfigNotFound { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            AuditError::ConfigParseError { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            ),
        }
    }
}

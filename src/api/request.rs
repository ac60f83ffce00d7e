//! Request types for the expense audit API.
//!
//! The API is stateless: clients send file text to `/ingest` and send the
//! returned records back with every later request.

use serde::{Deserialize, Serialize};

use crate::error::AuditResult;
use crate::ingest::UploadedFile;
use crate::models::{DepartmentId, ExpenseRecord};

/// Request body for the `/ingest` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Files to parse, in order.
    pub files: Vec<UploadedFile>,
    /// Optional department filter for the returned dashboard.
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for the `/dashboard` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Previously ingested records.
    pub records: Vec<ExpenseRecord>,
    /// Optional department filter.
    #[serde(default)]
    pub department: Option<String>,
}

/// Request body for the `/department-view` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentViewRequest {
    /// Previously ingested records.
    pub records: Vec<ExpenseRecord>,
    /// The department to view.
    pub department: String,
}

/// Request body for the `/assistant` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// Previously ingested records.
    pub records: Vec<ExpenseRecord>,
    /// The user's question.
    pub message: String,
}

/// Parses an optional department filter.
pub(crate) fn parse_department_filter(raw: Option<&str>) -> AuditResult<Option<DepartmentId>> {
    raw.map(str::parse::<DepartmentId>).transpose()
}

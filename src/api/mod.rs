//! HTTP API module for the expense audit service.
//!
//! This module provides the JSON endpoints for ingesting expense exports
//! and deriving dashboards, department views and assistant replies from
//! the returned records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssistantRequest, DashboardRequest, DepartmentViewRequest, IngestRequest};
pub use response::{ApiError, ApiErrorResponse, AssistantResponse, IngestResponse};
pub use state::AppState;

//! Aggregation of normalized records into summary views.
//!
//! - [`process_dashboard_data`]: the organization-wide or department-filtered
//!   dashboard bundle
//! - [`department_view`]: a department's dashboard plus violation cards,
//!   monthly spending and the pending-review roster
//! - [`department_mapping_summary`]: which source labels landed on which
//!   department id
//!
//! Every function here is pure; the same records always give the same output.

mod dashboard;
mod department_view;
mod mapping;

pub use dashboard::{display_id, process_dashboard_data};
pub use department_view::{
    DepartmentView, MonthlySpend, PendingPerson, ViolationCard, department_view, pending_review,
};
pub use mapping::{DepartmentMapping, department_mapping_summary};

//! Core data models for the expense audit engine.
//!
//! This module contains all the domain models used throughout the engine.

mod amount;
mod category;
mod dashboard;
mod department;
mod expense_record;

pub use amount::sum_amounts;
pub use category::Category;
pub use dashboard::{
    CategoryTotal, CleanPerson, DashboardData, DepartmentViolations, TotalStats, ViolationPerson,
};
pub use department::{DEPARTMENT_ID_PREFIX, DepartmentId};
pub use expense_record::ExpenseRecord;

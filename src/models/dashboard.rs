//! Dashboard summary models.
//!
//! This module contains [`DashboardData`] and its parts: the flattened,
//! independent output of one aggregation call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, DepartmentId, sum_amounts};

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category.
    pub category: Category,
    /// Sum of record amounts in this category.
    pub value: Decimal,
}

/// An employee with at least one violating record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationPerson {
    /// Employee name; the grouping key.
    pub name: String,
    /// Cosmetic display identifier, `E####`.
    pub eid: String,
    /// Number of violating records.
    pub violations: u32,
    /// Sum of the violating records' amounts.
    pub amount: Decimal,
    /// Department of the first violating record seen.
    pub department: DepartmentId,
    /// Distinct violated categories, first-seen order.
    pub categories: Vec<Category>,
}

/// An (employee, department) pair with no violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanPerson {
    /// Employee name.
    pub name: String,
    /// Department of the pair.
    pub department: DepartmentId,
    /// Cosmetic display identifier, `E####`.
    pub eid: String,
}

/// Violation count for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentViolations {
    /// The department.
    pub department: DepartmentId,
    /// Number of violating records in the department.
    pub violations: u32,
}

/// Headline KPIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalStats {
    /// Count of violating records in scope.
    pub total_violations: u32,
    /// Number of employees with at least one violation.
    pub active_cases: u32,
    /// Rounded percentage of in-scope records that are not violations.
    pub compliance_rate: u32,
    /// Rounded mean violation amount per active case.
    pub avg_violation: Decimal,
}

/// The full summary bundle consumed by presentation views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    /// One entry per category, chart order.
    pub chart_data: Vec<CategoryTotal>,
    /// Violators sorted by violation count, descending.
    pub violation_people: Vec<ViolationPerson>,
    /// Employees that passed the audit.
    pub passed_audit_people: Vec<CleanPerson>,
    /// Exactly seven entries, sorted by violation count, descending.
    pub department_ranking: Vec<DepartmentViolations>,
    /// Headline KPIs.
    pub total_stats: TotalStats,
}

impl DashboardData {
    /// Sum of all category totals.
    pub fn total_spending(&self) -> Decimal {
        sum_amounts(self.chart_data.iter().map(|item| item.value))
    }

    /// Total for a single category.
    pub fn category_total(&self, category: Category) -> Decimal {
        self.chart_data
            .iter()
            .find(|item| item.category == category)
            .map(|item| item.value)
            .unwrap_or(Decimal::ZERO)
    }
}

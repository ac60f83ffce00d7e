//! Normalized expense record.
//!
//! This module defines [`ExpenseRecord`], the value every parsed data line
//! is turned into, and the description format that keeps the original
//! department label recoverable after mapping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, DepartmentId};

/// A single normalized travel expense.
///
/// Records are immutable once created; `category` and `department` are
/// always members of their closed sets.
///
/// # Example
///
/// ```
/// use expense_audit::models::{Category, DepartmentId, ExpenseRecord};
/// use rust_decimal::Decimal;
///
/// let record = ExpenseRecord {
///     id: "1-HOTEL".to_string(),
///     employee_name: "Alice".to_string(),
///     department: DepartmentId::Dept1,
///     category: Category::Hotel,
///     amount: Decimal::new(200, 0),
///     is_violation: true,
///     date: "2024-03-01".to_string(),
///     description: ExpenseRecord::compose_description("Hotel", "Lodging", "Alice", "Engineering"),
/// };
/// assert_eq!(record.source_department(), Some("Engineering"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Batch-scoped identifier: `<lineIndex>-<CATEGORY>`.
    pub id: String,
    /// The employee the expense belongs to.
    pub employee_name: String,
    /// Canonical department the raw department label mapped to.
    pub department: DepartmentId,
    /// Category inferred from the parent expense type.
    pub category: Category,
    /// Non-negative expense amount.
    pub amount: Decimal,
    /// Whether the source data flagged this expense as a violation.
    pub is_violation: bool,
    /// Expense date as given in the source, or the parse date.
    pub date: String,
    /// Free-text annotation carrying the source labels.
    pub description: String,
}

impl ExpenseRecord {
    /// Builds the description text for a record.
    ///
    /// The department label is kept exactly as it appeared in the source
    /// (trimmed, original casing) as the final parenthesized segment, which
    /// is what [`ExpenseRecord::source_department`] reads back.
    pub fn compose_description(
        parent_expense_type: &str,
        expense_type: &str,
        employee_name: &str,
        source_department: &str,
    ) -> String {
        format!(
            "{} - {} expense for {} ({})",
            parent_expense_type, expense_type, employee_name, source_department
        )
    }

    /// Recovers the pre-mapping department label from the description.
    pub fn source_department(&self) -> Option<&str> {
        let body = self.description.strip_suffix(')')?;
        let start = body.rfind(" (")?;
        Some(&body[start + 2..])
    }

    /// Returns true if the description mentions any of the given keywords.
    ///
    /// Keywords are expected in lower case; the description is compared
    /// case-insensitively.
    pub fn mentions_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let description = self.description.to_lowercase();
        keywords
            .iter()
            .any(|keyword| description.contains(keyword.as_ref()))
    }
}

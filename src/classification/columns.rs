//! Header column resolution.
//!
//! Source exports name their columns inconsistently ("Employee Name",
//! "Emp Name", "Name"...). This module locates each logical field in a
//! header row by trying an ordered list of substring terms per field.
//! The term lists form a [`ColumnRules`] table that is passed in, so the
//! heuristics can be tested and overridden from configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// The eight logical fields of an expense export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalColumn {
    /// Employee display name.
    EmployeeName,
    /// Employee identifier.
    EmployeeId,
    /// Free-text department name.
    Department,
    /// Parent expense type; drives classification.
    ParentExpenseType,
    /// Specific expense type.
    ExpenseType,
    /// Expense amount.
    Amount,
    /// Violation flag.
    Violation,
    /// Expense date.
    Date,
}

impl LogicalColumn {
    /// All logical columns; required ones first, in the order they are checked.
    pub const ALL: [LogicalColumn; 8] = [
        LogicalColumn::EmployeeName,
        LogicalColumn::EmployeeId,
        LogicalColumn::Department,
        LogicalColumn::ParentExpenseType,
        LogicalColumn::ExpenseType,
        LogicalColumn::Amount,
        LogicalColumn::Violation,
        LogicalColumn::Date,
    ];

    /// Returns true if a batch cannot be parsed without this column.
    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            LogicalColumn::Amount | LogicalColumn::Violation | LogicalColumn::Date
        )
    }

    /// Label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            LogicalColumn::EmployeeName => "Employee Name",
            LogicalColumn::EmployeeId => "Employee ID",
            LogicalColumn::Department => "Employee Department",
            LogicalColumn::ParentExpenseType => "Parent Expense Type",
            LogicalColumn::ExpenseType => "Expense Type",
            LogicalColumn::Amount => "Amount",
            LogicalColumn::Violation => "Violation",
            LogicalColumn::Date => "Date",
        }
    }

    fn default_terms(&self) -> &'static [&'static str] {
        match self {
            LogicalColumn::EmployeeName => &["employee name", "name", "emp name", "employee"],
            LogicalColumn::EmployeeId => &["employee id", "emp id", "id", "employee number"],
            LogicalColumn::Department => &["employee department", "department", "dept"],
            LogicalColumn::ParentExpenseType => {
                &["parent expense type", "parent type", "expense category"]
            }
            LogicalColumn::ExpenseType => &["expense type", "type", "category", "sub type"],
            LogicalColumn::Amount => &["amount", "cost", "total", "expense amount", "dollar"],
            LogicalColumn::Violation => &["violation", "flag", "error", "issue"],
            LogicalColumn::Date => &["date", "expense date", "transaction date"],
        }
    }
}

/// Search terms for one logical column, most specific first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// The column these terms locate.
    pub column: LogicalColumn,
    /// Lower-case substrings tried in order against each header.
    pub search_terms: Vec<String>,
}

/// Prioritized rule table for the column resolver.
///
/// # Example
///
/// ```
/// use expense_audit::classification::{ColumnRules, LogicalColumn};
///
/// let rules = ColumnRules::default();
/// assert_eq!(rules.terms(LogicalColumn::Department)[0], "employee department");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRules {
    rules: Vec<ColumnRule>,
}

impl ColumnRules {
    /// Builds a rule table, checking that every logical column has terms.
    ///
    /// Terms are lower-cased and trimmed; blank terms are dropped.
    /// Returns a description of the first problem found on failure.
    pub fn new(rules: Vec<ColumnRule>) -> Result<Self, String> {
        let rules: Vec<ColumnRule> = rules
            .into_iter()
            .map(|rule| ColumnRule {
                column: rule.column,
                search_terms: rule
                    .search_terms
                    .iter()
                    .map(|term| term.trim().to_lowercase())
                    .filter(|term| !term.is_empty())
                    .collect(),
            })
            .collect();

        for column in LogicalColumn::ALL {
            let count = rules.iter().filter(|rule| rule.column == column).count();
            if count == 0 {
                return Err(format!("no rule for column '{}'", column.label()));
            }
            if count > 1 {
                return Err(format!("duplicate rules for column '{}'", column.label()));
            }
        }
        if let Some(rule) = rules.iter().find(|rule| rule.search_terms.is_empty()) {
            return Err(format!(
                "rule for column '{}' has no search terms",
                rule.column.label()
            ));
        }

        Ok(Self { rules })
    }

    /// The search terms for a column. Empty only if the table was built
    /// without validation, which this type does not allow.
    pub fn terms(&self, column: LogicalColumn) -> &[String] {
        self.rules
            .iter()
            .find(|rule| rule.column == column)
            .map(|rule| rule.search_terms.as_slice())
            .unwrap_or(&[])
    }

    /// The underlying rules.
    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            rules: LogicalColumn::ALL
                .iter()
                .map(|column| ColumnRule {
                    column: *column,
                    search_terms: column
                        .default_terms()
                        .iter()
                        .map(|term| term.to_string())
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Resolved column positions for a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    /// Employee name column.
    pub employee_name: usize,
    /// Employee id column.
    pub employee_id: usize,
    /// Department column.
    pub department: usize,
    /// Parent expense type column.
    pub parent_expense_type: usize,
    /// Expense type column.
    pub expense_type: usize,
    /// Amount column, if present.
    pub amount: Option<usize>,
    /// Violation flag column, if present.
    pub violation: Option<usize>,
    /// Date column, if present.
    pub date: Option<usize>,
}

/// Normalizes a raw header token: quotes removed, trimmed, lower-cased.
pub fn normalize_header(raw: &str) -> String {
    raw.replace('"', "").trim().to_lowercase()
}

/// Returns the index of the first header containing any term.
///
/// Terms are tried in order and each term is checked against every header
/// before the next term is tried, so a more specific term always beats a
/// looser one regardless of column order.
///
/// # Example
///
/// ```
/// use expense_audit::classification::find_column_index;
///
/// let headers = vec!["name".to_string(), "employee name".to_string()];
/// let terms = vec!["employee name".to_string(), "name".to_string()];
/// assert_eq!(find_column_index(&headers, &terms), Some(1));
/// ```
pub fn find_column_index<S: AsRef<str>>(headers: &[String], terms: &[S]) -> Option<usize> {
    terms.iter().find_map(|term| {
        let term = term.as_ref();
        headers.iter().position(|header| header.contains(term))
    })
}

/// Resolves every logical column against normalized headers.
///
/// Fails with [`AuditError::MissingColumn`] for the first required column
/// that cannot be found.
pub fn resolve_columns(headers: &[String], rules: &ColumnRules) -> AuditResult<ColumnIndices> {
    let find = |column: LogicalColumn| find_column_index(headers, rules.terms(column));
    let require = |column: LogicalColumn| {
        find(column).ok_or_else(|| AuditError::MissingColumn {
            column: column.label().to_string(),
            headers: headers.to_vec(),
        })
    };

    Ok(ColumnIndices {
        employee_name: require(LogicalColumn::EmployeeName)?,
        employee_id: require(LogicalColumn::EmployeeId)?,
        department: require(LogicalColumn::Department)?,
        parent_expense_type: require(LogicalColumn::ParentExpenseType)?,
        expense_type: require(LogicalColumn::ExpenseType)?,
        amount: find(LogicalColumn::Amount),
        violation: find(LogicalColumn::Violation),
        date: find(LogicalColumn::Date),
    })
}

//! Department-scoped views built on the dashboard aggregation.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ReviewConfig;
use crate::models::{Category, DashboardData, DepartmentId, ExpenseRecord};

use super::dashboard::{display_id, process_dashboard_data};

/// Date layouts accepted when bucketing spending by month.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Violating spend for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCard {
    /// The category.
    pub category: Category,
    /// Summed amount of violating records in the category.
    pub amount: Decimal,
    /// Number of violating records in the category.
    pub count: u32,
}

/// Spending in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySpend {
    /// Month as `YYYY-MM`.
    pub month: String,
    /// Summed amount.
    pub amount: Decimal,
}

/// An employee with records awaiting review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPerson {
    /// Employee name.
    pub name: String,
    /// Department of the first pending record seen.
    pub department: DepartmentId,
    /// Cosmetic display identifier.
    pub eid: String,
    /// Number of pending records.
    pub items: u32,
    /// Configured reason text.
    pub reason: String,
}

/// Everything shown for a single department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentView {
    /// The department.
    pub department: DepartmentId,
    /// Dashboard bundle filtered to the department.
    pub dashboard: DashboardData,
    /// Violating spend per category, chart order.
    pub violation_cards: Vec<ViolationCard>,
    /// Total spending in the department.
    pub total_spending: Decimal,
    /// Spending per month, ascending.
    pub monthly_spending: Vec<MonthlySpend>,
    /// Employees with records awaiting review.
    pub pending_review: Vec<PendingPerson>,
}

/// Builds the view for one department.
///
/// # Example
///
/// ```
/// use expense_audit::aggregation::department_view;
/// use expense_audit::config::ReviewConfig;
/// use expense_audit::ingest::parse_csv_content;
/// use expense_audit::models::DepartmentId;
///
/// let records = parse_csv_content(
///     "Employee Name,Employee ID,Department,Expense Category,Sub Type,Amount,Violation,Date\n\
///      Alice,E1,Legal,Meals,Pending receipt,45,No,2024-02-11\n\
///      Bob,E2,Legal,Hotel,Room,300,Yes,2024-03-02",
/// )
/// .unwrap();
/// let view = department_view(&records, DepartmentId::Dept7, &ReviewConfig::default());
///
/// assert_eq!(view.monthly_spending.len(), 2);
/// assert_eq!(view.pending_review[0].name, "Alice");
/// ```
pub fn department_view(
    records: &[ExpenseRecord],
    department: DepartmentId,
    review: &ReviewConfig,
) -> DepartmentView {
    let scoped: Vec<ExpenseRecord> = records
        .iter()
        .filter(|record| record.department == department)
        .cloned()
        .collect();

    let dashboard = process_dashboard_data(records, Some(department));
    let total_spending = dashboard.total_spending();

    DepartmentView {
        department,
        violation_cards: violation_cards(&scoped),
        total_spending,
        monthly_spending: monthly_spending(&scoped),
        pending_review: pending_review(&scoped, review),
        dashboard,
    }
}

/// Groups records whose description mentions a pending keyword by employee.
///
/// Entries are in first-seen order; keywords are matched case-insensitively.
pub fn pending_review(records: &[ExpenseRecord], review: &ReviewConfig) -> Vec<PendingPerson> {
    let keywords: Vec<String> = review
        .pending_keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let mut people: Vec<PendingPerson> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|record| record.mentions_any(&keywords)) {
        match positions.get(record.employee_name.as_str()) {
            Some(&position) => people[position].items += 1,
            None => {
                positions.insert(&record.employee_name, people.len());
                people.push(PendingPerson {
                    name: record.employee_name.clone(),
                    department: record.department,
                    eid: display_id(&record.employee_name),
                    items: 1,
                    reason: review.pending_reason.clone(),
                });
            }
        }
    }
    people
}

fn violation_cards(records: &[ExpenseRecord]) -> Vec<ViolationCard> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let violating = records
                .iter()
                .filter(|record| record.is_violation && record.category == category);
            let (amount, count) = violating.fold((Decimal::ZERO, 0u32), |(amount, count), record| {
                (amount.saturating_add(record.amount), count + 1)
            });
            ViolationCard {
                category,
                amount,
                count,
            }
        })
        .collect()
}

fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn monthly_spending(records: &[ExpenseRecord]) -> Vec<MonthlySpend> {
    let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for record in records {
        if let Some(date) = parse_record_date(&record.date) {
            let month = months.entry((date.year(), date.month())).or_default();
            *month = month.saturating_add(record.amount);
        }
    }

    months
        .into_iter()
        .map(|((year, month), amount)| MonthlySpend {
            month: format!("{year:04}-{month:02}"),
            amount,
        })
        .collect()
}

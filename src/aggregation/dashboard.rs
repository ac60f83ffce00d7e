//! Dashboard aggregation.
//!
//! [`process_dashboard_data`] reduces a record sequence to a
//! [`DashboardData`] bundle in one pass per section. All intermediate maps
//! are local to the call.

use std::collections::{HashMap, HashSet};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::classification::{hash_bucket, string_hash};
use crate::models::{
    Category, CategoryTotal, CleanPerson, DashboardData, DepartmentId, DepartmentViolations,
    ExpenseRecord, TotalStats, ViolationPerson, sum_amounts,
};

/// Derives the cosmetic `E####` display id for an employee name.
///
/// The id is `1000 + |string_hash(name)| mod 9000`, so the same name always
/// gets the same id.
///
/// # Example
///
/// ```
/// use expense_audit::aggregation::display_id;
///
/// assert_eq!(display_id("Alice"), "E9368");
/// assert_eq!(display_id("Alice"), display_id("Alice"));
/// ```
pub fn display_id(name: &str) -> String {
    format!("E{}", 1000 + hash_bucket(string_hash(name), 9000))
}

/// Aggregates records into the dashboard bundle.
///
/// With a department filter, every section is computed over that
/// department's records except `department_ranking`, which always compares
/// all seven departments across the full record set.
///
/// # Example
///
/// ```
/// use expense_audit::aggregation::process_dashboard_data;
/// use expense_audit::ingest::parse_csv_content;
/// use rust_decimal::Decimal;
///
/// let records = parse_csv_content(
///     "Employee Name,Employee ID,Employee Department,Parent Expense Type,Expense Type,Amount,Violation,Date\n\
///      Alice,E1,Engineering,Hotel,Lodging,200,Yes,2024-03-01\n\
///      Bob,E2,Finance,Airfare,Flight,500,No,2024-03-02",
/// )
/// .unwrap();
/// let dashboard = process_dashboard_data(&records, None);
///
/// assert_eq!(dashboard.total_stats.total_violations, 1);
/// assert_eq!(dashboard.total_stats.active_cases, 1);
/// assert_eq!(dashboard.total_stats.compliance_rate, 50);
/// assert_eq!(dashboard.total_stats.avg_violation, Decimal::new(200, 0));
/// ```
pub fn process_dashboard_data(
    records: &[ExpenseRecord],
    department: Option<DepartmentId>,
) -> DashboardData {
    let scoped: Vec<&ExpenseRecord> = records
        .iter()
        .filter(|record| department.is_none_or(|dept| record.department == dept))
        .collect();

    let chart_data = category_totals(&scoped);
    let violation_people = violator_roster(&scoped);
    let passed_audit_people = clean_roster(&scoped, &violation_people);
    let department_ranking = department_ranking(records);

    let total_violations = scoped.iter().filter(|record| record.is_violation).count();
    let total_stats = TotalStats {
        total_violations: total_violations as u32,
        active_cases: violation_people.len() as u32,
        compliance_rate: compliance_rate(scoped.len(), total_violations),
        avg_violation: average_violation(&violation_people),
    };

    debug!(
        records = records.len(),
        in_scope = scoped.len(),
        department = ?department,
        violators = violation_people.len(),
        "Aggregated dashboard data"
    );

    DashboardData {
        chart_data,
        violation_people,
        passed_audit_people,
        department_ranking,
        total_stats,
    }
}

fn category_totals(records: &[&ExpenseRecord]) -> Vec<CategoryTotal> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            value: sum_amounts(
                records
                    .iter()
                    .filter(|record| record.category == category)
                    .map(|record| record.amount),
            ),
        })
        .collect()
}

fn violator_roster(records: &[&ExpenseRecord]) -> Vec<ViolationPerson> {
    let mut people: Vec<ViolationPerson> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|record| record.is_violation) {
        match positions.get(record.employee_name.as_str()) {
            Some(&position) => {
                let person = &mut people[position];
                person.violations += 1;
                person.amount = person.amount.saturating_add(record.amount);
                if !person.categories.contains(&record.category) {
                    person.categories.push(record.category);
                }
            }
            None => {
                positions.insert(&record.employee_name, people.len());
                people.push(ViolationPerson {
                    name: record.employee_name.clone(),
                    eid: display_id(&record.employee_name),
                    violations: 1,
                    amount: record.amount,
                    department: record.department,
                    categories: vec![record.category],
                });
            }
        }
    }

    // Stable, so ties keep first-seen order.
    people.sort_by(|a, b| b.violations.cmp(&a.violations));
    people
}

fn clean_roster(records: &[&ExpenseRecord], violators: &[ViolationPerson]) -> Vec<CleanPerson> {
    let violating: HashSet<(&str, DepartmentId)> = violators
        .iter()
        .map(|person| (person.name.as_str(), person.department))
        .collect();
    let mut seen: HashSet<(&str, DepartmentId)> = HashSet::new();

    records
        .iter()
        .map(|record| (record.employee_name.as_str(), record.department))
        .filter(|pair| !violating.contains(pair) && seen.insert(*pair))
        .map(|(name, department)| CleanPerson {
            name: name.to_string(),
            department,
            eid: display_id(name),
        })
        .collect()
}

fn department_ranking(records: &[ExpenseRecord]) -> Vec<DepartmentViolations> {
    let mut counts = [0u32; 7];
    for record in records.iter().filter(|record| record.is_violation) {
        counts[record.department.index()] += 1;
    }

    let mut ranking: Vec<DepartmentViolations> = DepartmentId::ALL
        .into_iter()
        .map(|department| DepartmentViolations {
            department,
            violations: counts[department.index()],
        })
        .collect();
    ranking.sort_by(|a, b| b.violations.cmp(&a.violations));
    ranking
}

fn compliance_rate(total_records: usize, total_violations: usize) -> u32 {
    if total_records == 0 {
        return 0;
    }
    let clean = (total_records - total_violations) as u64;
    let total = total_records as u64;
    // round(100 * clean / total), half up
    ((clean * 200 + total) / (total * 2)) as u32
}

fn average_violation(violators: &[ViolationPerson]) -> Decimal {
    if violators.is_empty() {
        return Decimal::ZERO;
    }
    let total = sum_amounts(violators.iter().map(|person| person.amount));
    (total / Decimal::from(violators.len()))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

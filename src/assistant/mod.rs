//! Keyword-matched question answering over uploaded records.
//!
//! The [`Assistant`] recognizes a handful of question shapes (category
//! spending, audit failures, compliance) by keyword and answers from the
//! records it is given. Anything else gets a help reply.

mod format;

pub use format::format_currency;

use tracing::debug;

use crate::aggregation::process_dashboard_data;
use crate::models::{Category, ExpenseRecord, sum_amounts};

const SPENDING_WORDS: [&str; 4] = ["spending", "cost", "total", "much"];
const FAILURE_WORDS: [&str; 3] = ["didn't pass", "failed", "audit failure"];

/// Category keywords checked in order for spending questions.
const CATEGORY_KEYWORDS: [(Category, &[&str]); 4] = [
    (Category::Hotel, &["hotel"]),
    (Category::CarRental, &["car", "rental"]),
    (Category::Airfare, &["airfare", "flight"]),
    (Category::Meals, &["meal", "food"]),
];

/// The question a message was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Total spending in a category.
    CategorySpending(Category),
    /// Which employees failed the audit.
    AuditFailures,
    /// Overall compliance rate.
    Compliance,
    /// Nothing recognized.
    Help,
}

impl Intent {
    /// Recognizes the intent of a message.
    pub fn detect(message: &str) -> Self {
        let text = message.trim().to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| text.contains(word));

        if mentions(&SPENDING_WORDS) {
            if let Some((category, _)) = CATEGORY_KEYWORDS
                .iter()
                .find(|(_, keywords)| mentions(keywords))
            {
                return Intent::CategorySpending(*category);
            }
        }
        if mentions(&FAILURE_WORDS) && text.contains("audit") {
            return Intent::AuditFailures;
        }
        if text.contains("compliance") {
            return Intent::Compliance;
        }
        Intent::Help
    }
}

/// Answers questions about a record set.
///
/// # Example
///
/// ```
/// use expense_audit::assistant::Assistant;
/// use expense_audit::ingest::parse_csv_content;
///
/// let records = parse_csv_content(
///     "Employee Name,Employee ID,Department,Parent Expense Type,Expense Type,Amount,Violation\n\
///      Alice,E1,IT,Hotel,Room,1200.50,Yes",
/// )
/// .unwrap();
///
/// let reply = Assistant::new().respond(&records, "How much was hotel spending?");
/// assert_eq!(reply, "Based on the uploaded data, the total hotel spending is $1,200.5.");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Assistant;

impl Assistant {
    /// Creates an assistant.
    pub fn new() -> Self {
        Self
    }

    /// Produces a reply to a message.
    pub fn respond(&self, records: &[ExpenseRecord], message: &str) -> String {
        if records.is_empty() {
            return "No expense data is loaded yet. Upload a CSV file and ask me about \
                    spending, violations or audit results."
                .to_string();
        }

        let intent = Intent::detect(message);
        debug!(intent = ?intent, records = records.len(), "Answering assistant message");

        match intent {
            Intent::CategorySpending(category) => {
                let total = sum_amounts(
                    records
                        .iter()
                        .filter(|record| record.category == category)
                        .map(|record| record.amount),
                );
                format!(
                    "Based on the uploaded data, the total {} spending is ${}.",
                    category.label().to_lowercase(),
                    format_currency(total)
                )
            }
            Intent::AuditFailures => {
                let mut violators: Vec<&str> = Vec::new();
                for record in records.iter().filter(|record| record.is_violation) {
                    if !violators.contains(&record.employee_name.as_str()) {
                        violators.push(&record.employee_name);
                    }
                }
                if violators.is_empty() {
                    "Nobody! All employees passed the audit with clean records.".to_string()
                } else {
                    format!(
                        "The following employees didn't pass the audit: {}.",
                        violators.join(", ")
                    )
                }
            }
            Intent::Compliance => {
                let stats = process_dashboard_data(records, None).total_stats;
                format!(
                    "The compliance rate is {}% with {} violation(s) across {} records.",
                    stats.compliance_rate,
                    stats.total_violations,
                    records.len()
                )
            }
            Intent::Help => format!(
                "I understand you're asking about: \"{message}\". I can help you with spending \
                 analysis, violations, audit results, and department data. Try asking about \
                 hotel spending, car rental costs, or who didn't pass the audit!"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DepartmentId;
    use rust_decimal::Decimal;

    fn record(name: &str, category: Category, amount: i64, is_violation: bool) -> ExpenseRecord {
        ExpenseRecord {
            id: format!("1-{}", category.as_str()),
            employee_name: name.to_string(),
            department: DepartmentId::Dept1,
            category,
            amount: Decimal::new(amount, 2),
            is_violation,
            date: "2024-01-01".to_string(),
            description: ExpenseRecord::compose_description("P", "T", name, "IT"),
        }
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            record("Alice", Category::Hotel, 7_000_000, true),
            record("Bob", Category::Hotel, 279_581, false),
            record("Carol", Category::CarRental, 4_837_381, true),
            record("Alice", Category::Meals, 1_000, true),
        ]
    }

    #[test]
    fn test_detect_intents() {
        assert_eq!(
            Intent::detect("What is the total HOTEL cost?"),
            Intent::CategorySpending(Category::Hotel)
        );
        assert_eq!(
            Intent::detect("how much on rentals"),
            Intent::CategorySpending(Category::CarRental)
        );
        assert_eq!(
            Intent::detect("flight spending"),
            Intent::CategorySpending(Category::Airfare)
        );
        assert_eq!(
            Intent::detect("food total"),
            Intent::CategorySpending(Category::Meals)
        );
        assert_eq!(Intent::detect("Who didn't pass the audit?"), Intent::AuditFailures);
        assert_eq!(Intent::detect("who failed"), Intent::Help);
        assert_eq!(Intent::detect("compliance please"), Intent::Compliance);
        assert_eq!(Intent::detect("hotel"), Intent::Help);
    }

    #[test]
    fn test_hotel_checked_before_car() {
        assert_eq!(
            Intent::detect("total for hotel car park"),
            Intent::CategorySpending(Category::Hotel)
        );
    }

    #[test]
    fn test_category_spending_reply() {
        let reply = Assistant::new().respond(&sample(), "How much hotel spending?");
        assert_eq!(
            reply,
            "Based on the uploaded data, the total hotel spending is $72,795.81."
        );

        let reply = Assistant::new().respond(&sample(), "car rental cost");
        assert_eq!(
            reply,
            "Based on the uploaded data, the total car rental spending is $48,373.81."
        );

        let reply = Assistant::new().respond(&sample(), "total airfare");
        assert_eq!(
            reply,
            "Based on the uploaded data, the total airfare spending is $0."
        );
    }

    #[test]
    fn test_category_spending_saturates_huge_totals() {
        let mut huge = record("Alice", Category::Hotel, 0, false);
        huge.amount = Decimal::MAX;
        let reply = Assistant::new().respond(&[huge.clone(), huge], "hotel spending");
        assert_eq!(
            reply,
            "Based on the uploaded data, the total hotel spending is \
             $79,228,162,514,264,337,593,543,950,335."
        );
    }

    #[test]
    fn test_audit_failures_lists_unique_violators() {
        let reply = Assistant::new().respond(&sample(), "Who didn't pass the audit?");
        assert_eq!(reply, "The following employees didn't pass the audit: Alice, Carol.");
    }

    #[test]
    fn test_audit_failures_nobody() {
        let records = vec![record("Bob", Category::Hotel, 100, false)];
        let reply = Assistant::new().respond(&records, "audit failure report");
        assert_eq!(reply, "Nobody! All employees passed the audit with clean records.");
    }

    #[test]
    fn test_compliance_reply() {
        let reply = Assistant::new().respond(&sample(), "What's our compliance?");
        assert_eq!(
            reply,
            "The compliance rate is 25% with 3 violation(s) across 4 records."
        );
    }

    #[test]
    fn test_help_echoes_message() {
        let reply = Assistant::new().respond(&sample(), "Hello there");
        assert!(reply.starts_with("I understand you're asking about: \"Hello there\"."));
    }

    #[test]
    fn test_empty_records() {
        let reply = Assistant::new().respond(&[], "hotel spending");
        assert!(reply.starts_with("No expense data is loaded yet."));
    }
}

//! Expense category model.
//!
//! This module defines the closed set of six spending categories every
//! expense record is classified into.

use serde::{Deserialize, Serialize};

/// The kind of travel expense.
///
/// Variants are declared in chart order, which is also the order
/// [`Category::ALL`] iterates and the order category totals are emitted in.
/// Classification priority is a separate concern handled by
/// [`crate::classification::classify_category`].
///
/// # Example
///
/// ```
/// use expense_audit::models::Category;
///
/// assert_eq!(Category::CarRental.as_str(), "CAR_RENTAL");
/// assert_eq!(Category::CarRental.label(), "CAR RENTAL");
/// assert_eq!(serde_json::to_string(&Category::PastDue).unwrap(), "\"PAST_DUE\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Hotels and other lodging.
    Hotel,
    /// Air travel.
    Airfare,
    /// Car rental and ground transport.
    CarRental,
    /// Meals and dining.
    Meals,
    /// Miscellaneous, personal and non-reimbursable items. Also the fallback.
    Exceptions,
    /// Overdue and outstanding items.
    PastDue,
}

impl Category {
    /// All categories in chart order.
    pub const ALL: [Category; 6] = [
        Category::Hotel,
        Category::Airfare,
        Category::CarRental,
        Category::Meals,
        Category::Exceptions,
        Category::PastDue,
    ];

    /// Machine code, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotel => "HOTEL",
            Category::Airfare => "AIRFARE",
            Category::CarRental => "CAR_RENTAL",
            Category::Meals => "MEALS",
            Category::Exceptions => "EXCEPTIONS",
            Category::PastDue => "PAST_DUE",
        }
    }

    /// Human-readable label used in reports and assistant replies.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Hotel => "HOTEL",
            Category::Airfare => "AIRFARE",
            Category::CarRental => "CAR RENTAL",
            Category::Meals => "MEALS",
            Category::Exceptions => "EXCEPTIONS",
            Category::PastDue => "PAST DUE",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

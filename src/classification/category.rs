//! Expense category classification.
//!
//! Maps a free-text expense type label onto one of the six fixed
//! [`Category`] values using ordered keyword groups.

use crate::models::Category;

/// A keyword group: matches if any keyword is contained in the text, or if
/// every keyword of any combination is contained in it.
struct KeywordGroup {
    category: Category,
    any: &'static [&'static str],
    all_of: &'static [&'static [&'static str]],
}

impl KeywordGroup {
    fn matches(&self, text: &str) -> bool {
        self.any.iter().any(|keyword| text.contains(keyword))
            || self
                .all_of
                .iter()
                .any(|combo| combo.iter().all(|keyword| text.contains(keyword)))
    }
}

/// Keyword groups in priority order; the first match wins.
const KEYWORD_GROUPS: [KeywordGroup; 6] = [
    KeywordGroup {
        category: Category::Hotel,
        any: &[
            "hotel",
            "hospitality",
            "lodging",
            "accommodation",
            "motel",
            "resort",
        ],
        all_of: &[],
    },
    KeywordGroup {
        category: Category::CarRental,
        any: &["car", "rental", "vehicle", "auto"],
        all_of: &[&["transportation", "ground"]],
    },
    KeywordGroup {
        category: Category::Airfare,
        any: &["airfare", "air", "flight", "airline", "aviation"],
        all_of: &[&["travel", "air"]],
    },
    KeywordGroup {
        category: Category::Meals,
        any: &[
            "meal",
            "food",
            "dining",
            "restaurant",
            "breakfast",
            "lunch",
            "dinner",
            "catering",
            "refreshment",
        ],
        all_of: &[],
    },
    KeywordGroup {
        category: Category::Exceptions,
        any: &["exception", "misc", "other", "personal", "non-reimbursable"],
        all_of: &[],
    },
    KeywordGroup {
        category: Category::PastDue,
        any: &["past", "due", "overdue", "late", "outstanding"],
        all_of: &[],
    },
];

/// Classifies an expense type label.
///
/// The text is lower-cased and trimmed, then tested against the keyword
/// groups in priority order: hotel, car rental, airfare, meals,
/// exceptions, past due. Unmatched text falls back to
/// [`Category::Exceptions`]. This function never fails.
///
/// # Example
///
/// ```
/// use expense_audit::classification::classify_category;
/// use expense_audit::models::Category;
///
/// assert_eq!(classify_category("Hotel & Lodging"), Category::Hotel);
/// assert_eq!(classify_category("Ground Transportation"), Category::CarRental);
/// assert_eq!(classify_category("Something else"), Category::Exceptions);
/// ```
pub fn classify_category(expense_type: &str) -> Category {
    let text = expense_type.trim().to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|group| group.matches(&text))
        .map(|group| group.category)
        .unwrap_or(Category::Exceptions)
}

//! Currency formatting for assistant replies.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with thousands separators and at most two decimals.
///
/// Trailing zero decimals are dropped.
///
/// # Example
///
/// ```
/// use expense_audit::assistant::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(7_279_581, 2)), "72,795.81");
/// assert_eq!(format_currency(Decimal::new(200, 0)), "200");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let text = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

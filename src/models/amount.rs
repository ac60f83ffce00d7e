//! Monetary accumulation.

use rust_decimal::Decimal;

/// Sums amounts, saturating at [`Decimal::MAX`] / [`Decimal::MIN`] where
/// `Decimal` addition would overflow.
///
/// # Example
///
/// ```
/// use expense_audit::models::sum_amounts;
/// use rust_decimal::Decimal;
///
/// assert_eq!(sum_amounts([Decimal::new(150, 2), Decimal::new(250, 2)]), Decimal::new(4, 0));
/// assert_eq!(sum_amounts([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
/// ```
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

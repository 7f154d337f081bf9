//! Month-column sequence

use crate::app::models::Period;

/// Every month from `from` to `to`, both inclusive
///
/// Empty when `from` is after `to`.
pub fn month_range(from: Period, to: Period) -> Vec<Period> {
    let mut months = Vec::new();
    let mut current = from;
    while current <= to {
        months.push(current);
        current = current.next();
    }
    months
}

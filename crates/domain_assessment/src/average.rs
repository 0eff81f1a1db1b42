//! Weighted average computation
//!
//! Every grade is first normalized onto the 20-point scale, then combined
//! using its weight. Two situations yield no average at all rather than a
//! misleading zero: no grades on record, and a grade set whose weights sum
//! to zero.

use rust_decimal::Decimal;

use crate::grade::Grade;

/// Computes the weighted average of a set of grades on the 20-point scale
///
/// # Returns
/// The average rounded to two decimal places, or `None` when the set is
/// empty or carries no weight.
pub fn weighted_average(grades: &[Grade]) -> Option<Decimal> {
    if grades.is_empty() {
        return None;
    }

    let total_weight: Decimal = grades.iter().map(|g| g.weight).sum();
    if total_weight.is_zero() {
        return None;
    }

    let weighted_sum: Decimal = grades
        .iter()
        .map(|g| g.normalized_on_20() * g.weight)
        .sum();

    Some((weighted_sum / total_weight).round_dp(2))
}

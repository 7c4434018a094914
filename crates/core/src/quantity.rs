//! Quantity helpers.
//!
//! Quantities are real numbers (mL, g, boxes, ...). Floating-point addition is
//! not associative, so sums over a group are taken in a canonical order to make
//! the result independent of the order rows were read in.

/// Sum quantities in ascending `total_cmp` order.
///
/// The result is bit-identical for any permutation of the input.
pub fn canonical_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

/// Clamp a parsed quantity to a non-negative finite value (NaN/inf/negative -> 0).
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

//! Fixed-precision helpers.
//!
//! Every intermediate quantity in the model is rounded to three decimals
//! before it is stored or reused, so stage dates stay reproducible.

/// Number of decimals kept on every rounded quantity.
pub const DECIMALS: i32 = 3;

const SCALE: f64 = 1000.0;

/// Round to three decimals, ties to even on the scaled value.
///
/// Matches numpy's `round(x, 3)`: scale, round half to even, unscale.
pub fn round3(x: f64) -> f64 {
    (x * SCALE).round_ties_even() / SCALE
}

//! Fixed-point monetary values.
//!
//! Values are signed integers counting 1/10000 of the base currency unit, so
//! `$20.00` is stored as `200000`. Display formatting keeps two decimal places
//! and rounds half-to-even on the third decimal place.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of stored units per whole currency unit.
pub const SCALE: i64 = 10_000;

/// Number of fractional digits a value carries.
pub const PRECISION: u32 = 4;

/// The currency marker written in front of formatted values.
pub const CURRENCY: &str = "$";

/// Formats a value for display, with the currency marker: `$20.00`, `$-12.00`.
pub fn format_value(value: i64) -> String {
    format!("{}{}", CURRENCY, format_value_number(value))
}

/// Same as [`format_value`] without the currency marker.
pub fn format_value_number(value: i64) -> String {
    let (negative, whole, hundredths) = split_rounded(value);
    format!(
        "{}{}.{:02}",
        if negative { "-" } else { "" },
        whole,
        hundredths
    )
}

// Splits a value into sign, whole units and rounded hundredths. A value that
// rounds to zero is reported as non-negative.
fn split_rounded(value: i64) -> (bool, u64, u64) {
    let scale = SCALE as u64;
    let magnitude = value.unsigned_abs();
    let mut whole = magnitude / scale;
    let fraction = magnitude % scale;

    // Only the third fractional digit takes part in rounding.
    let mut hundredths = fraction / 100;
    let discarded = fraction / 10 % 10;
    if discarded > 5 || (discarded == 5 && hundredths % 2 == 1) {
        hundredths += 1;
    }
    if hundredths > 99 {
        hundredths = 0;
        whole += 1;
    }

    (value < 0 && (whole != 0 || hundredths != 0), whole, hundredths)
}

/// Converts a value into an exact decimal.
pub fn value_to_decimal(value: i64) -> Decimal {
    Decimal::new(value, PRECISION)
}

/// Converts a decimal into a value, rounding half-to-even to four places.
///
/// Returns `None` if the result does not fit.
pub fn value_from_decimal(decimal: Decimal) -> Option<i64> {
    decimal
        .round_dp_with_strategy(PRECISION, RoundingStrategy::MidpointNearestEven)
        .checked_mul(Decimal::from(SCALE))?
        .to_i64()
}

//! Display formatting for prices and percentage changes.
//!
//! Every figure is shown with exactly [`DISPLAY_DECIMAL_PRECISION`] decimals,
//! rounded half away from zero (`2.675 -> 2.68`, `-2.675 -> -2.68`).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, NOT_AVAILABLE};

/// Round to display precision, half away from zero, and pin the scale so the
/// string form always carries two decimals.
pub fn round_for_display(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    // -0.004 rounds to zero; don't print it as "-0.00"
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(DISPLAY_DECIMAL_PRECISION);
    rounded
}

/// String form with exactly two decimals. Values with 27 or more integer
/// digits cannot carry a scale of 2, so the missing zeros are appended.
fn display_string(value: Decimal) -> String {
    let rounded = round_for_display(value);
    let mut text = rounded.to_string();
    let missing = DISPLAY_DECIMAL_PRECISION.saturating_sub(rounded.scale());
    if missing > 0 {
        if rounded.scale() == 0 {
            text.push('.');
        }
        text.push_str(&"0".repeat(missing as usize));
    }
    text
}

/// `1800.005 -> "1800.01"`, `3 -> "3.00"`.
pub fn format_price(price: Decimal) -> String {
    display_string(price)
}

/// `Some(-1.234) -> "-1.23%"`, `Some(0) -> "0.00%"`, `None -> "N/A"`.
pub fn format_percentage(change: Option<Decimal>) -> String {
    match change {
        Some(value) => format!("{}%", display_string(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

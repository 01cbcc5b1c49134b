//! Production progress of an order.
//!
//! `worked_quantity` may exceed `quantity` (rework), so the percentage is
//! not capped at 100.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Decimal places stored for quantities (`NUMERIC(14,3)`).
pub const QUANTITY_SCALE: u32 = 3;

/// Largest quantity the `NUMERIC(14,3)` columns hold.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 3);

/// Percentage of the ordered quantity already worked, rounded to two decimals.
///
/// Returns zero when nothing was ordered, and saturates at [`Decimal::MAX`]
/// if the ratio does not fit a decimal.
pub fn progress_percent(quantity: Decimal, worked_quantity: Decimal) -> Decimal {
    if quantity.is_zero() {
        return Decimal::ZERO;
    }
    worked_quantity
        .checked_div(quantity)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::MAX, |percent| percent.round_dp(2).normalize())
}

/// Validate a quantity field: non-negative and within the stored precision
/// (at most 11 integer digits and [`QUANTITY_SCALE`] decimals).
pub fn validate_quantity(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must be >= 0, got {value}"
        )));
    }
    if value.normalize().scale() > QUANTITY_SCALE {
        return Err(CoreError::Validation(format!(
            "{field} allows at most {QUANTITY_SCALE} decimal places, got {value}"
        )));
    }
    if value > MAX_QUANTITY {
        return Err(CoreError::Validation(format!(
            "{field} must be <= {MAX_QUANTITY}, got {value}"
        )));
    }
    Ok(())
}

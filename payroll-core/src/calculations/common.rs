//! Common utility functions for payroll calculations.
//!
//! This module provides the rounding and percentage helpers shared by the
//! insurance, tax and net-salary calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to a whole monetary unit using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero, so 2.5 becomes 3 and
/// -2.5 becomes -3.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(1234.4)), dec!(1234));
/// assert_eq!(round_to_unit(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_to_unit(dec!(-1234.5)), dec!(-1235)); // Away from zero
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage (e.g. `8` for 8 %) to `base` without rounding.
pub fn percent_of(
    base: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    base * rate_percent / Decimal::ONE_HUNDRED
}

/// Floors a value at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-5)), dec!(0));
/// assert_eq!(non_negative(dec!(5)), dec!(5));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

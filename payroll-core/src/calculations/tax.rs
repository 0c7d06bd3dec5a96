//! Progressive personal income tax.
//!
//! Tax is accumulated bracket by bracket: the slice of income falling inside
//! each band is taxed at that band's marginal rate. Only the final sum is
//! rounded, so per-band fractions never compound into rounding drift.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::calculate_tax;
//! use payroll_core::TaxBracket;
//!
//! let brackets = vec![
//!     TaxBracket::up_to(dec!(5000000), dec!(0.05)),
//!     TaxBracket::unbounded(dec!(0.10)),
//! ];
//!
//! // 5,000,000 × 5 % + 1,900,000 × 10 %
//! assert_eq!(calculate_tax(dec!(6900000), &brackets), dec!(440000));
//! ```

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::round_to_unit;

/// Calculates the tax owed on `taxable_income` under `brackets`.
///
/// `taxable_income` must already be floored at zero and `brackets` must be a
/// validated schedule (see [`crate::validate_brackets`]); neither is checked
/// here.
pub fn calculate_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let mut remaining = taxable_income;
    let mut previous_limit = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        let amount = match bracket.upper_bound {
            Some(upper_bound) => remaining.min(upper_bound - previous_limit),
            None => remaining,
        };
        if amount <= Decimal::ZERO {
            break;
        }

        tax += amount * bracket.rate;
        remaining -= amount;

        if let Some(upper_bound) = bracket.upper_bound {
            previous_limit = upper_bound;
        }
    }

    round_to_unit(tax)
}

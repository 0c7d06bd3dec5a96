//! Statutory insurance contributions.
//!
//! Social, health and unemployment insurance are each a percentage of the
//! salary, capped at a contribution ceiling. The total is derived from the
//! combined rate and rounded on its own, so it can sit one unit away from the
//! sum of the rounded components. [`InsuranceBreakdown::rounding_discrepancy`]
//! exposes that gap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::InsuranceRates;
use crate::calculations::common::{percent_of, round_to_unit};

/// Insurance withheld from one salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceBreakdown {
    pub social_insurance: Decimal,
    pub health_insurance: Decimal,
    pub unemployment_insurance: Decimal,
    pub total: Decimal,
}

impl InsuranceBreakdown {
    /// Sum of the three independently rounded components.
    pub fn component_sum(&self) -> Decimal {
        self.social_insurance + self.health_insurance + self.unemployment_insurance
    }

    /// `total - component_sum()`; zero unless rounding pulled them apart.
    pub fn rounding_discrepancy(&self) -> Decimal {
        self.total - self.component_sum()
    }
}

/// Calculates insurance on `base_salary`, capped at `cap`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::calculate_insurance;
/// use payroll_core::InsuranceRates;
///
/// let rates = InsuranceRates {
///     social: dec!(8),
///     health: dec!(1.5),
///     unemployment: dec!(1),
/// };
///
/// let insurance = calculate_insurance(dec!(20000000), &rates, dec!(36000000));
///
/// assert_eq!(insurance.total, dec!(2100000));
/// ```
pub fn calculate_insurance(
    base_salary: Decimal,
    rates: &InsuranceRates,
    cap: Decimal,
) -> InsuranceBreakdown {
    let base = base_salary.min(cap);

    InsuranceBreakdown {
        social_insurance: round_to_unit(percent_of(base, rates.social)),
        health_insurance: round_to_unit(percent_of(base, rates.health)),
        unemployment_insurance: round_to_unit(percent_of(base, rates.unemployment)),
        total: round_to_unit(percent_of(base, rates.combined())),
    }
}

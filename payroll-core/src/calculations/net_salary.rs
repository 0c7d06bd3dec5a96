//! Gross-to-net salary calculation.
//!
//! The calculation runs in a fixed order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Insurance on the gross salary, capped at the contribution ceiling |
//! | 2    | Personal deduction + dependents × dependent deduction |
//! | 3    | Taxable income (gross − insurance − deductions, minimum 0) |
//! | 4    | Personal income tax from the progressive brackets |
//! | 5    | Net salary (gross − insurance − tax) |
//!
//! Deductions only shrink the tax base; they are never subtracted from the
//! payout itself.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::calculations::PayrollCalculator;
//! use payroll_core::RatesConfig;
//!
//! let rates = RatesConfig::default();
//! let calculator = PayrollCalculator::new(&rates);
//!
//! let breakdown = calculator.calculate_net_from_gross(dec!(20000000), 0).unwrap();
//!
//! assert_eq!(breakdown.total_insurance, dec!(2100000));
//! assert_eq!(breakdown.taxable_income, dec!(6900000));
//! assert_eq!(breakdown.personal_income_tax, dec!(440000));
//! assert_eq!(breakdown.net_salary, dec!(17460000));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::calculations::insurance::{InsuranceBreakdown, calculate_insurance};
use crate::calculations::tax::calculate_tax;
use crate::{PayrollBreakdown, RatesConfig};

/// Errors raised for inputs the calculation refuses to process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollError {
    /// Gross salary below zero. Rejected rather than clamped.
    #[error("gross salary must not be negative (got {0})")]
    NegativeGrossSalary(Decimal),
}

/// Calculator turning a gross salary into a [`PayrollBreakdown`].
///
/// Borrows a validated [`RatesConfig`]; any number of calculators may share
/// the same configuration concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PayrollCalculator<'a> {
    rates: &'a RatesConfig,
}

impl<'a> PayrollCalculator<'a> {
    pub fn new(rates: &'a RatesConfig) -> Self {
        Self { rates }
    }

    /// Computes insurance, tax and net pay for one salary.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NegativeGrossSalary`] if `gross_salary < 0`.
    pub fn calculate_net_from_gross(
        &self,
        gross_salary: Decimal,
        dependents: u32,
    ) -> Result<PayrollBreakdown, PayrollError> {
        if gross_salary < Decimal::ZERO {
            return Err(PayrollError::NegativeGrossSalary(gross_salary));
        }

        let insurance = self.insurance(gross_salary);

        let personal_deduction = self.rates.personal_deduction();
        let dependent_deduction = self.dependent_deduction(dependents);

        let taxable_income = self.taxable_income(
            gross_salary,
            insurance.total,
            personal_deduction + dependent_deduction,
        );

        let personal_income_tax = calculate_tax(taxable_income, self.rates.brackets());

        let net_salary = self.net_salary(gross_salary, insurance.total, personal_income_tax);

        debug!(
            %gross_salary,
            dependents,
            total_insurance = %insurance.total,
            %taxable_income,
            %personal_income_tax,
            %net_salary,
            "calculated net salary"
        );

        Ok(PayrollBreakdown {
            gross_salary,
            social_insurance: insurance.social_insurance,
            health_insurance: insurance.health_insurance,
            unemployment_insurance: insurance.unemployment_insurance,
            total_insurance: insurance.total,
            personal_deduction,
            dependent_deduction,
            taxable_income,
            personal_income_tax,
            net_salary,
        })
    }

    fn insurance(
        &self,
        gross_salary: Decimal,
    ) -> InsuranceBreakdown {
        calculate_insurance(
            gross_salary,
            self.rates.insurance_rates(),
            self.rates.insurance_cap_base(),
        )
    }

    fn dependent_deduction(
        &self,
        dependents: u32,
    ) -> Decimal {
        Decimal::from(dependents) * self.rates.dependent_deduction()
    }

    fn taxable_income(
        &self,
        gross_salary: Decimal,
        total_insurance: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        non_negative(gross_salary - total_insurance - total_deductions)
    }

    fn net_salary(
        &self,
        gross_salary: Decimal,
        total_insurance: Decimal,
        personal_income_tax: Decimal,
    ) -> Decimal {
        gross_salary - total_insurance - personal_income_tax
    }
}

/// Convenience wrapper around [`PayrollCalculator::calculate_net_from_gross`].
pub fn calculate_net_from_gross(
    gross_salary: Decimal,
    dependents: u32,
    rates: &RatesConfig,
) -> Result<PayrollBreakdown, PayrollError> {
    PayrollCalculator::new(rates).calculate_net_from_gross(gross_salary, dependents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{RawRatesConfig, TaxBracket};

    fn two_bracket_rates() -> RatesConfig {
        RatesConfig::try_from(RawRatesConfig {
            brackets: vec![
                TaxBracket::up_to(dec!(5000000), dec!(0.05)),
                TaxBracket::unbounded(dec!(0.10)),
            ],
            ..RawRatesConfig::default()
        })
        .unwrap()
    }

    // =========================================================================
    // step tests
    // =========================================================================

    #[test]
    fn dependent_deduction_scales_with_count() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);

        assert_eq!(calculator.dependent_deduction(0), dec!(0));
        assert_eq!(calculator.dependent_deduction(3), dec!(13200000));
    }

    #[test]
    fn taxable_income_subtracts_insurance_and_deductions() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);

        let result = calculator.taxable_income(dec!(20000000), dec!(2100000), dec!(11000000));

        assert_eq!(result, dec!(6900000));
    }

    #[test]
    fn taxable_income_is_floored_at_zero() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);

        let result = calculator.taxable_income(dec!(8000000), dec!(840000), dec!(11000000));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // calculate_net_from_gross scenarios
    // =========================================================================

    #[test]
    fn reference_scenario_without_dependents() {
        let rates = two_bracket_rates();

        let result = calculate_net_from_gross(dec!(20000000), 0, &rates);

        assert_eq!(
            result,
            Ok(PayrollBreakdown {
                gross_salary: dec!(20000000),
                social_insurance: dec!(1600000),
                health_insurance: dec!(300000),
                unemployment_insurance: dec!(200000),
                total_insurance: dec!(2100000),
                personal_deduction: dec!(11000000),
                dependent_deduction: dec!(0),
                taxable_income: dec!(6900000),
                personal_income_tax: dec!(440000),
                net_salary: dec!(17460000),
            })
        );
    }

    #[test]
    fn scenario_with_two_dependents() {
        let rates = RatesConfig::default();

        let result = calculate_net_from_gross(dec!(30000000), 2, &rates).unwrap();

        assert_eq!(result.total_insurance, dec!(3150000));
        assert_eq!(result.dependent_deduction, dec!(8800000));
        assert_eq!(result.total_withholding(), dec!(3605000));
        assert_eq!(result.taxable_income, dec!(7050000));
        assert_eq!(result.personal_income_tax, dec!(455000));
        assert_eq!(result.net_salary, dec!(26395000));
    }

    #[test]
    fn scenario_above_insurance_cap() {
        let rates = RatesConfig::default();

        let result = calculate_net_from_gross(dec!(100000000), 0, &rates).unwrap();

        assert_eq!(result.total_insurance, dec!(3780000));
        assert_eq!(result.taxable_income, dec!(85220000));
        assert_eq!(result.personal_income_tax, dec!(19977000));
        assert_eq!(result.net_salary, dec!(76243000));
    }

    #[test]
    fn zero_salary_yields_zero_except_personal_deduction() {
        let rates = RatesConfig::default();

        let result = calculate_net_from_gross(dec!(0), 0, &rates);

        assert_eq!(
            result,
            Ok(PayrollBreakdown {
                gross_salary: dec!(0),
                social_insurance: dec!(0),
                health_insurance: dec!(0),
                unemployment_insurance: dec!(0),
                total_insurance: dec!(0),
                personal_deduction: dec!(11000000),
                dependent_deduction: dec!(0),
                taxable_income: dec!(0),
                personal_income_tax: dec!(0),
                net_salary: dec!(0),
            })
        );
    }

    #[test]
    fn salary_below_deductions_owes_no_tax() {
        let rates = RatesConfig::default();

        let result = calculate_net_from_gross(dec!(10000000), 0, &rates).unwrap();

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.personal_income_tax, dec!(0));
        assert_eq!(result.net_salary, dec!(8950000));
    }

    #[test]
    fn rejects_negative_gross_salary() {
        let rates = RatesConfig::default();

        let result = calculate_net_from_gross(dec!(-1), 0, &rates);

        assert_eq!(result, Err(PayrollError::NegativeGrossSalary(dec!(-1))));
    }

    // =========================================================================
    // property tests
    // =========================================================================

    #[test]
    fn net_salary_is_monotonic_in_gross() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);

        for dependents in [0, 1, 3] {
            let mut previous = dec!(0);
            let mut gross = dec!(0);

            while gross <= dec!(150000000) {
                let net = calculator
                    .calculate_net_from_gross(gross, dependents)
                    .unwrap()
                    .net_salary;
                assert!(net >= previous, "net decreased at gross {gross}");
                previous = net;
                gross += dec!(333333);
            }
        }
    }

    #[test]
    fn insurance_is_constant_above_cap() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);
        let at_cap = calculator
            .calculate_net_from_gross(rates.insurance_cap_base(), 0)
            .unwrap();

        for gross in [dec!(40000000), dec!(90000000), dec!(1000000000)] {
            let result = calculator.calculate_net_from_gross(gross, 0).unwrap();
            assert_eq!(result.total_insurance, at_cap.total_insurance);
        }
    }

    #[test]
    fn dependents_reduce_tax_but_not_insurance() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);

        for gross in [dec!(15000000), dec!(25000000), dec!(60000000)] {
            let mut previous = calculator.calculate_net_from_gross(gross, 0).unwrap();

            for dependents in 1..=5 {
                let current = calculator
                    .calculate_net_from_gross(gross, dependents)
                    .unwrap();
                assert!(current.personal_income_tax <= previous.personal_income_tax);
                assert_eq!(current.total_insurance, previous.total_insurance);
                assert_eq!(current.gross_salary, previous.gross_salary);
                previous = current;
            }
        }
    }

    #[test]
    fn same_inputs_give_same_output() {
        let rates = RatesConfig::default();
        let calculator = PayrollCalculator::new(&rates);

        let first = calculator.calculate_net_from_gross(dec!(27500000), 1);
        let second = calculator.calculate_net_from_gross(dec!(27500000), 1);

        assert_eq!(first, second);
    }
}

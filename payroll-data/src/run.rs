//! Payroll runs over a roster.
//!
//! A run binds one [`RatesConfig`] snapshot and one [`PayPeriod`], computes a
//! [`PayrollRecord`] per roster entry and collects rejected entries instead
//! of aborting. Persisting the records is left to the caller.

use payroll_core::{PayPeriod, PayrollBreakdown, PayrollCalculator, PayrollError, RatesConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::roster::RosterEntry;

/// Why a single roster entry could not be paid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("dependents must be a non-negative count (got {0})")]
    InvalidDependents(i64),

    #[error(transparent)]
    Payroll(#[from] PayrollError),
}

/// Computed payroll for one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub employee_id: String,
    pub pay_period: PayPeriod,
    pub dependents: u32,
    pub breakdown: PayrollBreakdown,
}

/// A roster entry the run rejected.
#[derive(Debug, PartialEq, Eq)]
pub struct RunFailure {
    pub employee_id: String,
    pub error: EntryError,
}

/// Totals across every successful record of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayrollRunSummary {
    pub employees_paid: usize,
    pub employees_failed: usize,
    pub total_gross: Decimal,
    pub total_insurance: Decimal,
    pub total_income_tax: Decimal,
    pub total_net: Decimal,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct PayrollRunOutcome {
    pub records: Vec<PayrollRecord>,
    pub failures: Vec<RunFailure>,
}

/// A run total left the range [`Decimal`] can represent.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{total} overflowed while adding employee {employee_id}")]
pub struct SummaryOverflow {
    pub total: &'static str,
    pub employee_id: String,
}

fn add_to(
    sum: &mut Decimal,
    amount: Decimal,
    total: &'static str,
    employee_id: &str,
) -> Result<(), SummaryOverflow> {
    *sum = sum.checked_add(amount).ok_or_else(|| SummaryOverflow {
        total,
        employee_id: employee_id.to_string(),
    })?;
    Ok(())
}

impl PayrollRunOutcome {
    /// Totals of the successful records.
    ///
    /// Each salary fits a [`Decimal`] on its own, but their sum may not; that
    /// is reported instead of wrapping or panicking.
    pub fn summary(&self) -> Result<PayrollRunSummary, SummaryOverflow> {
        self.records.iter().try_fold(
            PayrollRunSummary {
                employees_failed: self.failures.len(),
                ..PayrollRunSummary::default()
            },
            |mut summary, record| {
                let b = &record.breakdown;
                let id = record.employee_id.as_str();
                summary.employees_paid += 1;
                add_to(&mut summary.total_gross, b.gross_salary, "total gross", id)?;
                add_to(&mut summary.total_insurance, b.total_insurance, "total insurance", id)?;
                add_to(&mut summary.total_income_tax, b.personal_income_tax, "total income tax", id)?;
                add_to(&mut summary.total_net, b.net_salary, "total net", id)?;
                Ok(summary)
            },
        )
    }
}

/// Payroll computation for one pay period.
#[derive(Debug, Clone, Copy)]
pub struct PayrollRun<'a> {
    calculator: PayrollCalculator<'a>,
    pay_period: PayPeriod,
}

impl<'a> PayrollRun<'a> {
    pub fn new(
        rates: &'a RatesConfig,
        pay_period: PayPeriod,
    ) -> Self {
        Self {
            calculator: PayrollCalculator::new(rates),
            pay_period,
        }
    }

    /// Computes the record for a single entry.
    pub fn compute(
        &self,
        entry: &RosterEntry,
    ) -> Result<PayrollRecord, EntryError> {
        let dependents = u32::try_from(entry.dependents)
            .map_err(|_| EntryError::InvalidDependents(entry.dependents))?;

        let breakdown = self
            .calculator
            .calculate_net_from_gross(entry.gross_salary, dependents)?;

        Ok(PayrollRecord {
            employee_id: entry.employee_id.clone(),
            pay_period: self.pay_period,
            dependents,
            breakdown,
        })
    }

    /// Computes every entry, keeping roster order in both output lists.
    pub fn execute(
        &self,
        roster: &[RosterEntry],
    ) -> PayrollRunOutcome {
        let mut outcome = PayrollRunOutcome::default();

        for entry in roster {
            match self.compute(entry) {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    warn!(
                        employee_id = %entry.employee_id,
                        pay_period = %self.pay_period,
                        %error,
                        "rejected roster entry"
                    );
                    outcome.failures.push(RunFailure {
                        employee_id: entry.employee_id.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            pay_period = %self.pay_period,
            paid = outcome.records.len(),
            failed = outcome.failures.len(),
            "payroll run complete"
        );

        outcome
    }
}

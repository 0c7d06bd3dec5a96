//! Plain-text views of engine results for terminal output.

use std::fmt;

use payroll_core::PayrollBreakdown;
use payroll_data::{PayrollRunSummary, RunFailure};
use rust_decimal::Decimal;

use crate::utils::format_amount;

const LABEL_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 16;

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Decimal,
) -> fmt::Result {
    writeln!(
        f,
        "{label:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
        format_amount(value)
    )
}

/// Line-per-field table of one breakdown.
pub struct BreakdownTable<'a>(pub &'a PayrollBreakdown);

impl fmt::Display for BreakdownTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let b = self.0;
        row(f, "Gross salary", b.gross_salary)?;
        row(f, "Social insurance", b.social_insurance)?;
        row(f, "Health insurance", b.health_insurance)?;
        row(f, "Unemployment insurance", b.unemployment_insurance)?;
        row(f, "Total insurance", b.total_insurance)?;
        row(f, "Personal deduction", b.personal_deduction)?;
        row(f, "Dependent deduction", b.dependent_deduction)?;
        row(f, "Taxable income", b.taxable_income)?;
        row(f, "Personal income tax", b.personal_income_tax)?;
        row(f, "Net salary", b.net_salary)
    }
}

/// Totals of a payroll run followed by any rejected entries.
pub struct RunReport<'a> {
    pub summary: &'a PayrollRunSummary,
    pub failures: &'a [RunFailure],
}

impl fmt::Display for RunReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "Employees paid: {}", s.employees_paid)?;
        writeln!(f, "Employees rejected: {}", s.employees_failed)?;
        row(f, "Total gross", s.total_gross)?;
        row(f, "Total insurance", s.total_insurance)?;
        row(f, "Total income tax", s.total_income_tax)?;
        row(f, "Total net", s.total_net)?;

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Rejected entries:")?;
            for failure in self.failures {
                writeln!(f, "  {}: {}", failure.employee_id, failure.error)?;
            }
        }

        Ok(())
    }
}

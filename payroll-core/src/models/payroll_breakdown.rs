use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of converting one gross salary into its net payout.
///
/// Produced fresh by every calculation and owned by the caller, who decides
/// whether and where to persist it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub gross_salary: Decimal,

    // Statutory insurance
    pub social_insurance: Decimal,
    pub health_insurance: Decimal,
    pub unemployment_insurance: Decimal,
    pub total_insurance: Decimal,

    // Allowances reducing the tax base only
    pub personal_deduction: Decimal,
    pub dependent_deduction: Decimal,

    pub taxable_income: Decimal,
    pub personal_income_tax: Decimal,
    pub net_salary: Decimal,
}

impl PayrollBreakdown {
    /// Everything withheld from the gross salary.
    pub fn total_withholding(&self) -> Decimal {
        self.total_insurance + self.personal_income_tax
    }
}

mod pay_period;
mod payroll_breakdown;
mod rates_config;
mod tax_bracket;

pub use pay_period::{PayPeriod, PayPeriodParseError};
pub use payroll_breakdown::PayrollBreakdown;
pub use rates_config::{
    ConfigurationError, InsuranceRates, RatesConfig, RawRatesConfig, validate_brackets,
};
pub use tax_bracket::TaxBracket;

//! Statutory rates used by the payroll engine.
//!
//! [`RatesConfig`] is the validated, immutable snapshot every calculation is
//! bound to. It can only be built from a [`RawRatesConfig`] (the shape read
//! from files and the environment) through [`RatesConfig::try_from`], so a
//! value of this type always satisfies the bracket invariants:
//!
//! - at least one bracket
//! - upper bounds strictly increasing, starting above zero
//! - exactly one unbounded bracket, in last position
//! - every bracket rate within `[0, 1]`
//! - insurance rates, cap and deductions non-negative

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TaxBracket;

/// Errors raised when a rates configuration violates its invariants.
///
/// These are detected once, when the configuration is loaded, and are fatal
/// to any payroll run relying on it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no tax brackets configured")]
    NoBrackets,

    #[error("bracket {index} upper bound {upper_bound} does not exceed previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        upper_bound: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast { index: usize },

    #[error("last bracket must be unbounded")]
    MissingUnboundedBracket,

    #[error("bracket {index} rate {rate} is outside [0, 1]")]
    BracketRateOutOfRange { index: usize, rate: Decimal },

    #[error("{name} must not be negative (got {value})")]
    NegativeValue { name: &'static str, value: Decimal },
}

/// Insurance contribution rates, expressed as percentages (`8` means 8 %).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRates {
    pub social: Decimal,
    pub health: Decimal,
    pub unemployment: Decimal,
}

impl InsuranceRates {
    /// Sum of the three rates, used to derive the insurance total directly.
    pub fn combined(&self) -> Decimal {
        self.social + self.health + self.unemployment
    }
}

/// Unvalidated rates configuration, mirroring the on-disk TOML layout.
///
/// Fields missing from a file fall back to the reference snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRatesConfig {
    pub social_insurance_rate: Decimal,
    pub health_insurance_rate: Decimal,
    pub unemployment_insurance_rate: Decimal,
    pub insurance_cap_base: Decimal,
    pub personal_deduction: Decimal,
    pub dependent_deduction: Decimal,
    pub brackets: Vec<TaxBracket>,
}

impl Default for RawRatesConfig {
    /// The reference statutory snapshot.
    fn default() -> Self {
        let million = |n: i64| Decimal::from(n * 1_000_000);

        Self {
            social_insurance_rate: Decimal::from(8),
            health_insurance_rate: Decimal::new(15, 1),
            unemployment_insurance_rate: Decimal::ONE,
            insurance_cap_base: million(36),
            personal_deduction: million(11),
            dependent_deduction: Decimal::from(4_400_000),
            brackets: vec![
                TaxBracket::up_to(million(5), Decimal::new(5, 2)),
                TaxBracket::up_to(million(10), Decimal::new(10, 2)),
                TaxBracket::up_to(million(18), Decimal::new(15, 2)),
                TaxBracket::up_to(million(32), Decimal::new(20, 2)),
                TaxBracket::up_to(million(52), Decimal::new(25, 2)),
                TaxBracket::up_to(million(80), Decimal::new(30, 2)),
                TaxBracket::unbounded(Decimal::new(35, 2)),
            ],
        }
    }
}

/// Validated, immutable rates configuration.
///
/// Share it by reference (or behind an `Arc`) across any number of
/// concurrent calculations; nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRatesConfig", into = "RawRatesConfig")]
pub struct RatesConfig {
    insurance_rates: InsuranceRates,
    insurance_cap_base: Decimal,
    personal_deduction: Decimal,
    dependent_deduction: Decimal,
    brackets: Vec<TaxBracket>,
}

impl RatesConfig {
    pub fn insurance_rates(&self) -> &InsuranceRates {
        &self.insurance_rates
    }

    pub fn insurance_cap_base(&self) -> Decimal {
        self.insurance_cap_base
    }

    pub fn personal_deduction(&self) -> Decimal {
        self.personal_deduction
    }

    pub fn dependent_deduction(&self) -> Decimal {
        self.dependent_deduction
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    fn from_validated(raw: RawRatesConfig) -> Self {
        Self {
            insurance_rates: InsuranceRates {
                social: raw.social_insurance_rate,
                health: raw.health_insurance_rate,
                unemployment: raw.unemployment_insurance_rate,
            },
            insurance_cap_base: raw.insurance_cap_base,
            personal_deduction: raw.personal_deduction,
            dependent_deduction: raw.dependent_deduction,
            brackets: raw.brackets,
        }
    }

    /// Highest marginal rate in the schedule.
    pub fn max_marginal_rate(&self) -> Decimal {
        self.brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self::from_validated(RawRatesConfig::default())
    }
}

impl TryFrom<RawRatesConfig> for RatesConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawRatesConfig) -> Result<Self, Self::Error> {
        ensure_non_negative("social_insurance_rate", raw.social_insurance_rate)?;
        ensure_non_negative("health_insurance_rate", raw.health_insurance_rate)?;
        ensure_non_negative(
            "unemployment_insurance_rate",
            raw.unemployment_insurance_rate,
        )?;
        ensure_non_negative("insurance_cap_base", raw.insurance_cap_base)?;
        ensure_non_negative("personal_deduction", raw.personal_deduction)?;
        ensure_non_negative("dependent_deduction", raw.dependent_deduction)?;
        validate_brackets(&raw.brackets)?;

        Ok(Self::from_validated(raw))
    }
}

impl From<RatesConfig> for RawRatesConfig {
    fn from(config: RatesConfig) -> Self {
        Self {
            social_insurance_rate: config.insurance_rates.social,
            health_insurance_rate: config.insurance_rates.health,
            unemployment_insurance_rate: config.insurance_rates.unemployment,
            insurance_cap_base: config.insurance_cap_base,
            personal_deduction: config.personal_deduction,
            dependent_deduction: config.dependent_deduction,
            brackets: config.brackets,
        }
    }
}

fn ensure_non_negative(
    name: &'static str,
    value: Decimal,
) -> Result<(), ConfigurationError> {
    if value < Decimal::ZERO {
        return Err(ConfigurationError::NegativeValue { name, value });
    }
    Ok(())
}

/// Checks the bracket schedule against the coverage invariants.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), ConfigurationError> {
    if brackets.is_empty() {
        return Err(ConfigurationError::NoBrackets);
    }

    let last = brackets.len() - 1;
    let mut previous = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(ConfigurationError::BracketRateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }

        match bracket.upper_bound {
            None if index != last => {
                return Err(ConfigurationError::UnboundedBracketNotLast { index });
            }
            None => {}
            Some(_) if index == last => {
                return Err(ConfigurationError::MissingUnboundedBracket);
            }
            Some(upper_bound) => {
                if upper_bound <= previous {
                    return Err(ConfigurationError::NonIncreasingBound {
                        index,
                        upper_bound,
                        previous,
                    });
                }
                previous = upper_bound;
            }
        }
    }

    Ok(())
}

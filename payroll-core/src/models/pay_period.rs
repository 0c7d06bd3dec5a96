use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid pay period '{0}', expected YYYY-MM")]
pub struct PayPeriodParseError(pub String);

/// Calendar month a payroll record belongs to, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

impl PayPeriod {
    pub fn new(
        year: i32,
        month: u32,
    ) -> Result<Self, PayPeriodParseError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| PayPeriodParseError(format!("{year:04}-{month:02}")))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

impl FromStr for PayPeriod {
    type Err = PayPeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map_err(|_| PayPeriodParseError(s.to_string()))?;

        // chrono accepts single-digit months; the period format does not.
        if trimmed.len() != 7 {
            return Err(PayPeriodParseError(s.to_string()));
        }

        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = PayPeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_year_month() {
        let period: PayPeriod = "2026-10".parse().unwrap();

        assert_eq!(period.year(), 2026);
        assert_eq!(period.month(), 10);
    }

    #[test]
    fn displays_zero_padded() {
        let period = PayPeriod::new(2026, 3).unwrap();

        assert_eq!(period.to_string(), "2026-03");
    }

    #[test]
    fn rejects_month_out_of_range() {
        let result = "2026-13".parse::<PayPeriod>();

        assert_eq!(result, Err(PayPeriodParseError("2026-13".to_string())));
    }

    #[test]
    fn rejects_unpadded_month() {
        assert!("2026-3".parse::<PayPeriod>().is_err());
    }

    #[test]
    fn rejects_full_date() {
        assert!("2026-10-01".parse::<PayPeriod>().is_err());
    }

    #[test]
    fn new_rejects_invalid_month() {
        assert!(PayPeriod::new(2026, 0).is_err());
    }

    #[test]
    fn first_day_is_start_of_month() {
        let period = PayPeriod::new(2026, 2).unwrap();

        assert_eq!(
            period.first_day(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }
}

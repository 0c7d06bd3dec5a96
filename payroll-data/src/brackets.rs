use std::io::Read;

use payroll_core::{ConfigurationError, TaxBracket, validate_brackets};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::decimal::{deserialize_decimal, deserialize_optional_decimal};

/// Errors that can occur when loading a bracket schedule.
#[derive(Debug, Error)]
pub enum BracketScheduleError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] ConfigurationError),
}

impl From<csv::Error> for BracketScheduleError {
    fn from(err: csv::Error) -> Self {
        BracketScheduleError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket schedule CSV file.
///
/// - `upper_bound`: upper edge of the bracket (empty for the top bracket)
/// - `rate`: the marginal tax rate as a decimal (e.g., 0.05 for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            upper_bound: record.upper_bound,
            rate: record.rate,
        }
    }
}

/// Loader for progressive tax schedules stored as CSV.
///
/// Rows must appear in ascending order of `upper_bound`, ending with a row
/// whose `upper_bound` is empty.
pub struct BracketScheduleLoader;

impl BracketScheduleLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketScheduleError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a complete schedule.
    ///
    /// The returned brackets satisfy the same invariants a
    /// [`payroll_core::RatesConfig`] enforces, so they can replace the
    /// `brackets` of a raw configuration without a surprise at load time.
    pub fn load<R: Read>(reader: R) -> Result<Vec<TaxBracket>, BracketScheduleError> {
        let brackets: Vec<TaxBracket> = Self::parse(reader)?
            .into_iter()
            .map(TaxBracket::from)
            .collect();

        validate_brackets(&brackets)?;
        debug!(count = brackets.len(), "loaded bracket schedule");

        Ok(brackets)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = include_str!("../test-data/brackets.csv");

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "upper_bound,rate\n5000000,0.05";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                upper_bound: Some(dec!(5000000)),
                rate: dec!(0.05),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unbounded_top_bracket() {
        let csv = "upper_bound,rate\n,0.35";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_bound, None);
        assert_eq!(records[0].rate, dec!(0.35));
    }

    #[test]
    fn test_parse_csv_tolerates_whitespace() {
        let csv = "upper_bound , rate\n 5000000 , 0.05 \n  , 0.10";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].upper_bound, None);
    }

    #[test]
    fn test_load_reference_schedule() {
        let brackets = BracketScheduleLoader::load(TEST_CSV.as_bytes()).expect("Failed to load");

        assert_eq!(brackets.len(), 7);
        assert_eq!(brackets[0], TaxBracket::up_to(dec!(5000000), dec!(0.05)));
        assert_eq!(brackets[6], TaxBracket::unbounded(dec!(0.35)));
    }

    #[test]
    fn test_parse_csv_keeps_exact_rate() {
        let csv = "upper_bound,rate\n5000000.000000000000001,0.050000000000000001\n,0.10";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_bound, Some(dec!(5000000.000000000000001)));
        assert_eq!(records[0].rate, dec!(0.050000000000000001));
    }

    #[test]
    fn test_parse_invalid_rate() {
        let csv = "upper_bound,rate\n5000000,five";

        let result = BracketScheduleLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(BracketScheduleError::CsvParse(_))));
    }

    #[test]
    fn test_load_rejects_unsorted_schedule() {
        let csv = "upper_bound,rate\n10000000,0.05\n5000000,0.10\n,0.15";

        let result = BracketScheduleLoader::load(csv.as_bytes());

        assert!(matches!(
            result,
            Err(BracketScheduleError::InvalidSchedule(
                ConfigurationError::NonIncreasingBound { index: 1, .. }
            ))
        ));
    }

    #[test]
    fn test_load_rejects_missing_top_bracket() {
        let csv = "upper_bound,rate\n5000000,0.05\n10000000,0.10";

        let result = BracketScheduleLoader::load(csv.as_bytes());

        assert!(matches!(
            result,
            Err(BracketScheduleError::InvalidSchedule(
                ConfigurationError::MissingUnboundedBracket
            ))
        ));
    }

    #[test]
    fn test_load_rejects_empty_schedule() {
        let result = BracketScheduleLoader::load("upper_bound,rate\n".as_bytes());

        assert!(matches!(
            result,
            Err(BracketScheduleError::InvalidSchedule(ConfigurationError::NoBrackets))
        ));
    }
}

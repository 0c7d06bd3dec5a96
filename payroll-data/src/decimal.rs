//! Serde helpers reading CSV amounts as exact decimals.
//!
//! The csv deserializer infers a numeric type for untyped fields, so a
//! [`Decimal`] deserialized directly goes through `f64` or `u64` first.
//! These helpers read the raw cell text and parse it with
//! [`Decimal::from_str`](std::str::FromStr), keeping every digit and the
//! written scale.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

fn parse_cell<E: serde::de::Error>(cell: &str) -> Result<Decimal, E> {
    cell.trim()
        .parse::<Decimal>()
        .map_err(|e| E::custom(format!("invalid decimal '{}': {e}", cell.trim())))
}

/// Required decimal cell.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_cell(&s)
}

/// Optional decimal cell; an empty cell is `None`.
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_cell(&s).map(Some),
        None => Ok(None),
    }
}

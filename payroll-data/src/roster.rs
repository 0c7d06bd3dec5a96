//! CSV loader for payroll roster data.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column         | Required | Type    | Notes                            |
//! |----------------|----------|---------|----------------------------------|
//! | `employee_id`  | yes      | string  | Must be unique within the file   |
//! | `gross_salary` | yes      | decimal | e.g. `20000000`                  |
//! | `dependents`   | no       | integer | Empty cell means `0`             |
//!
//! Values are kept as recorded: a negative salary or dependent count is not
//! a structural error here, it is rejected per employee when the payroll is
//! run.
//!
//! ### Example
//!
//! ```csv
//! employee_id,gross_salary,dependents
//! EMP-001,20000000,0
//! EMP-002,30000000,2
//! ```
use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::deserialize_decimal;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    employee_id: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    gross_salary: Decimal,
    dependents: Option<i64>,
}

/// One employee's payroll input for a pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub employee_id: String,
    pub gross_salary: Decimal,
    /// As recorded; validated when the payroll is run.
    pub dependents: i64,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading roster CSV data.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The file could not be read.
    #[error("cannot read roster: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An `employee_id` cell was blank. `row` is 1-based (header = row 0).
    #[error("missing employee id on row {row}")]
    MissingEmployeeId { row: usize },

    /// The same employee appears twice in one roster.
    #[error("duplicate employee id '{employee_id}' on row {row}")]
    DuplicateEmployee { employee_id: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
    seen: &mut HashSet<String>,
) -> Result<RosterEntry, RosterError> {
    if row.employee_id.is_empty() {
        return Err(RosterError::MissingEmployeeId { row: row_number });
    }
    if !seen.insert(row.employee_id.clone()) {
        return Err(RosterError::DuplicateEmployee {
            employee_id: row.employee_id,
            row: row_number,
        });
    }

    Ok(RosterEntry {
        employee_id: row.employee_id,
        gross_salary: row.gross_salary,
        dependents: row.dependents.unwrap_or(0),
    })
}

/// Parse roster CSV text and return its entries in file order.
///
/// # Errors
///
/// * [`RosterError::Parse`] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`RosterError::MissingEmployeeId`] / [`RosterError::DuplicateEmployee`]
///   – if an employee cannot be identified unambiguously.
pub fn load_from_str(input: &str) -> Result<Vec<RosterEntry>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let mut seen = HashSet::new();

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1, &mut seen)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<RosterEntry>, RosterError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::run::PayrollRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column names of [`ReportRow`], in field order.
const REPORT_HEADER: [&str; 13] = [
    "employee_id",
    "pay_period",
    "dependents",
    "gross_salary",
    "social_insurance",
    "health_insurance",
    "unemployment_insurance",
    "total_insurance",
    "personal_deduction",
    "dependent_deduction",
    "taxable_income",
    "personal_income_tax",
    "net_salary",
];

/// Flat CSV layout of a [`PayrollRecord`], one column per breakdown field.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    employee_id: &'a str,
    pay_period: String,
    dependents: u32,
    gross_salary: Decimal,
    social_insurance: Decimal,
    health_insurance: Decimal,
    unemployment_insurance: Decimal,
    total_insurance: Decimal,
    personal_deduction: Decimal,
    dependent_deduction: Decimal,
    taxable_income: Decimal,
    personal_income_tax: Decimal,
    net_salary: Decimal,
}

impl<'a> From<&'a PayrollRecord> for ReportRow<'a> {
    fn from(record: &'a PayrollRecord) -> Self {
        let b = &record.breakdown;
        Self {
            employee_id: &record.employee_id,
            pay_period: record.pay_period.to_string(),
            dependents: record.dependents,
            gross_salary: b.gross_salary,
            social_insurance: b.social_insurance,
            health_insurance: b.health_insurance,
            unemployment_insurance: b.unemployment_insurance,
            total_insurance: b.total_insurance,
            personal_deduction: b.personal_deduction,
            dependent_deduction: b.dependent_deduction,
            taxable_income: b.taxable_income,
            personal_income_tax: b.personal_income_tax,
            net_salary: b.net_salary,
        }
    }
}

/// Writes `records` as CSV, header first. The header is written even when
/// there are no records.
pub fn write_report<W: Write>(
    writer: W,
    records: &[PayrollRecord],
) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADER)?;

    for record in records {
        csv_writer.serialize(ReportRow::from(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report into it.
pub fn write_report_to_path(
    path: &Path,
    records: &[PayrollRecord],
) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_report(file, records)
}

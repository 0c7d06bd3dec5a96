use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use payroll_core::config::{read_rates_file, resolve_rates};
use payroll_core::{PayPeriod, PayrollCalculator, RatesConfig, RawRatesConfig};
use payroll_data::{BracketScheduleLoader, PayrollRun, roster, write_report_to_path};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::cli::{Cli, Command};
use crate::render::{BreakdownTable, RunReport};

/// Builds the effective rates: file (or defaults), then the bracket CSV,
/// then `PAYROLL_*` overrides, validated once at the end.
pub fn build_rates(
    rates_file: Option<&Path>,
    brackets_file: Option<&Path>,
) -> Result<RatesConfig> {
    let mut raw = match rates_file {
        Some(path) => read_rates_file(path)
            .with_context(|| format!("Failed to load rates from: {}", path.display()))?,
        None => RawRatesConfig::default(),
    };

    if let Some(path) = brackets_file {
        let file = File::open(path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;
        raw.brackets = BracketScheduleLoader::load(file)
            .with_context(|| format!("Failed to load brackets from: {}", path.display()))?;
        debug!(path = %path.display(), "replaced bracket schedule");
    }

    resolve_rates(raw).context("Invalid rates configuration")
}

/// `payroll net`
pub fn net(
    rates: &RatesConfig,
    gross: Decimal,
    dependents: u32,
) -> Result<String> {
    let breakdown = PayrollCalculator::new(rates)
        .calculate_net_from_gross(gross, dependents)
        .context("Cannot compute net salary")?;

    Ok(BreakdownTable(&breakdown).to_string())
}

/// `payroll run`
pub fn run(
    rates: &RatesConfig,
    roster_path: &Path,
    period: PayPeriod,
    output: Option<&Path>,
    strict: bool,
) -> Result<String> {
    let entries = roster::load_from_file(roster_path)
        .with_context(|| format!("Failed to load roster: {}", roster_path.display()))?;
    info!(entries = entries.len(), path = %roster_path.display(), "loaded roster");

    let outcome = PayrollRun::new(rates, period).execute(&entries);

    if strict && !outcome.failures.is_empty() {
        bail!(
            "{} of {} roster entries rejected for {period}",
            outcome.failures.len(),
            entries.len()
        );
    }

    if let Some(path) = output {
        write_report_to_path(path, &outcome.records)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        info!(records = outcome.records.len(), path = %path.display(), "wrote payroll report");
    }

    let summary = outcome
        .summary()
        .with_context(|| format!("Cannot total payroll for {period}"))?;
    Ok(RunReport {
        summary: &summary,
        failures: &outcome.failures,
    }
    .to_string())
}

/// `payroll rates`
pub fn show_rates(rates: &RatesConfig) -> Result<String> {
    toml::to_string_pretty(&RawRatesConfig::from(rates.clone()))
        .context("Failed to render rates configuration")
}

/// Dispatches a parsed command line and returns the text to print.
pub fn execute(cli: &Cli) -> Result<String> {
    let rates = build_rates(cli.rates.as_deref(), cli.brackets.as_deref())?;

    match &cli.command {
        Command::Net { gross, dependents } => net(&rates, *gross, *dependents),
        Command::Run {
            roster,
            period,
            output,
            strict,
        } => run(&rates, roster, *period, output.as_deref(), *strict),
        Command::Rates => show_rates(&rates),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use payroll_core::config::parse_rates_toml;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // build_rates tests
    // =========================================================================

    #[test]
    fn bracket_csv_replaces_file_brackets() {
        let rates_file = write_temp("personal_deduction = 15500000\n");
        let brackets_file = write_temp("upper_bound,rate\n,0.10\n");

        let rates = build_rates(Some(rates_file.path()), Some(brackets_file.path())).unwrap();

        assert_eq!(rates.personal_deduction(), dec!(15500000));
        assert_eq!(rates.brackets().len(), 1);
    }

    #[test]
    fn invalid_bracket_csv_is_reported() {
        let brackets_file = write_temp("upper_bound,rate\n5000000,0.05\n");

        let result = build_rates(None, Some(brackets_file.path()));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to load brackets"), "{message}");
        assert!(message.contains("last bracket must be unbounded"), "{message}");
    }

    #[test]
    fn invalid_rates_file_is_reported() {
        let rates_file = write_temp("insurance_cap_base = -1\n");

        let result = build_rates(Some(rates_file.path()), None);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("insurance_cap_base must not be negative"), "{message}");
    }

    // =========================================================================
    // command tests
    // =========================================================================

    #[test]
    fn net_renders_breakdown() {
        let output = net(&RatesConfig::default(), dec!(20000000), 0).unwrap();

        assert!(output.contains("17,460,000"));
        assert!(output.contains("2,100,000"));
    }

    #[test]
    fn net_rejects_negative_gross() {
        let result = net(&RatesConfig::default(), dec!(-1), 0);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("gross salary must not be negative"), "{message}");
    }

    #[test]
    fn run_writes_report_and_summary() {
        let roster_file = write_temp(
            "employee_id,gross_salary,dependents\nEMP-1,20000000,0\nEMP-2,30000000,2\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let text = run(
            &RatesConfig::default(),
            roster_file.path(),
            PayPeriod::new(2026, 10).unwrap(),
            Some(&output),
            false,
        )
        .unwrap();

        assert!(text.contains("Employees paid: 2"));
        assert_eq!(std::fs::read_to_string(&output).unwrap().lines().count(), 3);
    }

    #[test]
    fn strict_run_fails_on_rejected_entry() {
        let roster_file =
            write_temp("employee_id,gross_salary,dependents\nEMP-1,20000000,0\nEMP-2,-1,0\n");

        let result = run(
            &RatesConfig::default(),
            roster_file.path(),
            PayPeriod::new(2026, 10).unwrap(),
            None,
            true,
        );

        let message = result.unwrap_err().to_string();
        assert_eq!(message, "1 of 2 roster entries rejected for 2026-10");
    }

    #[test]
    fn show_rates_round_trips_through_toml() {
        let text = show_rates(&RatesConfig::default()).unwrap();

        let raw = parse_rates_toml(&text).unwrap();
        assert_eq!(RatesConfig::try_from(raw).unwrap(), RatesConfig::default());
    }
}

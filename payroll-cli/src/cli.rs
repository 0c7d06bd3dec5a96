use std::path::PathBuf;

use clap::{Parser, Subcommand};
use payroll_core::PayPeriod;
use rust_decimal::Decimal;

use crate::utils::parse_amount;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gross-to-net payroll calculator.
///
/// Rates come from the built-in reference snapshot unless a TOML file is
/// given; `PAYROLL_*` environment variables override either source.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about)]
pub struct Cli {
    /// TOML file with insurance rates, cap, deductions and brackets.
    #[arg(long, global = true)]
    pub rates: Option<PathBuf>,

    /// CSV bracket schedule (`upper_bound,rate`) replacing the configured brackets.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Break one gross salary down into insurance, tax and net pay.
    Net {
        /// Gross salary for the period (thousands separators allowed).
        #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
        gross: Decimal,

        /// Number of declared dependents.
        #[arg(long, default_value_t = 0)]
        dependents: u32,
    },

    /// Compute payroll for every employee in a roster CSV.
    Run {
        /// Roster CSV with `employee_id,gross_salary,dependents` columns.
        #[arg(long)]
        roster: PathBuf,

        /// Pay period as YYYY-MM.
        #[arg(long)]
        period: PayPeriod,

        /// Write the computed records to this CSV file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail if any roster entry is rejected.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Print the effective rates configuration as TOML.
    Rates,
}

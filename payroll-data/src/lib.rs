//! Data sources and sinks around the payroll engine.
//!
//! - [`brackets`]: progressive tax schedules stored as CSV
//! - [`roster`]: per-employee payroll inputs stored as CSV
//! - [`run`]: computing a whole roster for one pay period
//! - [`report`]: writing computed records back out as CSV

pub mod brackets;
mod decimal;
pub mod report;
pub mod roster;
pub mod run;

pub use brackets::{BracketRecord, BracketScheduleError, BracketScheduleLoader};
pub use report::{ReportError, write_report, write_report_to_path};
pub use roster::{RosterEntry, RosterError};
pub use run::{
    EntryError, PayrollRecord, PayrollRun, PayrollRunOutcome, PayrollRunSummary, RunFailure,
    SummaryOverflow,
};

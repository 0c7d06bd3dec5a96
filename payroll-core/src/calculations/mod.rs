//! Payroll calculation modules.
//!
//! This module provides the statutory insurance, progressive income tax and
//! gross-to-net calculations, plus the rounding helpers they share.

pub mod common;
pub mod insurance;
pub mod net_salary;
pub mod tax;

pub use insurance::{InsuranceBreakdown, calculate_insurance};
pub use net_salary::{PayrollCalculator, PayrollError, calculate_net_from_gross};
pub use tax::calculate_tax;

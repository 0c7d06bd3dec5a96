pub mod calculations;
pub mod config;
pub mod models;

pub use calculations::{
    InsuranceBreakdown, PayrollCalculator, PayrollError, calculate_insurance,
    calculate_net_from_gross, calculate_tax,
};
pub use config::{ConfigLoadError, SharedRates};
pub use models::*;

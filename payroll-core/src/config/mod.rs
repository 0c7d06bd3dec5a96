//! Rates configuration sources.
//!
//! The effective [`RatesConfig`](crate::RatesConfig) is built in layers:
//!
//! | Layer       | Source |
//! |-------------|--------|
//! | defaults    | [`RawRatesConfig::default`](crate::RawRatesConfig) |
//! | file        | TOML document, see [`read_rates_file`] |
//! | environment | `PAYROLL_*` variables, see [`apply_env_overrides`] |
//!
//! Validation runs once, after the last layer, and [`SharedRates`] holds the
//! result for concurrent readers.

pub mod loader;
pub mod shared;

pub use loader::{
    ConfigLoadError, ENV_DEPENDENT_DEDUCTION, ENV_HEALTH_INSURANCE_RATE, ENV_INSURANCE_CAP_BASE,
    ENV_PERSONAL_DEDUCTION, ENV_SOCIAL_INSURANCE_RATE, ENV_UNEMPLOYMENT_INSURANCE_RATE,
    apply_env_overrides, load_rates, parse_rates_toml, read_rates_file, resolve_rates,
};
pub use shared::SharedRates;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ConfigurationError, RatesConfig, RawRatesConfig};

/// Errors that can occur while loading a rates configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read rates file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse rates file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidOverride { name: &'static str, value: String },

    #[error("invalid rates configuration: {0}")]
    Invalid(#[from] ConfigurationError),
}

pub const ENV_SOCIAL_INSURANCE_RATE: &str = "PAYROLL_SOCIAL_INSURANCE_RATE";
pub const ENV_HEALTH_INSURANCE_RATE: &str = "PAYROLL_HEALTH_INSURANCE_RATE";
pub const ENV_UNEMPLOYMENT_INSURANCE_RATE: &str = "PAYROLL_UNEMPLOYMENT_INSURANCE_RATE";
pub const ENV_INSURANCE_CAP_BASE: &str = "PAYROLL_INSURANCE_CAP_BASE";
pub const ENV_PERSONAL_DEDUCTION: &str = "PAYROLL_PERSONAL_DEDUCTION";
pub const ENV_DEPENDENT_DEDUCTION: &str = "PAYROLL_DEPENDENT_DEDUCTION";

/// Parses a TOML rates document. Missing fields keep their reference values.
///
/// ```
/// use payroll_core::config::parse_rates_toml;
/// use rust_decimal_macros::dec;
///
/// let raw = parse_rates_toml(r#"
/// personal_deduction = 15500000
///
/// [[brackets]]
/// upper_bound = 5000000
/// rate = 0.05
///
/// [[brackets]]
/// rate = 0.10
/// "#).unwrap();
///
/// assert_eq!(raw.personal_deduction, dec!(15500000));
/// assert_eq!(raw.brackets.len(), 2);
/// assert_eq!(raw.brackets[1].upper_bound, None);
/// ```
pub fn parse_rates_toml(content: &str) -> Result<RawRatesConfig, ConfigLoadError> {
    Ok(toml::from_str(content)?)
}

/// Reads and parses a TOML rates file.
pub fn read_rates_file(path: &Path) -> Result<RawRatesConfig, ConfigLoadError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "read rates file");
    parse_rates_toml(&content)
}

/// Applies `PAYROLL_*` overrides from `lookup` on top of `raw`.
///
/// `lookup` is normally `|name| std::env::var(name).ok()`; taking it as a
/// parameter keeps the process environment out of tests.
pub fn apply_env_overrides<F>(
    raw: &mut RawRatesConfig,
    lookup: F,
) -> Result<(), ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let overrides: [(&'static str, &mut Decimal); 6] = [
        (ENV_SOCIAL_INSURANCE_RATE, &mut raw.social_insurance_rate),
        (ENV_HEALTH_INSURANCE_RATE, &mut raw.health_insurance_rate),
        (
            ENV_UNEMPLOYMENT_INSURANCE_RATE,
            &mut raw.unemployment_insurance_rate,
        ),
        (ENV_INSURANCE_CAP_BASE, &mut raw.insurance_cap_base),
        (ENV_PERSONAL_DEDUCTION, &mut raw.personal_deduction),
        (ENV_DEPENDENT_DEDUCTION, &mut raw.dependent_deduction),
    ];

    for (name, field) in overrides {
        if let Some(value) = lookup(name) {
            *field = Decimal::from_str(value.trim())
                .map_err(|_| ConfigLoadError::InvalidOverride { name, value })?;
            debug!(variable = name, value = %field, "applied rates override");
        }
    }

    Ok(())
}

/// Applies the process environment to `raw` and validates the result.
pub fn resolve_rates(mut raw: RawRatesConfig) -> Result<RatesConfig, ConfigLoadError> {
    apply_env_overrides(&mut raw, |name| std::env::var(name).ok())?;
    Ok(RatesConfig::try_from(raw)?)
}

/// Loads the effective rates configuration.
///
/// Starts from `path` when given (otherwise from the reference snapshot),
/// layers the process environment on top, then validates the result.
pub fn load_rates(path: Option<&Path>) -> Result<RatesConfig, ConfigLoadError> {
    let raw = match path {
        Some(path) => read_rates_file(path)?,
        None => RawRatesConfig::default(),
    };

    let config = resolve_rates(raw)?;
    info!(
        source = path.map(|p| p.display().to_string()).unwrap_or_else(|| "defaults".to_string()),
        brackets = config.brackets().len(),
        "loaded rates configuration"
    );
    Ok(config)
}

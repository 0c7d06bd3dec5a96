use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// thousands separators (`,` and `_`).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace([',', '_'], "")
}

/// Parses a monetary amount such as `"20,000,000"` or `"20000000"`.
///
/// Used as the clap value parser for amount arguments.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    normalize_amount_input(s)
        .parse()
        .map_err(|source| ParseAmountError {
            input: s.to_string(),
            source,
        })
}

/// Formats an amount with `,` between groups of three integer digits.
pub fn format_amount(value: Decimal) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

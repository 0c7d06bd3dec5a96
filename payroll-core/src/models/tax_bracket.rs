use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a progressive income-tax schedule.
///
/// A bracket only stores its upper edge; its lower edge is the upper edge of
/// the bracket before it (or zero for the first one). `upper_bound` is `None`
/// for the top bracket, which extends to infinity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (e.g. `0.05` for 5 %).
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn up_to(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

// Currency rates relative to a base currency, and the cross rates derived from them
use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ProcessingError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrencyRateTable {
    #[serde(rename = "base")]
    base_currency: String,
    rates: HashMap<String, f64>,
}

impl CurrencyRateTable {
    pub fn new(base_currency: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self {
            base_currency: base_currency.into(),
            rates,
        }
    }

    /// Loads a `{ "base": .., "rates": { code: rate } }` document.
    pub fn from_json(json: &str) -> Result<Self, ProcessingError> {
        serde_json::from_str(json).map_err(|e| ProcessingError::JsonParseError(e.to_string()))
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// A stored rate that is zero or negative counts as no rate at all.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied().filter(|rate| *rate > 0.0)
    }

    /// Cross rate for converting an amount in `from_code` into `to_code`.
    ///
    /// Only the two requested currencies are checked. If the base currency
    /// itself has no rate the result is NaN rather than `None`.
    pub fn converted_rate(&self, from_code: &str, to_code: &str) -> Option<f64> {
        let from = self.rate(from_code)?;
        let to = self.rate(to_code)?;
        let base = self.rate(&self.base_currency).unwrap_or(f64::NAN);
        Some(base / from * to)
    }
}

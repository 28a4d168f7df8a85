// Defaults applied to unset request fields, and pipeline-wide settings
use serde::Deserialize;

/// Values used when the inbound request leaves a field unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub language_code: String,
    pub options_quota: u32,
    pub allowed_hotel_count: i64,
    pub allowed_room_count: u32,
    pub allowed_room_guest_count: u32,
    pub allowed_child_count_per_room: u32,
    pub currency: String,
    pub nationality: String,
    pub markets: Vec<String>,
    pub markup: f64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            language_code: "en".to_string(),
            options_quota: 20,
            allowed_hotel_count: 20,
            allowed_room_count: 1,
            allowed_room_guest_count: 1,
            allowed_child_count_per_room: 0,
            currency: "EUR".to_string(),
            nationality: "US".to_string(),
            markets: vec!["ES".to_string()],
            markup: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub defaults: RequestDefaults,
    // Decimal places kept by the ceiling rounding of selling prices
    pub price_decimals: u32,
    // Market reported for offers that carry none
    pub default_market: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            defaults: RequestDefaults::default(),
            price_decimals: 2,
            default_market: "ES".to_string(),
        }
    }
}

impl ProcessorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// Output records for priced offers, and their JSON rendering
use serde::Serialize;

use crate::catalog::{RoomOffer, RoomPrice};
use crate::error::ProcessingError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferRecord {
    pub id: Option<String>,
    #[serde(rename = "hotelCodeSupplier")]
    pub hotel_code_supplier: Option<String>,
    pub market: String,
    pub price: PriceRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    #[serde(rename = "minimumSellingPrice")]
    pub minimum_selling_price: Option<f64>,
    pub currency: Option<String>,
    pub net: Option<f64>,
    pub selling_price: Option<f64>,
    pub selling_currency: Option<String>,
    pub markup: f64,
    pub exchange_rate: Option<f64>,
}

impl From<&RoomPrice> for PriceRecord {
    fn from(price: &RoomPrice) -> Self {
        Self {
            minimum_selling_price: price.minimum_selling_price(),
            currency: price.currency().map(str::to_string),
            net: price.net(),
            selling_price: price.selling_price(),
            selling_currency: price.selling_currency().map(str::to_string),
            markup: price.markup(),
            // A NaN cross rate is reported the same way as a missing one
            exchange_rate: price.exchange_rate().filter(|rate| rate.is_finite()),
        }
    }
}

impl From<&RoomOffer> for OfferRecord {
    fn from(offer: &RoomOffer) -> Self {
        Self {
            id: offer.id().map(str::to_string),
            hotel_code_supplier: offer.hotel_code_supplier().map(str::to_string),
            market: offer.market().to_string(),
            price: PriceRecord::from(offer.price()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseAssembler;

impl ResponseAssembler {
    pub fn new() -> Self {
        Self
    }

    /// One record per offer, order preserved.
    pub fn assemble<'o>(&self, offers: impl IntoIterator<Item = &'o RoomOffer>) -> Vec<OfferRecord> {
        offers.into_iter().map(OfferRecord::from).collect()
    }

    pub fn render_json(&self, records: &[OfferRecord]) -> Result<String, ProcessingError> {
        serde_json::to_string(records).map_err(|e| ProcessingError::ConversionError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProcessorConfig, RequestDefaults};
    use crate::rates::CurrencyRateTable;
    use crate::request::{BookingRequest, RawRequest};
    use crate::supplier::{SupplierOffer, SupplierPrice};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::HashMap;

    fn priced_offer(id: &str, currency: &str) -> RoomOffer {
        let raw = RawRequest {
            currency: Some("USD".to_string()),
            markup: Some("0".to_string()),
            ..RawRequest::default()
        };
        let request = BookingRequest::from_raw(
            raw,
            &RequestDefaults::default(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );
        let rates = CurrencyRateTable::new(
            "EUR",
            HashMap::from([("EUR".to_string(), 1.0), ("USD".to_string(), 2.0)]),
        );
        let offer = SupplierOffer {
            id: Some(id.to_string()),
            hotel_code_supplier: Some("100".to_string()),
            market: Some("GB".to_string()),
            price: Some(SupplierPrice {
                minimum_selling_price: None,
                currency: Some(currency.to_string()),
                net: Some(10.0),
                selling_currency: None,
            }),
        };
        RoomOffer::new(offer, &request, &rates, &ProcessorConfig::default())
    }

    #[test]
    fn test_assemble_keeps_order() {
        let offers = vec![priced_offer("b", "EUR"), priced_offer("a", "EUR")];
        let records = ResponseAssembler::new().assemble(&offers);

        let ids: Vec<_> = records.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("b"), Some("a")]);
    }

    #[test]
    fn test_render_json_field_names() {
        let offers = vec![priced_offer("r1", "EUR")];
        let assembler = ResponseAssembler::new();
        let json_text = assembler.render_json(&assembler.assemble(&offers)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json_text).unwrap();

        assert_eq!(
            value,
            json!([{
                "id": "r1",
                "hotelCodeSupplier": "100",
                "market": "GB",
                "price": {
                    "minimumSellingPrice": null,
                    "currency": "EUR",
                    "net": 10.0,
                    "selling_price": 20.0,
                    "selling_currency": "USD",
                    "markup": 0.0,
                    "exchange_rate": 2.0
                }
            }])
        );
    }

    #[test]
    fn test_unknown_currency_renders_null_price() {
        let offers = vec![priced_offer("r1", "JPY")];
        let records = ResponseAssembler::new().assemble(&offers);

        assert_eq!(records[0].price.exchange_rate, None);
        assert_eq!(records[0].price.selling_price, None);
        assert_eq!(records[0].price.selling_currency.as_deref(), Some("USD"));
    }
}

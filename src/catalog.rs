// Room offer catalog: destination filtering and selling price normalization
use tracing::{debug, warn};

use crate::config::ProcessorConfig;
use crate::field::strict_int;
use crate::rates::CurrencyRateTable;
use crate::request::BookingRequest;
use crate::supplier::{SupplierOffer, SupplierPrice};

// Float text keeps this many significant digits before the ceiling is taken
const SIGNIFICANT_DIGITS: usize = 14;

/// Rounds up to `decimals` places: 10.001 becomes 10.01.
///
/// Binary noise is trimmed first, so 1.1 (110.00000000000001 once scaled)
/// stays 1.1 instead of creeping up to 1.11.
pub fn ceiling(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let pow = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    trim_float_noise(value * pow).ceil() / pow
}

fn trim_float_noise(value: f64) -> f64 {
    format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value)
        .parse()
        .unwrap_or(value)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomPrice {
    minimum_selling_price: Option<f64>,
    currency: Option<String>,
    net: Option<f64>,
    exchange_rate: Option<f64>,
    markup: f64,
    selling_price: Option<f64>,
    selling_currency: Option<String>,
}

impl RoomPrice {
    pub fn new(
        raw: SupplierPrice,
        request: &BookingRequest,
        rates: &CurrencyRateTable,
        decimals: u32,
    ) -> Self {
        let markup = request.markup();
        let selling_currency = request.currency();

        // Compared against the payload's own selling_currency, which is
        // normally unset, so the cross rate is taken even for matching codes
        let exchange_rate = if raw.currency != raw.selling_currency {
            match (raw.currency.as_deref(), selling_currency.as_deref()) {
                (Some(from), Some(to)) => rates.converted_rate(from, to),
                _ => None,
            }
        } else {
            Some(1.0)
        };

        if exchange_rate.is_none() {
            warn!(
                currency = ?raw.currency,
                selling_currency = ?selling_currency,
                "no exchange rate available, selling price left empty"
            );
        }

        let net = raw.net.unwrap_or_default();
        let selling_price = exchange_rate
            .map(|rate| ceiling(net * (markup / 100.0 + 1.0) * rate, decimals))
            .filter(|price| price.is_finite());

        Self {
            minimum_selling_price: raw.minimum_selling_price,
            currency: raw.currency,
            net: raw.net,
            exchange_rate,
            markup,
            selling_price,
            selling_currency,
        }
    }

    pub fn minimum_selling_price(&self) -> Option<f64> {
        self.minimum_selling_price
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn net(&self) -> Option<f64> {
        self.net
    }

    pub fn exchange_rate(&self) -> Option<f64> {
        self.exchange_rate
    }

    pub fn markup(&self) -> f64 {
        self.markup
    }

    /// Already rounded; `None` when no usable exchange rate existed.
    pub fn selling_price(&self) -> Option<f64> {
        self.selling_price
    }

    pub fn selling_currency(&self) -> Option<&str> {
        self.selling_currency.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomOffer {
    id: Option<String>,
    hotel_code_supplier: Option<String>,
    market: String,
    price: RoomPrice,
}

impl RoomOffer {
    pub fn new(
        raw: SupplierOffer,
        request: &BookingRequest,
        rates: &CurrencyRateTable,
        config: &ProcessorConfig,
    ) -> Self {
        Self {
            id: raw.id,
            hotel_code_supplier: raw.hotel_code_supplier,
            market: raw
                .market
                .unwrap_or_else(|| config.default_market.clone()),
            price: RoomPrice::new(
                raw.price.unwrap_or_default(),
                request,
                rates,
                config.price_decimals,
            ),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn hotel_code_supplier(&self) -> Option<&str> {
        self.hotel_code_supplier.as_deref()
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn price(&self) -> &RoomPrice {
        &self.price
    }
}

/// Numeric value of a supplier hotel code. Integral spellings such as
/// "100.0" or "1e2" name the same hotel as "100".
fn hotel_code(offer: &SupplierOffer) -> Option<i64> {
    let raw = offer.hotel_code_supplier.as_deref()?;
    strict_int(raw).or_else(|| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && value.fract() == 0.0)
            .filter(|value| value.abs() < i64::MAX as f64)
            .map(|value| value as i64)
    })
}

/// A catalog snapshot priced against one validated request and one rate table.
#[derive(Debug)]
pub struct RoomOfferCatalog<'a> {
    raw_offers: Vec<SupplierOffer>,
    request: &'a BookingRequest,
    rates: &'a CurrencyRateTable,
    config: &'a ProcessorConfig,
}

impl<'a> RoomOfferCatalog<'a> {
    pub fn new(
        raw_offers: Vec<SupplierOffer>,
        request: &'a BookingRequest,
        rates: &'a CurrencyRateTable,
        config: &'a ProcessorConfig,
    ) -> Self {
        Self {
            raw_offers,
            request,
            rates,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.raw_offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_offers.is_empty()
    }

    /// Offers for the requested destinations, priced, in catalog order.
    pub fn available_offers(&self) -> Vec<RoomOffer> {
        let destinations = self.request.avail_destinations();

        let offers: Vec<RoomOffer> = self
            .raw_offers
            .iter()
            .filter(|offer| hotel_code(offer).is_some_and(|code| destinations.contains(&code)))
            .map(|offer| RoomOffer::new(offer.clone(), self.request, self.rates, self.config))
            .collect();

        debug!(
            catalog = self.raw_offers.len(),
            kept = offers.len(),
            "catalog filtered by destination"
        );
        offers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestDefaults;
    use crate::request::RawRequest;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use test_case::test_case;

    fn request(currency: &str, markup: &str, destinations: &[&str], hotel_count: &str) -> BookingRequest {
        let raw = RawRequest {
            username: Some("agent".to_string()),
            password: Some("secret".to_string()),
            company_id: Some("1".to_string()),
            search_type: Some("Multiple".to_string()),
            start_date: Some("18/10/2026".to_string()),
            end_date: Some("21/10/2026".to_string()),
            currency: Some(currency.to_string()),
            markup: Some(markup.to_string()),
            allowed_hotel_count: Some(hotel_count.to_string()),
            avail_destinations: Some(destinations.iter().map(|d| d.to_string()).collect()),
            ..RawRequest::default()
        };
        BookingRequest::from_raw(
            raw,
            &RequestDefaults::default(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    fn rates() -> CurrencyRateTable {
        CurrencyRateTable::new(
            "EUR",
            HashMap::from([
                ("EUR".to_string(), 1.0),
                ("USD".to_string(), 1.25),
                ("GBP".to_string(), 0.8),
            ]),
        )
    }

    fn supplier_price(currency: &str, net: f64) -> SupplierPrice {
        SupplierPrice {
            minimum_selling_price: Some(90.0),
            currency: Some(currency.to_string()),
            net: Some(net),
            selling_currency: None,
        }
    }

    fn offer(id: &str, hotel: &str) -> SupplierOffer {
        SupplierOffer {
            id: Some(id.to_string()),
            hotel_code_supplier: Some(hotel.to_string()),
            market: None,
            price: Some(supplier_price("EUR", 100.0)),
        }
    }

    #[test_case(10.001, 2, 10.01; "rounds up not to nearest")]
    #[test_case(1.1, 2, 1.1; "binary noise ignored")]
    #[test_case(84.82, 2, 84.82; "exact cents kept")]
    #[test_case(19.999, 2, 20.0; "carries into units")]
    #[test_case(2.675, 2, 2.68; "half cent")]
    #[test_case(10.2, 0, 11.0; "no decimals")]
    fn test_ceiling(value: f64, decimals: u32, expected: f64) {
        assert_eq!(ceiling(value, decimals), expected);
    }

    #[test]
    fn test_ceiling_passes_nan_through() {
        assert!(ceiling(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_price_without_markup_or_conversion() {
        let request = request("EUR", "0", &[], "20");
        let raw = SupplierPrice {
            minimum_selling_price: None,
            currency: Some("EUR".to_string()),
            net: Some(10.001),
            selling_currency: Some("EUR".to_string()),
        };

        let price = RoomPrice::new(raw, &request, &rates(), 2);
        assert_eq!(price.exchange_rate(), Some(1.0));
        assert_eq!(price.selling_price(), Some(10.01));
        assert_eq!(price.markup(), 0.0);
    }

    #[test]
    fn test_price_with_markup_and_conversion() {
        let request = request("USD", "10", &[], "20");
        let price = RoomPrice::new(supplier_price("EUR", 100.0), &request, &rates(), 2);

        assert_eq!(price.exchange_rate(), Some(1.25));
        assert_eq!(price.selling_price(), Some(137.5));
        assert_eq!(price.markup(), 10.0);
        assert_eq!(price.selling_currency(), Some("USD"));
        assert_eq!(price.currency(), Some("EUR"));
        assert_eq!(price.net(), Some(100.0));
        assert_eq!(price.minimum_selling_price(), Some(90.0));
    }

    #[test]
    fn test_matching_codes_still_use_cross_rate() {
        let request = request("GBP", "0", &[], "20");
        let table = CurrencyRateTable::new(
            "EUR",
            HashMap::from([("EUR".to_string(), 1.0), ("USD".to_string(), 1.25)]),
        );

        // selling_currency is unset in the payload, so GBP -> GBP goes through
        // the table and fails for lack of a GBP rate
        let price = RoomPrice::new(supplier_price("GBP", 50.0), &request, &table, 2);
        assert_eq!(price.exchange_rate(), None);
        assert_eq!(price.selling_price(), None);
        assert_eq!(price.selling_currency(), Some("GBP"));
    }

    #[test]
    fn test_payload_selling_currency_bypasses_conversion() {
        let request = request("EUR", "0", &[], "20");
        let raw = SupplierPrice {
            selling_currency: Some("USD".to_string()),
            ..supplier_price("USD", 40.0)
        };

        let price = RoomPrice::new(raw, &request, &rates(), 2);
        assert_eq!(price.exchange_rate(), Some(1.0));
        assert_eq!(price.selling_price(), Some(40.0));
        assert_eq!(price.selling_currency(), Some("EUR"));
    }

    #[test]
    fn test_missing_base_rate_leaves_price_empty() {
        let request = request("USD", "0", &[], "20");
        let table = CurrencyRateTable::new(
            "EUR",
            HashMap::from([("USD".to_string(), 1.25), ("GBP".to_string(), 0.8)]),
        );

        let price = RoomPrice::new(supplier_price("GBP", 50.0), &request, &table, 2);
        assert!(price.exchange_rate().unwrap().is_nan());
        assert_eq!(price.selling_price(), None);
    }

    #[test]
    fn test_offer_defaults_market() {
        let request = request("EUR", "0", &[], "20");
        let config = ProcessorConfig::default();

        let room = RoomOffer::new(offer("A", "100"), &request, &rates(), &config);
        assert_eq!(room.market(), "ES");
        assert_eq!(room.id(), Some("A"));
        assert_eq!(room.hotel_code_supplier(), Some("100"));

        let with_market = SupplierOffer {
            market: Some("US".to_string()),
            ..offer("B", "100")
        };
        let room = RoomOffer::new(with_market, &request, &rates(), &config);
        assert_eq!(room.market(), "US");
    }

    #[test]
    fn test_offer_without_price_block() {
        let request = request("EUR", "5", &[], "20");
        let raw = SupplierOffer {
            price: None,
            ..offer("A", "100")
        };

        let room = RoomOffer::new(raw, &request, &rates(), &ProcessorConfig::default());
        assert_eq!(room.price().exchange_rate(), Some(1.0));
        assert_eq!(room.price().selling_price(), Some(0.0));
        assert_eq!(room.price().net(), None);
    }

    #[test]
    fn test_catalog_filters_by_destination_in_catalog_order() {
        let request = request("USD", "0", &["100", "200", "300"], "2");
        let table = rates();
        let config = ProcessorConfig::default();
        let catalog = RoomOfferCatalog::new(
            vec![
                offer("r1", "200"),
                offer("r2", "300"),
                offer("r3", "100"),
                offer("r4", "not-a-code"),
            ],
            &request,
            &table,
            &config,
        );

        assert_eq!(catalog.len(), 4);
        let offers = catalog.available_offers();
        let ids: Vec<&str> = offers.iter().filter_map(RoomOffer::id).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
        assert!(offers
            .iter()
            .all(|offer| offer.price().selling_currency() == Some("USD")));
    }

    #[test_case("100", Some(100); "integer")]
    #[test_case(" 100 ", Some(100); "padded")]
    #[test_case("100.0", Some(100); "integral decimal")]
    #[test_case("1e2", Some(100); "exponent")]
    #[test_case("100.5", None; "fractional")]
    #[test_case("inf", None; "infinite")]
    #[test_case("H100", None; "not numeric")]
    fn test_hotel_code_spellings(raw: &str, expected: Option<i64>) {
        assert_eq!(hotel_code(&offer("r1", raw)), expected);
    }

    #[test]
    fn test_integral_decimal_code_matches_destination() {
        let request = request("EUR", "0", &["100", "200"], "2");
        let table = rates();
        let config = ProcessorConfig::default();
        let catalog = RoomOfferCatalog::new(
            vec![offer("r1", "100.0"), offer("r2", "2e2"), offer("r3", "100.5")],
            &request,
            &table,
            &config,
        );

        let offers = catalog.available_offers();
        let ids: Vec<&str> = offers.iter().filter_map(RoomOffer::id).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn test_empty_destinations_yield_no_offers() {
        let request = request("EUR", "0", &[], "20");
        let table = rates();
        let config = ProcessorConfig::default();
        let catalog = RoomOfferCatalog::new(vec![offer("r1", "100")], &request, &table, &config);

        assert!(!catalog.is_empty());
        assert!(catalog.available_offers().is_empty());
    }
}

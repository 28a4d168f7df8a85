use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// Data structures for the supplier's room offer catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SupplierOffer {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub id: Option<String>,
    #[serde(
        default,
        rename = "hotelCodeSupplier",
        deserialize_with = "optional_scalar"
    )]
    pub hotel_code_supplier: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub price: Option<SupplierPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SupplierPrice {
    #[serde(default, rename = "minimumSellingPrice")]
    pub minimum_selling_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub net: Option<f64>,
    // Usually unset; only consulted by the same-currency check
    #[serde(default)]
    pub selling_currency: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

// Identifiers show up both as JSON strings and as bare numbers
fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
        }),
    )
}

/// Decodes the offer catalog. Anything that is not an array of offers is
/// treated as an empty catalog.
pub fn parse_catalog(json: &str) -> Vec<SupplierOffer> {
    let offers: Result<Vec<SupplierOffer>, _> = match serde_json::from_str::<Value>(json) {
        Ok(value @ Value::Array(_)) => serde_json::from_value(value),
        Ok(_) => {
            warn!("room offer catalog is not an array, treating it as empty");
            return Vec::new();
        }
        Err(e) => Err(e),
    };

    offers.unwrap_or_else(|e| {
        warn!(error = %e, "room offer catalog could not be decoded, treating it as empty");
        Vec::new()
    })
}

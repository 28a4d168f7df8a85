// Main library file for the hotel availability engine

// Request side: wire parsing, field rules, validation
pub mod auth;
pub mod config;
pub mod error;
pub mod field;
pub mod request;
pub mod rooms;
pub mod xml_request;

// Pricing side: rates, catalog, output
pub mod catalog;
pub mod processor;
pub mod rates;
pub mod response;
pub mod supplier;
pub mod xml_response;

// Re-export key types for convenience
pub use auth::AuthCredentials;
pub use catalog::{RoomOffer, RoomOfferCatalog, RoomPrice};
pub use config::{ProcessorConfig, RequestDefaults};
pub use error::{FieldValidationError, ProcessingError};
pub use processor::{AvailabilityProcessor, ProcessingOutcome};
pub use rates::CurrencyRateTable;
pub use request::{BookingRequest, RawRequest, RawRoom};
pub use response::{OfferRecord, PriceRecord, ResponseAssembler};
pub use rooms::{RoomCandidate, RoomPax};
pub use supplier::{SupplierOffer, SupplierPrice};

// Availability processing: validate the request, then filter and price the catalog
use std::io::ErrorKind;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::catalog::RoomOfferCatalog;
use crate::config::ProcessorConfig;
use crate::error::{FieldValidationError, ProcessingError};
use crate::rates::CurrencyRateTable;
use crate::request::BookingRequest;
use crate::response::{OfferRecord, ResponseAssembler};
use crate::supplier::{parse_catalog, SupplierOffer};
use crate::xml_request::parse_request;
use crate::xml_response::render_error_report;

// Sample file paths (the actual files are stored in the samples directory)
pub const SAMPLE_REQUEST_PATH: &str = "samples/avail_request.xml";
pub const SAMPLE_RATES_PATH: &str = "samples/rates.json";
pub const SAMPLE_CATALOG_PATH: &str = "samples/room_offers.json";

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingOutcome {
    /// Every failed rule, in evaluation order. Nothing was priced.
    Rejected(Vec<FieldValidationError>),
    Accepted(Vec<OfferRecord>),
}

impl ProcessingOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ProcessingOutcome::Accepted(_))
    }

    /// XML error report for a rejection, JSON offer list otherwise.
    pub fn render(&self) -> Result<String, ProcessingError> {
        match self {
            ProcessingOutcome::Rejected(errors) => render_error_report(errors),
            ProcessingOutcome::Accepted(records) => ResponseAssembler::new().render_json(records),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityProcessor {
    config: ProcessorConfig,
    reference_date: Option<NaiveDate>,
}

impl AvailabilityProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            config,
            reference_date: None,
        }
    }

    /// Pins the "today" the date rules are measured from.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn build_request(&self, request_xml: &str) -> Result<BookingRequest, ProcessingError> {
        if request_xml.trim().is_empty() {
            return Err(ProcessingError::DataUnavailable(
                "Cannot obtain incoming data.".to_string(),
            ));
        }
        let raw = parse_request(request_xml)?;
        Ok(BookingRequest::from_raw(raw, &self.config.defaults, self.today()))
    }

    /// Filters and prices a catalog for a request that already passed validation.
    pub fn price(
        &self,
        request: &BookingRequest,
        rates: &CurrencyRateTable,
        offers: Vec<SupplierOffer>,
    ) -> Vec<OfferRecord> {
        let catalog = RoomOfferCatalog::new(offers, request, rates, &self.config);
        let priced = catalog.available_offers();
        ResponseAssembler::new().assemble(&priced)
    }

    /// Runs the whole pipeline. The loaders are only called once the request
    /// is known to be valid.
    pub fn process_with<R, C>(
        &self,
        request_xml: &str,
        load_rates: R,
        load_catalog: C,
    ) -> Result<ProcessingOutcome, ProcessingError>
    where
        R: FnOnce() -> Result<CurrencyRateTable, ProcessingError>,
        C: FnOnce() -> Result<Vec<SupplierOffer>, ProcessingError>,
    {
        let request = self.build_request(request_xml)?;

        let errors = request.check_properties();
        if !errors.is_empty() {
            info!(errors = errors.len(), "availability request rejected");
            return Ok(ProcessingOutcome::Rejected(errors));
        }

        let rates = load_rates()?;
        let offers = load_catalog()?;
        debug!(
            base_currency = rates.base_currency(),
            catalog = offers.len(),
            "inputs loaded"
        );

        let records = self.price(&request, &rates, offers);
        info!(offers = records.len(), "availability request processed");
        Ok(ProcessingOutcome::Accepted(records))
    }

    pub fn process(
        &self,
        request_xml: &str,
        rates_json: &str,
        catalog_json: &str,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        self.process_with(
            request_xml,
            || CurrencyRateTable::from_json(rates_json),
            || Ok(parse_catalog(catalog_json)),
        )
    }

    /// Same as [`process`](Self::process), reading each input from disk. A
    /// missing catalog file is treated as an empty catalog.
    pub fn process_files(
        &self,
        request_path: impl AsRef<Path>,
        rates_path: impl AsRef<Path>,
        catalog_path: impl AsRef<Path>,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        let request_xml = read_required(request_path.as_ref(), "Cannot obtain incoming data.")?;
        self.process_with(
            &request_xml,
            || CurrencyRateTable::from_json(&read_required(rates_path.as_ref(), "Cannot get rates.")?),
            || match read_optional(catalog_path.as_ref())? {
                Some(json) => Ok(parse_catalog(&json)),
                None => Ok(Vec::new()),
            },
        )
    }

    // Helper method to load the sample request XML
    pub fn load_sample_request(&self) -> Result<String, ProcessingError> {
        Ok(std::fs::read_to_string(SAMPLE_REQUEST_PATH)?)
    }

    // Helper method to load the sample rate table
    pub fn load_sample_rates(&self) -> Result<CurrencyRateTable, ProcessingError> {
        CurrencyRateTable::from_json(&std::fs::read_to_string(SAMPLE_RATES_PATH)?)
    }

    // Helper method to load the sample offer catalog
    pub fn load_sample_catalog(&self) -> Result<Vec<SupplierOffer>, ProcessingError> {
        Ok(parse_catalog(&std::fs::read_to_string(SAMPLE_CATALOG_PATH)?))
    }
}

fn read_required(path: &Path, unavailable: &str) -> Result<String, ProcessingError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            ProcessingError::DataUnavailable(format!("{} ({})", unavailable, path.display()))
        }
        _ => ProcessingError::IoError(e),
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, ProcessingError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ProcessingError::IoError(e)),
    }
}

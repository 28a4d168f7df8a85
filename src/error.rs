use thiserror::Error;

// One variant per request rule; the message never depends on the offending value
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidationError {
    #[error("The 'languageCode' must be one of: en, fr, de, or es")]
    LanguageCode,

    #[error("'optionsQuota' must be an integer no greater than 50")]
    OptionsQuota,

    #[error("'password', 'username' or 'CompanyID' is missing or incorrect")]
    Auth,

    #[error("'SearchType' must be 'Single' or 'Multiple' ")]
    SearchType,

    #[error("'StartDate' must be at least 2 days after today")]
    StartDate,

    #[error("The stay duration ('EndDate' - 'StartDate') must be at least 3 nights")]
    EndDate,

    #[error("'Currency' must be one of: EUR, USD, or GBP")]
    Currency,

    #[error("'Nationality' must be one of: US, GB, or CA")]
    Nationality,

    #[error("'Markets' must contain one or more of: US, GB, CA, or ES.")]
    Markets,
}

impl FieldValidationError {
    /// Every rule, in the order they are evaluated and reported.
    pub const ALL: [FieldValidationError; 9] = [
        FieldValidationError::LanguageCode,
        FieldValidationError::OptionsQuota,
        FieldValidationError::Auth,
        FieldValidationError::SearchType,
        FieldValidationError::StartDate,
        FieldValidationError::EndDate,
        FieldValidationError::Currency,
        FieldValidationError::Nationality,
        FieldValidationError::Markets,
    ];
}

// Fatal errors: the whole request is abandoned
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("XML parse error: {0}")]
    XmlParseError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(FieldValidationError::LanguageCode, "The 'languageCode' must be one of: en, fr, de, or es"; "language code")]
    #[test_case(FieldValidationError::OptionsQuota, "'optionsQuota' must be an integer no greater than 50"; "options quota")]
    #[test_case(FieldValidationError::Auth, "'password', 'username' or 'CompanyID' is missing or incorrect"; "auth")]
    #[test_case(FieldValidationError::SearchType, "'SearchType' must be 'Single' or 'Multiple' "; "search type")]
    #[test_case(FieldValidationError::StartDate, "'StartDate' must be at least 2 days after today"; "start date")]
    #[test_case(FieldValidationError::EndDate, "The stay duration ('EndDate' - 'StartDate') must be at least 3 nights"; "end date")]
    #[test_case(FieldValidationError::Currency, "'Currency' must be one of: EUR, USD, or GBP"; "currency")]
    #[test_case(FieldValidationError::Nationality, "'Nationality' must be one of: US, GB, or CA"; "nationality")]
    #[test_case(FieldValidationError::Markets, "'Markets' must contain one or more of: US, GB, CA, or ES."; "markets")]
    fn test_messages_are_fixed(error: FieldValidationError, expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_data_unavailable_display() {
        let err = ProcessingError::DataUnavailable("Cannot get rates.".to_string());
        assert_eq!(err.to_string(), "Data unavailable: Cannot get rates.");
    }
}

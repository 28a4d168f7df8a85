use serde::{Deserialize, Serialize};

use crate::error::{FieldValidationError, ProcessingError};

pub const APPLICATION_ERROR_CODE: u32 = 5;

// Structures for XML serialization of a rejected request
#[derive(Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename = "AvailRS")]
pub struct XmlErrorResponse {
    #[serde(rename = "applicationErrors")]
    pub errors: Vec<XmlApplicationError>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XmlApplicationError {
    pub code: u32,
    #[serde(rename = "type")]
    pub error_type: u32,
    pub description: String,
    pub http_status_code: u16,
}

impl From<FieldValidationError> for XmlApplicationError {
    fn from(error: FieldValidationError) -> Self {
        XmlApplicationError {
            code: APPLICATION_ERROR_CODE,
            error_type: APPLICATION_ERROR_CODE,
            description: error.to_string(),
            http_status_code: 0,
        }
    }
}

impl From<&[FieldValidationError]> for XmlErrorResponse {
    fn from(errors: &[FieldValidationError]) -> Self {
        XmlErrorResponse {
            errors: errors.iter().copied().map(XmlApplicationError::from).collect(),
        }
    }
}

pub fn render_error_report(errors: &[FieldValidationError]) -> Result<String, ProcessingError> {
    let response = XmlErrorResponse::from(errors);
    quick_xml::se::to_string(&response).map_err(|e| ProcessingError::ConversionError(e.to_string()))
}

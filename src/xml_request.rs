use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::ProcessingError;
use crate::request::{RawRequest, RawRoom};

// Structures for XML deserialization of the availability request.
// Element names are matched in both PascalCase and camelCase.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename = "AvailRQ")]
pub struct XmlAvailRequest {
    #[serde(alias = "Source")]
    pub source: Option<XmlSource>,
    #[serde(rename = "optionsQuota", alias = "OptionsQuota")]
    pub options_quota: Option<String>,
    #[serde(rename = "Configuration", alias = "configuration")]
    pub configuration: Option<XmlConfiguration>,
    #[serde(rename = "SearchType", alias = "searchType")]
    pub search_type: Option<String>,
    #[serde(rename = "AllowedHotelCount", alias = "allowedHotelCount")]
    pub allowed_hotel_count: Option<String>,
    #[serde(rename = "AllowedRoomCount", alias = "allowedRoomCount")]
    pub allowed_room_count: Option<String>,
    #[serde(rename = "AllowedRoomGuestCount", alias = "allowedRoomGuestCount")]
    pub allowed_room_guest_count: Option<String>,
    #[serde(rename = "AllowedChildCountPerRoom", alias = "allowedChildCountPerRoom")]
    pub allowed_child_count_per_room: Option<String>,
    #[serde(rename = "AvailDestinations", alias = "availDestinations")]
    pub avail_destinations: Option<XmlDestinations>,
    #[serde(rename = "StartDate", alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "EndDate", alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "Currency", alias = "currency")]
    pub currency: Option<String>,
    #[serde(rename = "Nationality", alias = "nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "Markets", alias = "markets")]
    pub markets: Option<XmlMarkets>,
    #[serde(rename = "RoomCandidates", alias = "roomCandidates")]
    pub room_candidates: Option<XmlRoomCandidates>,
    #[serde(rename = "Markup", alias = "markup")]
    pub markup: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlSource {
    #[serde(rename = "languageCode", alias = "LanguageCode")]
    pub language_code: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlConfiguration {
    pub parameters: XmlParameters,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlParameters {
    #[serde(rename = "Parameter")]
    pub parameters: Vec<XmlParameter>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlParameter {
    #[serde(rename = "@password", alias = "@Password")]
    pub password: Option<String>,
    #[serde(rename = "@username", alias = "@Username")]
    pub username: Option<String>,
    #[serde(rename = "@CompanyID", alias = "@companyID")]
    pub company_id: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlDestinations {
    #[serde(rename = "Destination")]
    pub destinations: Vec<XmlDestination>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlDestination {
    #[serde(rename = "@code")]
    pub code: Option<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlMarkets {
    #[serde(rename = "Market")]
    pub markets: Vec<String>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlRoomCandidates {
    #[serde(rename = "RoomCandidate")]
    pub rooms: Vec<XmlRoomCandidate>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlRoomCandidate {
    #[serde(rename = "@id")]
    pub id: String,
    pub paxes: XmlPaxes,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlPaxes {
    #[serde(rename = "Pax")]
    pub paxes: Vec<XmlPax>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct XmlPax {
    #[serde(rename = "@age")]
    pub age: Option<String>,
}

impl From<XmlAvailRequest> for RawRequest {
    fn from(item: XmlAvailRequest) -> Self {
        // Later Parameter elements override earlier ones, attribute by attribute
        let (mut username, mut password, mut company_id) = (None, None, None);
        let parameters = item
            .configuration
            .map(|configuration| configuration.parameters.parameters)
            .unwrap_or_default();
        for parameter in parameters {
            username = parameter.username.or(username);
            password = parameter.password.or(password);
            company_id = parameter.company_id.or(company_id);
        }

        RawRequest {
            language_code: item.source.and_then(|source| source.language_code),
            options_quota: item.options_quota,
            username,
            password,
            company_id,
            search_type: item.search_type,
            allowed_hotel_count: item.allowed_hotel_count,
            allowed_room_count: item.allowed_room_count,
            allowed_room_guest_count: item.allowed_room_guest_count,
            allowed_child_count_per_room: item.allowed_child_count_per_room,
            avail_destinations: item.avail_destinations.map(|block| {
                block
                    .destinations
                    .into_iter()
                    .filter_map(|destination| destination.code)
                    .collect()
            }),
            start_date: item.start_date,
            end_date: item.end_date,
            currency: item.currency,
            nationality: item.nationality,
            markets: item.markets.map(|block| block.markets),
            room_candidates: item.room_candidates.map(|block| {
                block
                    .rooms
                    .into_iter()
                    .map(|room| RawRoom {
                        id: room.id,
                        pax_ages: room.paxes.paxes.into_iter().map(|pax| pax.age).collect(),
                    })
                    .collect()
            }),
            markup: item.markup,
        }
    }
}

pub fn parse_request(xml: &str) -> Result<RawRequest, ProcessingError> {
    let request: XmlAvailRequest =
        from_str(xml).map_err(|e| ProcessingError::XmlParseError(e.to_string()))?;
    Ok(request.into())
}

// A small sample for inline testing
pub const SMALL_SAMPLE_REQUEST: &str = r#"
<AvailRQ xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <timeoutMilliseconds>25000</timeoutMilliseconds>
  <source>
    <languageCode>en</languageCode>
  </source>
  <optionsQuota>20</optionsQuota>
  <Configuration>
    <Parameters>
      <Parameter password="XXXXXXXXXX" username="YYYYYYYYY" CompanyID="123456"/>
    </Parameters>
  </Configuration>
  <SearchType>Multiple</SearchType>
  <AllowedHotelCount>2</AllowedHotelCount>
  <StartDate>14/10/2030</StartDate>
  <EndDate>18/10/2030</EndDate>
  <Currency>USD</Currency>
  <Nationality>US</Nationality>
  <AvailDestinations>
    <Destination type="HOT" code="100"/>
    <Destination type="HOT" code="200"/>
    <Destination type="HOT" code="300"/>
  </AvailDestinations>
  <Markets>
    <Market>ES</Market>
    <Market>gb</Market>
  </Markets>
  <RoomCandidates>
    <RoomCandidate id="1">
      <Paxes>
        <Pax age="30" id="1"/>
        <Pax age="4" id="2"/>
      </Paxes>
    </RoomCandidate>
  </RoomCandidates>
  <Markup>3.2</Markup>
</AvailRQ>
"#;

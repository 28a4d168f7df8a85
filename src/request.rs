// Request validation & normalization
//
// Every accessor applies its own rule: an unset field resolves to its
// default, an invalid one either to "absent" (reported by check_properties)
// or, for the room limits, silently back to the default.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::auth::AuthCredentials;
use crate::config::RequestDefaults;
use crate::error::FieldValidationError;
use crate::field::{leading_int, lenient_float, one_of_ignore_case, strict_int, ValidatedField};
use crate::rooms::{RoomCandidate, RoomPax};

pub const LANGUAGE_CODES: [&str; 4] = ["en", "fr", "de", "es"];
pub const SEARCH_TYPES: [&str; 2] = ["Single", "Multiple"];
pub const CURRENCIES: [&str; 3] = ["EUR", "USD", "GBP"];
pub const NATIONALITIES: [&str; 3] = ["US", "GB", "CA"];
pub const MARKETS: [&str; 4] = ["US", "GB", "CA", "ES"];

pub const MAX_OPTIONS_QUOTA: i64 = 50;
pub const MIN_DAYS_BEFORE_START: u64 = 2;
pub const MIN_STAY_NIGHTS: u64 = 3;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// The request as handed over by the wire parser: plain attribute values,
/// nothing checked yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    pub language_code: Option<String>,
    pub options_quota: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub company_id: Option<String>,
    pub search_type: Option<String>,
    pub allowed_hotel_count: Option<String>,
    pub allowed_room_count: Option<String>,
    pub allowed_room_guest_count: Option<String>,
    pub allowed_child_count_per_room: Option<String>,
    pub avail_destinations: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub currency: Option<String>,
    pub nationality: Option<String>,
    pub markets: Option<Vec<String>>,
    pub room_candidates: Option<Vec<RawRoom>>,
    pub markup: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRoom {
    pub id: String,
    pub pax_ages: Vec<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct BookingRequest {
    language_code: ValidatedField<String>,
    options_quota: ValidatedField<u32>,
    auth: AuthCredentials,
    search_type: ValidatedField<String>,
    allowed_hotel_count: ValidatedField<i64>,
    allowed_room_count: ValidatedField<u32>,
    allowed_room_guest_count: ValidatedField<u32>,
    allowed_child_count_per_room: ValidatedField<u32>,
    avail_destinations: Option<Vec<i64>>,
    start_date: Option<String>,
    end_date: Option<String>,
    currency: ValidatedField<String>,
    nationality: ValidatedField<String>,
    markets: Option<Vec<String>>,
    default_markets: Vec<String>,
    room_candidates: Option<Vec<RoomCandidate>>,
    markup: ValidatedField<f64>,
    today: NaiveDate,
}

fn language_code_rule(raw: &str) -> Option<String> {
    one_of_ignore_case(raw, &LANGUAGE_CODES)
}

fn options_quota_rule(raw: &str) -> Option<u32> {
    strict_int(raw)
        .filter(|quota| (1..=MAX_OPTIONS_QUOTA).contains(quota))
        .and_then(|quota| u32::try_from(quota).ok())
}

fn search_type_rule(raw: &str) -> Option<String> {
    one_of_ignore_case(raw, &SEARCH_TYPES)
}

fn hotel_count_rule(raw: &str) -> Option<i64> {
    Some(leading_int(raw))
}

fn positive_count_rule(raw: &str) -> Option<u32> {
    strict_int(raw)
        .filter(|count| *count > 0)
        .and_then(|count| u32::try_from(count).ok())
}

fn non_negative_count_rule(raw: &str) -> Option<u32> {
    strict_int(raw).and_then(|count| u32::try_from(count).ok())
}

fn currency_rule(raw: &str) -> Option<String> {
    one_of_ignore_case(raw, &CURRENCIES)
}

fn nationality_rule(raw: &str) -> Option<String> {
    one_of_ignore_case(raw, &NATIONALITIES)
}

fn markup_rule(raw: &str) -> Option<f64> {
    Some(lenient_float(raw))
}

/// Parses a `DD/MM/YYYY` date. Other shapes and impossible dates are rejected.
pub fn parse_request_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

impl BookingRequest {
    pub fn from_raw(raw: RawRequest, defaults: &RequestDefaults, today: NaiveDate) -> Self {
        let avail_destinations = raw.avail_destinations.map(|codes| {
            codes
                .iter()
                .filter(|code| !code.trim().is_empty())
                .map(|code| leading_int(code))
                .collect()
        });

        // An empty block is treated the same as no block at all
        let markets = raw.markets.filter(|markets| !markets.is_empty());

        let room_candidates = raw.room_candidates.map(|rooms| {
            let mut candidates: Vec<RoomCandidate> = Vec::with_capacity(rooms.len());
            for room in rooms {
                let paxes: Vec<RoomPax> = room.pax_ages.into_iter().map(RoomPax::new).collect();
                let candidate = RoomCandidate::from_paxes(room.id, &paxes);
                match candidates.iter_mut().find(|c| c.id == candidate.id) {
                    Some(existing) => *existing = candidate,
                    None => candidates.push(candidate),
                }
            }
            candidates
        });

        Self {
            language_code: ValidatedField::strict(
                raw.language_code,
                language_code_rule,
                Some(defaults.language_code.clone()),
            ),
            options_quota: ValidatedField::strict(
                raw.options_quota,
                options_quota_rule,
                Some(defaults.options_quota),
            ),
            auth: AuthCredentials::new(raw.username, raw.password, raw.company_id),
            search_type: ValidatedField::strict(raw.search_type, search_type_rule, None),
            allowed_hotel_count: ValidatedField::strict(
                raw.allowed_hotel_count,
                hotel_count_rule,
                Some(defaults.allowed_hotel_count),
            ),
            allowed_room_count: ValidatedField::lenient(
                raw.allowed_room_count,
                positive_count_rule,
                defaults.allowed_room_count,
            ),
            allowed_room_guest_count: ValidatedField::lenient(
                raw.allowed_room_guest_count,
                positive_count_rule,
                defaults.allowed_room_guest_count,
            ),
            allowed_child_count_per_room: ValidatedField::lenient(
                raw.allowed_child_count_per_room,
                non_negative_count_rule,
                defaults.allowed_child_count_per_room,
            ),
            avail_destinations,
            start_date: raw.start_date,
            end_date: raw.end_date,
            currency: ValidatedField::strict(
                raw.currency,
                currency_rule,
                Some(defaults.currency.clone()),
            ),
            nationality: ValidatedField::strict(
                raw.nationality,
                nationality_rule,
                Some(defaults.nationality.clone()),
            ),
            markets,
            default_markets: defaults.markets.clone(),
            room_candidates,
            markup: ValidatedField::strict(raw.markup, markup_rule, Some(defaults.markup)),
            today,
        }
    }

    pub fn language_code(&self) -> Option<String> {
        self.language_code.resolve()
    }

    pub fn options_quota(&self) -> Option<u32> {
        self.options_quota.resolve()
    }

    pub fn auth(&self) -> &AuthCredentials {
        &self.auth
    }

    pub fn search_type(&self) -> Option<String> {
        self.search_type.resolve()
    }

    /// Forced to 1 for a "Single" search. The comparison is exact, so a
    /// lowercase "single" passes validation but keeps the declared count.
    pub fn allowed_hotel_count(&self) -> i64 {
        if self.search_type().as_deref() == Some("Single") {
            return 1;
        }
        self.allowed_hotel_count.resolve().unwrap_or_default()
    }

    pub fn allowed_room_count(&self) -> u32 {
        self.allowed_room_count.resolve().unwrap_or_default()
    }

    pub fn allowed_room_guest_count(&self) -> u32 {
        self.allowed_room_guest_count.resolve().unwrap_or_default()
    }

    pub fn allowed_child_count_per_room(&self) -> u32 {
        self.allowed_child_count_per_room.resolve().unwrap_or_default()
    }

    /// Declared hotel codes, cut down to the allowed hotel count.
    pub fn avail_destinations(&self) -> Vec<i64> {
        let Some(destinations) = &self.avail_destinations else {
            return Vec::new();
        };
        // A negative count drops that many codes from the end instead
        let count = self.allowed_hotel_count();
        let limit = if count < 0 {
            destinations
                .len()
                .saturating_sub(usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX))
        } else {
            usize::try_from(count).unwrap_or(usize::MAX)
        };
        destinations.iter().copied().take(limit).collect()
    }

    /// Must be at least two days after today.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let earliest = self.today.checked_add_days(Days::new(MIN_DAYS_BEFORE_START))?;
        self.start_date
            .as_deref()
            .and_then(parse_request_date)
            .filter(|date| *date >= earliest)
    }

    /// Must leave at least three nights after a valid start date.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let earliest = self
            .start_date()?
            .checked_add_days(Days::new(MIN_STAY_NIGHTS))?;
        self.end_date
            .as_deref()
            .and_then(parse_request_date)
            .filter(|date| *date >= earliest)
    }

    pub fn currency(&self) -> Option<String> {
        self.currency.resolve()
    }

    pub fn nationality(&self) -> Option<String> {
        self.nationality.resolve()
    }

    /// Declared markets that are recognised, in declaration order. A declared
    /// list with nothing recognisable is absent rather than defaulted.
    pub fn markets(&self) -> Option<Vec<String>> {
        let Some(declared) = &self.markets else {
            return Some(self.default_markets.clone());
        };

        let markets: Vec<String> = declared
            .iter()
            .filter_map(|market| one_of_ignore_case(market, &MARKETS))
            .collect();
        (!markets.is_empty()).then_some(markets)
    }

    /// Rooms that satisfy the composition limits, at most `allowed_room_count`.
    pub fn room_candidates(&self) -> Vec<RoomCandidate> {
        let Some(rooms) = &self.room_candidates else {
            return Vec::new();
        };

        let allowed_guests = self.allowed_room_guest_count();
        let allowed_children = self.allowed_child_count_per_room();
        let limit = usize::try_from(self.allowed_room_count()).unwrap_or(usize::MAX);

        rooms
            .iter()
            .filter(|room| {
                let keep = room.is_acceptable(allowed_guests, allowed_children);
                if !keep {
                    debug!(
                        room_id = %room.id,
                        adults = room.adult_count,
                        children = room.child_count,
                        "room candidate dropped"
                    );
                }
                keep
            })
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn markup(&self) -> f64 {
        self.markup.resolve().unwrap_or_default()
    }

    fn passes(&self, rule: FieldValidationError) -> bool {
        match rule {
            FieldValidationError::LanguageCode => self.language_code().is_some(),
            FieldValidationError::OptionsQuota => self.options_quota().is_some(),
            FieldValidationError::Auth => self.auth.is_valid(),
            FieldValidationError::SearchType => self.search_type().is_some(),
            FieldValidationError::StartDate => self.start_date().is_some(),
            FieldValidationError::EndDate => self.end_date().is_some(),
            FieldValidationError::Currency => self.currency().is_some(),
            FieldValidationError::Nationality => self.nationality().is_some(),
            FieldValidationError::Markets => self.markets().is_some(),
        }
    }

    /// Evaluates every rule and returns all failures in evaluation order.
    pub fn check_properties(&self) -> Vec<FieldValidationError> {
        FieldValidationError::ALL
            .into_iter()
            .filter(|rule| !self.passes(*rule))
            .collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.check_properties()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.check_properties().is_empty()
    }
}

// Validated request fields and the numeric coercions the request rules share

use std::fmt;

/// A rule turns a raw attribute value into its canonical form, or rejects it.
pub type Rule<T> = fn(&str) -> Option<T>;

/// What a field resolves to when a raw value is present but fails its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnInvalid {
    /// The field is reported as absent, which surfaces as a validation error.
    Absent,
    /// The field silently falls back to its default.
    Default,
}

/// A request attribute that is only reachable through its rule.
///
/// Unset fields resolve to the default (which may itself be absent); set
/// fields go through `rule` and, on rejection, follow `on_invalid`.
#[derive(Clone)]
pub struct ValidatedField<T> {
    raw: Option<String>,
    rule: Rule<T>,
    default: Option<T>,
    on_invalid: OnInvalid,
}

impl<T: Clone> ValidatedField<T> {
    pub fn strict(raw: Option<String>, rule: Rule<T>, default: Option<T>) -> Self {
        Self {
            raw,
            rule,
            default,
            on_invalid: OnInvalid::Absent,
        }
    }

    pub fn lenient(raw: Option<String>, rule: Rule<T>, default: T) -> Self {
        Self {
            raw,
            rule,
            default: Some(default),
            on_invalid: OnInvalid::Default,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.raw.is_some()
    }

    pub fn resolve(&self) -> Option<T> {
        let Some(raw) = self.raw.as_deref() else {
            return self.default.clone();
        };

        match (self.rule)(raw) {
            Some(value) => Some(value),
            None => match self.on_invalid {
                OnInvalid::Absent => None,
                OnInvalid::Default => self.default.clone(),
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValidatedField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedField")
            .field("raw", &self.raw)
            .field("default", &self.default)
            .field("on_invalid", &self.on_invalid)
            .finish()
    }
}

/// Accepts only a whole decimal integer, optionally signed. "20.5", "1e1"
/// and "abc" are all rejected.
pub fn strict_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Takes the leading integer of a value and ignores the rest: "5.9" is 5,
/// "12abc" is 12, anything without leading digits is 0.
pub fn leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Reads the longest numeric prefix as a float, 0.0 when there is none.
pub fn lenient_float(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let end = trimmed
        .bytes()
        .position(|b| !(b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')))
        .unwrap_or(trimmed.len());
    let numeric = &trimmed[..end];

    (1..=numeric.len())
        .rev()
        .find_map(|len| numeric[..len].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Case-insensitive membership test that hands back the caller's casing.
pub fn one_of_ignore_case(raw: &str, allowed: &[&str]) -> Option<String> {
    allowed
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(raw))
        .then(|| raw.to_string())
}

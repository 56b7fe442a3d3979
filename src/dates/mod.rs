
use chrono::{DateTime, Duration, NaiveDate, Utc};
use thiserror::Error;

use crate::models::RawValue;

/// Day 0 of the spreadsheet serial calendar (accounts for the historical
/// 1900 leap-year bug), so serial 25569 lands on 1970-01-01 UTC.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Serials outside this window are treated as garbage rather than dates.
const MAX_SERIAL_MAGNITUDE: f64 = 3_000_000.0;

/// String shapes accepted by the generic third-tier fallback, tried in
/// order. Slash dates are read month-first, matching how the upstream
/// console interpreted free-form input.
const FALLBACK_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("Invalid date format. Use DD-MM-YYYY")]
pub struct InvalidDate;

/// Resolves one `date` field into an unambiguous UTC instant.
///
/// Resolution order is policy, not guesswork:
/// 1. numeric values are spreadsheet day-count serials,
/// 2. strings shaped exactly `DD-MM-YYYY` are parsed day-first,
/// 3. anything else falls back to the generic formats above.
///
/// Tier 2 never defers to tier 3: a `DD-MM-YYYY`-shaped string that is
/// not a real calendar date is an error, not a fallback candidate.
pub fn normalize(value: &RawValue) -> Result<DateTime<Utc>, InvalidDate> {
    match value {
        RawValue::Number(serial) => from_serial(*serial),
        RawValue::Text(text) => {
            let text = text.trim();
            if is_day_first_shape(text) {
                from_day_first(text)
            } else {
                from_fallback(text)
            }
        }
    }
}

fn from_serial(serial: f64) -> Result<DateTime<Utc>, InvalidDate> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_MAGNITUDE {
        return Err(InvalidDate);
    }

    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let (year, month, day) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(InvalidDate)?
        .and_utc();

    epoch
        .checked_add_signed(Duration::seconds(seconds))
        .ok_or(InvalidDate)
}

/// Exactly two digits, dash, two digits, dash, four digits.
fn is_day_first_shape(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 10
        && bytes[2] == b'-'
        && bytes[5] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| index == 2 || index == 5 || byte.is_ascii_digit())
}

fn from_day_first(text: &str) -> Result<DateTime<Utc>, InvalidDate> {
    let day: u32 = text[0..2].parse().map_err(|_| InvalidDate)?;
    let month: u32 = text[3..5].parse().map_err(|_| InvalidDate)?;
    let year: i32 = text[6..10].parse().map_err(|_| InvalidDate)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .ok_or(InvalidDate)
}

fn from_fallback(text: &str) -> Result<DateTime<Utc>, InvalidDate> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|datetime| datetime.and_utc())
                .ok_or(InvalidDate);
        }
    }

    Err(InvalidDate)
}

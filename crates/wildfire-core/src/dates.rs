//! Calendar decoding for the two date encodings found in fire record files.
//!
//! Every decoder returns `None` on failure; a bad value only affects its own
//! field.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use wildfire_parser::RawDate;

/// Julian Day number of 1970-01-01T00:00:00Z. Julian days start at noon,
/// hence the half day.
pub const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Converts a Julian Day number (fraction = time of day) to the UTC calendar
/// date it falls on.
pub fn decode_julian_day(value: Option<f64>) -> Option<NaiveDate> {
    let value = value?;
    if !value.is_finite() {
        return None;
    }
    let seconds = ((value - UNIX_EPOCH_JULIAN_DAY) * SECONDS_PER_DAY).round();
    if !(i64::MIN as f64..=i64::MAX as f64).contains(&seconds) {
        return None;
    }
    DateTime::from_timestamp(seconds as i64, 0).map(|dt| dt.date_naive())
}

pub fn parse_gregorian_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

pub fn decode_raw_date(value: Option<&RawDate>) -> Option<NaiveDate> {
    match value? {
        RawDate::JulianDay(day) => decode_julian_day(Some(*day)),
        RawDate::Text(text) => parse_gregorian_date(text),
    }
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn days_since_unix_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Julian Day number at midnight UTC of `date`.
pub fn julian_day(date: NaiveDate) -> f64 {
    f64::from(days_since_unix_epoch(date)) + UNIX_EPOCH_JULIAN_DAY
}

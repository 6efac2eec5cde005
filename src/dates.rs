//! Fixed-format date parsing for PNRGOV free text and message headers.
//!
//! Travel document dates use `ddMMMyy` (e.g. `12JUL64`). Two-digit years are
//! resolved into the hundred-year window starting eighty years before the
//! reference date, so `64` is 1964 and `19` is 2019.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::ParseError;

/// Format descriptor for travel document dates
pub const DOC_DATE_FORMAT: &str = "ddMMMyy";

/// Day-first date only, as used in message headers
pub const DATE_FORMAT_DAY_FIRST: &str = "ddMMyy";

/// Day-first date and time without seconds
pub const DT_FORMAT_DAY_FIRST: &str = "ddMMyyHHmm";

/// Day-first date and time with seconds
pub const DT_FORMAT_DAY_FIRST_SEC: &str = "ddMMyyHHmmss";

/// Years before the reference date where the two-digit year window starts
const CENTURY_LOOKBACK_YEARS: i32 = 80;

/// Parse a `ddMMMyy` document date, resolving the century against `today`.
///
/// The month abbreviation is matched case-insensitively.
///
/// # Errors
/// Returns `ParseError::InvalidDate` if the value is not exactly seven
/// characters of day, month abbreviation and two-digit year.
pub fn parse_document_date_at(value: &str, today: NaiveDate) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate {
        value: value.to_string(),
        format: DOC_DATE_FORMAT,
    };

    let value = value.trim();
    if value.len() != DOC_DATE_FORMAT.len() || !value.is_ascii() {
        return Err(invalid());
    }

    let (day_month, yy) = value.split_at(5);
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(yy) || !all_digits(&day_month[..2]) {
        return Err(invalid());
    }
    let yy: i32 = yy.parse().map_err(|_| invalid())?;
    let year = resolve_two_digit_year(yy, today);

    NaiveDate::parse_from_str(&format!("{}{:04}", day_month, year), "%d%b%Y")
        .map_err(|_| invalid())
}

fn resolve_two_digit_year(yy: i32, today: NaiveDate) -> i32 {
    let window_start = today.year() - CENTURY_LOOKBACK_YEARS;
    let year = window_start - window_start.rem_euclid(100) + yy;
    if year < window_start {
        year + 100
    } else {
        year
    }
}

/// Whole years elapsed between `dob` and `today`.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Parse a day-first message date/time, choosing the format by length.
///
/// Accepts `ddMMyy`, `ddMMyyHHmm` and `ddMMyyHHmmss`. Any other length, or a
/// value that does not parse, yields `None`.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    match value.len() {
        n if n == DATE_FORMAT_DAY_FIRST.len() => NaiveDate::parse_from_str(value, "%d%m%y")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        n if n == DT_FORMAT_DAY_FIRST.len() => {
            NaiveDateTime::parse_from_str(value, "%d%m%y%H%M").ok()
        }
        n if n == DT_FORMAT_DAY_FIRST_SEC.len() => {
            NaiveDateTime::parse_from_str(value, "%d%m%y%H%M%S").ok()
        }
        _ => None,
    }
}

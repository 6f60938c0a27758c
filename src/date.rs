//! The fixed 8-digit day format (`YYYYMMDD`) used for every date that
//! crosses the API boundary.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Zoned;

use crate::error::{RepeatError, Result};

/// Parse a `YYYYMMDD` string into a calendar date.
///
/// Exactly eight ASCII digits are accepted, and they must name a day that
/// exists (`20240230` is rejected).
pub fn parse_date(input: &str) -> Result<Date> {
    let bytes = input.as_bytes();
    if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(RepeatError::invalid_date(input));
    }
    let year: i16 = input[0..4]
        .parse()
        .map_err(|_| RepeatError::invalid_date(input))?;
    let month: i8 = input[4..6]
        .parse()
        .map_err(|_| RepeatError::invalid_date(input))?;
    let day: i8 = input[6..8]
        .parse()
        .map_err(|_| RepeatError::invalid_date(input))?;
    Date::new(year, month, day).map_err(|_| RepeatError::invalid_date(input))
}

/// Format a date as `YYYYMMDD`.
pub fn format_date(date: Date) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Today's date in the given reference time zone.
pub fn today_in(tz: &TimeZone) -> Date {
    Zoned::now().with_time_zone(tz.clone()).date()
}

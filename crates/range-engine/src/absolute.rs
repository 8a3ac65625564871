//! Absolute datetimes: `YYYY[-]MM[-]DD[T| ][HH[:MM[:SS]]][Z]`.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Captures;

use crate::error::{ParseError, Result};
use crate::grammar::ABSOLUTE_PATTERN;
use crate::zone::localize;

/// Parse an absolute datetime token into an instant.
///
/// Missing time components default to zero. A trailing `Z` makes the token
/// UTC; otherwise it is wall-clock time in `tz`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDatetime`] naming the offending component if
/// the token does not match the grammar or describes an impossible date or
/// time.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use range_engine::parse_absolute;
///
/// let t = parse_absolute("2015-06-23 17:45Z", chrono_tz::UTC).unwrap();
/// assert_eq!(t, Utc.with_ymd_and_hms(2015, 6, 23, 17, 45, 0).unwrap());
/// assert!(parse_absolute("2015-13-40", chrono_tz::UTC).is_err());
/// ```
pub fn parse_absolute(token: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let token = token.trim();
    let caps = ABSOLUTE_PATTERN.captures(token).ok_or_else(|| {
        ParseError::datetime(token, "does not match the absolute datetime grammar")
    })?;

    let year: i32 = component(token, &caps, "year")?;
    let month: u32 = component(token, &caps, "month")?;
    let day: u32 = component(token, &caps, "day")?;
    let hour: u32 = component(token, &caps, "hour")?;
    let minute: u32 = component(token, &caps, "minute")?;
    let second: u32 = component(token, &caps, "second")?;

    if !(1..=12).contains(&month) {
        return Err(ParseError::datetime(
            token,
            format!("month {month} is outside 1-12"),
        ));
    }
    let last_day = days_in_month(year, month)
        .ok_or_else(|| ParseError::datetime(token, format!("year {year} is out of range")))?;
    if day == 0 || day > last_day {
        return Err(ParseError::datetime(
            token,
            format!("day {day} is outside 1-{last_day} for {year:04}-{month:02}"),
        ));
    }
    if hour > 23 {
        return Err(ParseError::datetime(
            token,
            format!("hour {hour} is outside 0-23"),
        ));
    }
    if minute > 59 {
        return Err(ParseError::datetime(
            token,
            format!("minute {minute} is outside 0-59"),
        ));
    }
    if second > 59 {
        return Err(ParseError::datetime(
            token,
            format!("second {second} is outside 0-59"),
        ));
    }

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| ParseError::datetime(token, "not a valid calendar datetime"))?;

    if caps.name("utc").is_some() {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    localize(&tz, naive)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            ParseError::datetime(token, format!("local time does not exist in {}", tz.name()))
        })
}

/// Numeric value of a named capture; absent optional components are zero.
fn component<T>(token: &str, caps: &Captures<'_>, name: &str) -> Result<T>
where
    T: std::str::FromStr + Default,
{
    match caps.name(name) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| ParseError::datetime(token, format!("invalid {name} '{}'", m.as_str()))),
        None => Ok(T::default()),
    }
}

/// Number of days in `month` of `year`, leap-year aware.
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(ny, nm, 1)?;
    let last = first_next.pred_opt()?;
    Some(last.day())
}

//! Compound durations: `[Ny][NM][Nd][Nh][Nm][Ns]`.
//!
//! Years and months are calendar units, days keep the wall-clock time in the
//! injected timezone, and hours/minutes/seconds are exact elapsed time. This
//! mirrors how a user reads `2015-06-23 17:45/-1M`: "the same time, one month
//! earlier".

use std::fmt;

use chrono::{DateTime, Days, Months, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::zone::localize;

/// A duration unit, ordered as the grammar requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationUnit {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationUnit {
    pub fn symbol(self) -> char {
        match self {
            Self::Years => 'y',
            Self::Months => 'M',
            Self::Days => 'd',
            Self::Hours => 'h',
            Self::Minutes => 'm',
            Self::Seconds => 's',
        }
    }

    /// Case-significant: `M` is months, `m` is minutes.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'y' => Some(Self::Years),
            'M' => Some(Self::Months),
            'd' => Some(Self::Days),
            'h' => Some(Self::Hours),
            'm' => Some(Self::Minutes),
            's' => Some(Self::Seconds),
            _ => None,
        }
    }
}

/// Counts per unit. Units not mentioned are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Duration {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    pub const fn from_hours(hours: u32) -> Self {
        Self {
            years: 0,
            months: 0,
            days: 0,
            hours,
            minutes: 0,
            seconds: 0,
        }
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self {
            years: 0,
            months: 0,
            days: 0,
            hours: 0,
            minutes,
            seconds: 0,
        }
    }

    pub fn get(&self, unit: DurationUnit) -> u32 {
        match unit {
            DurationUnit::Years => self.years,
            DurationUnit::Months => self.months,
            DurationUnit::Days => self.days,
            DurationUnit::Hours => self.hours,
            DurationUnit::Minutes => self.minutes,
            DurationUnit::Seconds => self.seconds,
        }
    }

    fn slot(&mut self, unit: DurationUnit) -> &mut u32 {
        match unit {
            DurationUnit::Years => &mut self.years,
            DurationUnit::Months => &mut self.months,
            DurationUnit::Days => &mut self.days,
            DurationUnit::Hours => &mut self.hours,
            DurationUnit::Minutes => &mut self.minutes,
            DurationUnit::Seconds => &mut self.seconds,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// `instant + self`, or `None` if the result is out of range.
    pub fn checked_add_to(&self, instant: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
        self.shift(instant, tz, true)
    }

    /// `instant - self`, or `None` if the result is out of range.
    pub fn checked_sub_from(&self, instant: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
        self.shift(instant, tz, false)
    }

    fn shift(&self, instant: DateTime<Utc>, tz: Tz, forward: bool) -> Option<DateTime<Utc>> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let clock = TimeDelta::try_seconds(
            i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds),
        )?;

        // Only calendar units go through wall-clock time; a pure clock shift
        // must not lose the offset of an instant inside a DST fold.
        let anchored = if months == 0 && self.days == 0 {
            instant
        } else {
            let local = instant.with_timezone(&tz).naive_local();
            let months = Months::new(months);
            let days = Days::new(u64::from(self.days));
            let shifted = if forward {
                local.checked_add_months(months)?.checked_add_days(days)?
            } else {
                local.checked_sub_months(months)?.checked_sub_days(days)?
            };
            localize(&tz, shifted)?.with_timezone(&Utc)
        };

        if forward {
            anchored.checked_add_signed(clock)
        } else {
            anchored.checked_sub_signed(clock)
        }
    }
}

/// Renders the canonical compound form, e.g. `1y2M8d22h8m48s`. A zero
/// duration renders as `0m`.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0m");
        }
        for unit in [
            DurationUnit::Years,
            DurationUnit::Months,
            DurationUnit::Days,
            DurationUnit::Hours,
            DurationUnit::Minutes,
            DurationUnit::Seconds,
        ] {
            let count = self.get(unit);
            if count != 0 {
                write!(f, "{count}{}", unit.symbol())?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s)
    }
}

/// Parse a compound duration token.
///
/// A bare integer is minutes (`"90"` equals `"90m"`). Units must appear at
/// most once and in canonical order; counts are non-negative integers.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDuration`] naming the offending unit or
/// character.
///
/// # Examples
///
/// ```
/// use range_engine::parse_duration;
///
/// let d = parse_duration("1h30m").unwrap();
/// assert_eq!((d.hours, d.minutes), (1, 30));
/// assert_eq!(parse_duration("90").unwrap().minutes, 90);
/// assert!(parse_duration("30m1h").is_err());
/// ```
pub fn parse_duration(token: &str) -> Result<Duration> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::duration(token, "empty duration"));
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        let minutes = parse_count(token, token)?;
        return Ok(Duration::from_minutes(minutes));
    }

    let mut duration = Duration::default();
    let mut previous: Option<DurationUnit> = None;
    let mut digits_start: Option<usize> = None;

    for (i, ch) in token.char_indices() {
        if ch.is_ascii_digit() {
            digits_start.get_or_insert(i);
            continue;
        }

        let Some(unit) = DurationUnit::from_symbol(ch) else {
            let reason = match ch {
                '-' => "negative counts are not allowed".to_string(),
                '+' => "a sign is only allowed on the right-hand side of a range".to_string(),
                '.' | ',' => "counts must be whole numbers".to_string(),
                other => format!("unexpected character '{other}'"),
            };
            return Err(ParseError::duration(token, reason));
        };

        let Some(start) = digits_start.take() else {
            return Err(ParseError::duration(
                token,
                format!("expected a count before '{ch}'"),
            ));
        };

        if let Some(prev) = previous {
            if unit == prev {
                return Err(ParseError::duration(
                    token,
                    format!("unit '{ch}' appears more than once"),
                ));
            }
            if unit < prev {
                return Err(ParseError::duration(
                    token,
                    format!("unit '{ch}' must come before '{}'", prev.symbol()),
                ));
            }
        }

        *duration.slot(unit) = parse_count(token, &token[start..i])?;
        previous = Some(unit);
    }

    if digits_start.is_some() {
        return Err(ParseError::duration(
            token,
            "trailing count has no unit",
        ));
    }

    Ok(duration)
}

fn parse_count(token: &str, digits: &str) -> Result<u32> {
    digits
        .parse::<u32>()
        .map_err(|_| ParseError::duration(token, format!("count {digits} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn utc() -> Tz {
        chrono_tz::UTC
    }

    // ── parse_duration tests ────────────────────────────────────────────

    #[test]
    fn test_parse_full_compound() {
        let d = parse_duration("1y8M4d8h30m2s").unwrap();
        assert_eq!(
            d,
            Duration {
                years: 1,
                months: 8,
                days: 4,
                hours: 8,
                minutes: 30,
                seconds: 2,
            }
        );
    }

    #[test]
    fn test_parse_bare_number_is_minutes() {
        assert_eq!(parse_duration("90").unwrap(), parse_duration("90m").unwrap());
    }

    #[test]
    fn test_parse_case_significant_months() {
        assert_eq!(parse_duration("1M").unwrap().months, 1);
        assert_eq!(parse_duration("1m").unwrap().minutes, 1);
    }

    #[test]
    fn test_parse_skipped_units() {
        let d = parse_duration("1M1d42s").unwrap();
        assert_eq!((d.months, d.days, d.seconds), (1, 1, 42));
        assert_eq!(d.hours, 0);
    }

    #[test]
    fn test_parse_rejects_duplicate_unit() {
        let err = parse_duration("1h2h").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDuration);
        assert!(err.to_string().contains("'h' appears more than once"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_out_of_order() {
        let err = parse_duration("30m1h").unwrap_err();
        assert!(err.to_string().contains("'h' must come before 'm'"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_duration("  ").unwrap_err().kind(), ErrorKind::InvalidDuration);
    }

    #[test]
    fn test_parse_rejects_negative_and_fractional() {
        let err = parse_duration("-5m").unwrap_err();
        assert!(err.to_string().contains("negative"), "got: {err}");
        let err = parse_duration("1.5h").unwrap_err();
        assert!(err.to_string().contains("whole numbers"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_missing_count_and_trailing_count() {
        let err = parse_duration("1hm").unwrap_err();
        assert!(err.to_string().contains("expected a count before 'm'"), "got: {err}");
        let err = parse_duration("1h30").unwrap_err();
        assert!(err.to_string().contains("trailing count"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = parse_duration("2w").unwrap_err();
        assert!(err.to_string().contains("unexpected character 'w'"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_overflowing_count() {
        let err = parse_duration("99999999999m").unwrap_err();
        assert!(err.to_string().contains("too large"), "got: {err}");
    }

    // ── Display tests ───────────────────────────────────────────────────

    #[test]
    fn test_display_canonical() {
        assert_eq!(parse_duration("1y2M8d22h8m48s").unwrap().to_string(), "1y2M8d22h8m48s");
        assert_eq!(parse_duration("90").unwrap().to_string(), "90m");
        assert_eq!(Duration::default().to_string(), "0m");
    }

    // ── arithmetic tests ────────────────────────────────────────────────

    #[test]
    fn test_sub_one_month() {
        let t = Utc.with_ymd_and_hms(2015, 6, 23, 17, 45, 0).unwrap();
        let d = parse_duration("1M").unwrap();
        assert_eq!(
            d.checked_sub_from(t, utc()).unwrap(),
            Utc.with_ymd_and_hms(2015, 5, 23, 17, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_add_minutes() {
        let t = Utc.with_ymd_and_hms(2015, 6, 23, 17, 45, 0).unwrap();
        let d = parse_duration("15m").unwrap();
        assert_eq!(
            d.checked_add_to(t, utc()).unwrap(),
            Utc.with_ymd_and_hms(2015, 6, 23, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_month_clamps_to_last_day() {
        let t = Utc.with_ymd_and_hms(2016, 3, 31, 12, 0, 0).unwrap();
        let d = parse_duration("1M").unwrap();
        // 2016 is a leap year
        assert_eq!(
            d.checked_sub_from(t, utc()).unwrap(),
            Utc.with_ymd_and_hms(2016, 2, 29, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_day_keeps_wall_clock_across_dst() {
        // March 8, 2026: US spring forward. One day after 22:00 EST is 22:00 EDT.
        let tz: Tz = "America/New_York".parse().unwrap();
        let t = Utc.with_ymd_and_hms(2026, 3, 8, 3, 0, 0).unwrap(); // 22:00 EST on Mar 7
        let d = parse_duration("1d").unwrap();
        assert_eq!(
            d.checked_add_to(t, tz).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 9, 2, 0, 0).unwrap()
        );
        // 24h of clock time lands an hour later on the wall clock
        let d = parse_duration("24h").unwrap();
        assert_eq!(
            d.checked_add_to(t, tz).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 9, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_is_none() {
        let t = Utc.with_ymd_and_hms(2015, 6, 23, 17, 45, 0).unwrap();
        let d = Duration {
            years: u32::MAX,
            ..Default::default()
        };
        assert!(d.checked_sub_from(t, utc()).is_none());
    }

    // ── properties ──────────────────────────────────────────────────────

    fn any_duration() -> impl Strategy<Value = Duration> {
        (
            0u32..200,
            0u32..200,
            0u32..1000,
            0u32..1000,
            0u32..10_000,
            0u32..100_000,
        )
            .prop_map(|(years, months, days, hours, minutes, seconds)| Duration {
                years,
                months,
                days,
                hours,
                minutes,
                seconds,
            })
    }

    proptest! {
        #[test]
        fn prop_render_then_parse_reconstructs(d in any_duration()) {
            let rendered = d.to_string();
            prop_assert_eq!(parse_duration(&rendered).unwrap(), d);
        }

        #[test]
        fn prop_clock_units_add_then_sub_is_identity(
            h in 0u32..10_000,
            m in 0u32..10_000,
            s in 0u32..100_000,
        ) {
            let d = Duration { hours: h, minutes: m, seconds: s, ..Default::default() };
            let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
            let there = d.checked_add_to(t, utc()).unwrap();
            prop_assert_eq!(d.checked_sub_from(there, utc()).unwrap(), t);
        }
    }
}

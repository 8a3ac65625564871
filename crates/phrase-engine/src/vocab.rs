//! Words and small grammars shared by the phrase parsers.

use chrono::{NaiveTime, Weekday};
use range_engine::Duration;

/// Parse a weekday name (full or abbreviated, lowercase).
pub(crate) fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Map a named time of day to a clock time.
pub(crate) fn named_time(s: &str) -> Option<NaiveTime> {
    match s {
        "morning" => NaiveTime::from_hms_opt(6, 0, 0),
        "noon" | "midday" | "lunch" => NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => NaiveTime::from_hms_opt(15, 0, 0),
        "evening" => NaiveTime::from_hms_opt(18, 0, 0),
        "night" | "tonight" => NaiveTime::from_hms_opt(19, 0, 0),
        "midnight" => NaiveTime::from_hms_opt(0, 0, 0),
        _ => None,
    }
}

/// Parse a clock time: `"2pm"`, `"2:30pm"`, `"14:00"`, `"14:30:00"`, `"5"`.
///
/// With `pm_hint` (the time follows "night", "evening", ...) a 12-hour value
/// without am/pm is read as afternoon: "night at 5" is 17:00.
pub(crate) fn parse_clock(s: &str, pm_hint: bool) -> Option<NaiveTime> {
    let compact = s.trim().replace(' ', "");
    let (body, meridiem) = if let Some(b) = compact.strip_suffix("pm") {
        (b, Some(true))
    } else if let Some(b) = compact.strip_suffix("am") {
        (b, Some(false))
    } else {
        (compact.as_str(), None)
    };

    let mut parts = body.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) if m.len() == 2 => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    let second: u32 = match parts.next() {
        Some(sec) if sec.len() == 2 => sec.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    let hour24 = match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (hour, is_pm) {
                (12, true) => 12,
                (12, false) => 0,
                (h, true) => h + 12,
                (h, false) => h,
            }
        }
        None if pm_hint && (1..12).contains(&hour) => hour + 12,
        None => hour,
    };

    NaiveTime::from_hms_opt(hour24, minute, second)
}

/// Parse a count: digits, `a`/`an`, or a number word up to twelve.
pub(crate) fn parse_count(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let n = match s {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}

/// A unit in a spelled-out offset ("3 weeks ago").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl Unit {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "second" | "seconds" | "sec" | "secs" => Some(Self::Seconds),
            "minute" | "minutes" | "min" | "mins" => Some(Self::Minutes),
            "hour" | "hours" | "hr" | "hrs" => Some(Self::Hours),
            "day" | "days" => Some(Self::Days),
            "week" | "weeks" | "wk" | "wks" => Some(Self::Weeks),
            "month" | "months" => Some(Self::Months),
            "year" | "years" | "yr" | "yrs" => Some(Self::Years),
            _ => None,
        }
    }

    /// `n` of this unit as a calendar-aware duration.
    pub(crate) fn times(self, n: u32) -> Option<Duration> {
        let mut d = Duration::default();
        match self {
            Self::Seconds => d.seconds = n,
            Self::Minutes => d.minutes = n,
            Self::Hours => d.hours = n,
            Self::Days => d.days = n,
            Self::Weeks => d.days = n.checked_mul(7)?,
            Self::Months => d.months = n,
            Self::Years => d.years = n,
        }
        Some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_clock_variants() {
        assert_eq!(parse_clock("2pm", false), Some(hm(14, 0)));
        assert_eq!(parse_clock("2:30pm", false), Some(hm(14, 30)));
        assert_eq!(parse_clock("2 pm", false), Some(hm(14, 0)));
        assert_eq!(parse_clock("12am", false), Some(hm(0, 0)));
        assert_eq!(parse_clock("12pm", false), Some(hm(12, 0)));
        assert_eq!(parse_clock("14:00", false), Some(hm(14, 0)));
        assert_eq!(
            parse_clock("14:30:15", false),
            NaiveTime::from_hms_opt(14, 30, 15)
        );
        assert_eq!(parse_clock("5", false), Some(hm(5, 0)));
    }

    #[test]
    fn test_parse_clock_pm_hint() {
        assert_eq!(parse_clock("5", true), Some(hm(17, 0)));
        assert_eq!(parse_clock("5am", true), Some(hm(5, 0)));
        assert_eq!(parse_clock("17:00", true), Some(hm(17, 0)));
    }

    #[test]
    fn test_parse_clock_rejects() {
        for s in ["25", "13pm", "0am", "2:3", "14:00:00:00", "noon", ""] {
            assert_eq!(parse_clock(s, false), None, "{s}");
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("10"), Some(10));
        assert_eq!(parse_count("a"), Some(1));
        assert_eq!(parse_count("three"), Some(3));
        assert_eq!(parse_count("many"), None);
    }

    #[test]
    fn test_unit_times() {
        assert_eq!(Unit::parse("weeks").unwrap().times(2).unwrap().days, 14);
        assert_eq!(Unit::parse("month").unwrap().times(1).unwrap().months, 1);
        assert_eq!(Unit::parse("fortnight"), None);
    }
}

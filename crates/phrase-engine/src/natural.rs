//! Phrase parsers, tried in order of specificity.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use range_engine::localize;

use crate::vocab::{named_time, parse_clock, parse_count, parse_weekday, Unit};
use crate::WeekStartDay;

/// Everything a parser needs besides the phrase itself.
pub(crate) struct Context {
    pub(crate) now: DateTime<Utc>,
    pub(crate) tz: Tz,
    pub(crate) week_start: WeekStartDay,
}

impl Context {
    fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.tz).date_naive()
    }

    fn at(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        localize(&self.tz, date.and_time(time)).map(|dt| dt.with_timezone(&Utc))
    }

    fn days_from_week_start(&self, weekday: Weekday) -> i64 {
        match self.week_start {
            WeekStartDay::Monday => i64::from(weekday.num_days_from_monday()),
            WeekStartDay::Sunday => i64::from(weekday.num_days_from_sunday()),
        }
    }

    fn week_start_of(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_signed(chrono::Duration::days(
            self.days_from_week_start(date.weekday()),
        ))
    }
}

/// Resolve a phrase to an instant, or `None` if no parser accepts it.
pub(crate) fn resolve(expression: &str, ctx: &Context) -> Option<DateTime<Utc>> {
    let normalized = normalize_expression(expression);
    let words: Vec<&str> = normalized.split(' ').collect();

    try_passthrough_rfc3339(expression.trim())
        .or_else(|| try_now(&normalized, ctx))
        .or_else(|| try_day_and_time(&words, ctx))
        .or_else(|| try_period_boundary(&words, ctx))
        .or_else(|| try_period_relative(&words, ctx))
        .or_else(|| try_offset(&words, ctx))
        .or_else(|| try_time_of_day(&normalized, ctx))
}

/// Trim, lowercase, drop "the", collapse whitespace.
fn normalize_expression(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .filter(|w| *w != "the")
        .collect::<Vec<_>>()
        .join(" ")
}

/// An RFC 3339 datetime with explicit offset, e.g. `2015-06-23T17:45:00+02:00`.
fn try_passthrough_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn try_now(s: &str, ctx: &Context) -> Option<DateTime<Utc>> {
    matches!(s, "now" | "right now").then_some(ctx.now)
}

// ── day + time ──────────────────────────────────────────────────────────────

/// A day reference optionally followed by a time: "yesterday at 12:30pm",
/// "last friday at 2pm", "tomorrow night at 5", "wednesday 2 weeks ago",
/// "next week saturday morning".
fn try_day_and_time(words: &[&str], ctx: &Context) -> Option<DateTime<Utc>> {
    let (date, default_time, consumed) = day_prefix(words, ctx)?;
    let rest = words.get(consumed..)?.join(" ");
    let time = match time_suffix(&rest, default_time)? {
        Some(t) => t,
        None => default_time.unwrap_or(NaiveTime::MIN),
    };
    ctx.at(date, time)
}

/// The date a phrase starts with, an implied time of day, and the number of
/// words consumed.
fn day_prefix(words: &[&str], ctx: &Context) -> Option<(NaiveDate, Option<NaiveTime>, usize)> {
    let today = ctx.today();
    match words {
        ["last", "night", ..] => Some((today.pred_opt()?, named_time("night"), 2)),
        ["tonight", ..] => Some((today, named_time("tonight"), 1)),
        ["today", ..] => Some((today, None, 1)),
        ["tomorrow", ..] => Some((today.succ_opt()?, None, 1)),
        ["yesterday", ..] => Some((today.pred_opt()?, None, 1)),
        [modifier @ ("next" | "this" | "last"), "week", day, ..] => {
            let weekday = parse_weekday(day)?;
            let shift = match *modifier {
                "next" => 7,
                "last" => -7,
                _ => 0,
            };
            let date = ctx
                .week_start_of(today)?
                .checked_add_signed(chrono::Duration::days(shift))?
                .checked_add_signed(chrono::Duration::days(ctx.days_from_week_start(weekday)))?;
            Some((date, None, 3))
        }
        [modifier @ ("next" | "this" | "last"), day, ..] => {
            let weekday = parse_weekday(day)?;
            Some((weekday_relative(modifier, weekday, today)?, None, 2))
        }
        [day, count, "week" | "weeks", "ago", ..] => {
            let weekday = parse_weekday(day)?;
            let weeks = i64::from(parse_count(count)?);
            let then = today.checked_sub_signed(chrono::Duration::try_weeks(weeks)?)?;
            let date = ctx
                .week_start_of(then)?
                .checked_add_signed(chrono::Duration::days(ctx.days_from_week_start(weekday)))?;
            Some((date, None, 4))
        }
        [day, ..] => {
            // A bare weekday is its most recent occurrence, today included
            let weekday = parse_weekday(day)?;
            let back = (i64::from(today.weekday().num_days_from_monday())
                - i64::from(weekday.num_days_from_monday())
                + 7)
                % 7;
            Some((today.checked_sub_signed(chrono::Duration::days(back))?, None, 1))
        }
        [] => None,
    }
}

/// "next Monday" (always future), "this Friday" (same Monday-based week),
/// "last Wednesday" (always past). The configured week start does not apply.
fn weekday_relative(modifier: &str, weekday: Weekday, today: NaiveDate) -> Option<NaiveDate> {
    let current = i64::from(today.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    let offset = match modifier {
        "next" => match (target - current + 7) % 7 {
            0 => 7,
            ahead => ahead,
        },
        "last" => match (current - target + 7) % 7 {
            0 => -7,
            back => -back,
        },
        _ => target - current,
    };
    today.checked_add_signed(chrono::Duration::days(offset))
}

/// Parse what follows a day reference. `Some(None)` means nothing follows.
///
/// Accepts `"at <clock>"`, `"at <named>"`, `"<named>"`, `"<named> at <clock>"`
/// and a bare clock. A clock after an afternoon-or-later named time (or after
/// "tonight"/"last night") reads as pm.
fn time_suffix(rest: &str, implied: Option<NaiveTime>) -> Option<Option<NaiveTime>> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(None);
    }
    let pm_after = |t: Option<NaiveTime>| t.is_some_and(|t| t >= NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));

    if let Some(clock) = rest.strip_prefix("at ") {
        return time_of_day(clock, pm_after(implied)).map(Some);
    }
    if let Some((named, clock)) = rest.split_once(" at ") {
        let named = named_time(named)?;
        return parse_clock(clock, pm_after(Some(named))).map(Some);
    }
    time_of_day(rest, pm_after(implied)).map(Some)
}

fn time_of_day(s: &str, pm_hint: bool) -> Option<NaiveTime> {
    named_time(s).or_else(|| parse_clock(s, pm_hint))
}

/// A time alone applies to today: "noon", "2pm", "14:00", "at 5".
fn try_time_of_day(s: &str, ctx: &Context) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("at ").unwrap_or(s);
    ctx.at(ctx.today(), time_of_day(s, false)?)
}

// ── periods ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    fn unit(self) -> Option<(Unit, u32)> {
        match self {
            Self::Day => Some((Unit::Days, 1)),
            Self::Week => Some((Unit::Weeks, 1)),
            Self::Month => Some((Unit::Months, 1)),
            Self::Quarter => Some((Unit::Months, 3)),
            Self::Year => Some((Unit::Years, 1)),
        }
    }

    /// First day of the period containing `date`.
    fn start(self, date: NaiveDate, ctx: &Context) -> Option<NaiveDate> {
        match self {
            Self::Day => Some(date),
            Self::Week => ctx.week_start_of(date),
            Self::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            Self::Quarter => {
                NaiveDate::from_ymd_opt(date.year(), ((date.month() - 1) / 3) * 3 + 1, 1)
            }
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    /// Move a period start by `n` periods.
    fn shift(self, start: NaiveDate, n: i32) -> Option<NaiveDate> {
        let months = match self {
            Self::Day => return start.checked_add_signed(chrono::Duration::days(i64::from(n))),
            Self::Week => return start.checked_add_signed(chrono::Duration::weeks(i64::from(n))),
            Self::Month => n,
            Self::Quarter => n.checked_mul(3)?,
            Self::Year => n.checked_mul(12)?,
        };
        let magnitude = Months::new(months.unsigned_abs());
        if months >= 0 {
            start.checked_add_months(magnitude)
        } else {
            start.checked_sub_months(magnitude)
        }
    }
}

/// Which period a boundary phrase refers to, relative to the current one.
fn period_reference(words: &[&str]) -> Option<(Period, i32)> {
    match words {
        ["today"] => Some((Period::Day, 0)),
        ["yesterday"] => Some((Period::Day, -1)),
        ["tomorrow"] => Some((Period::Day, 1)),
        [p] | ["this", p] => Some((Period::parse(p)?, 0)),
        ["last" | "previous", p] => Some((Period::parse(p)?, -1)),
        ["next", p] => Some((Period::parse(p)?, 1)),
        _ => None,
    }
}

/// "start of week", "end of last month", "beginning of next quarter".
fn try_period_boundary(words: &[&str], ctx: &Context) -> Option<DateTime<Utc>> {
    let (is_start, rest) = match words {
        ["start" | "beginning", "of", rest @ ..] => (true, rest),
        ["end", "of", rest @ ..] => (false, rest),
        _ => return None,
    };
    let (period, offset) = period_reference(rest)?;
    let start = period.shift(period.start(ctx.today(), ctx)?, offset)?;
    if is_start {
        ctx.at(start, NaiveTime::MIN)
    } else {
        let last_day = period.shift(start, 1)?.pred_opt()?;
        ctx.at(last_day, NaiveTime::from_hms_opt(23, 59, 59)?)
    }
}

/// "last month" is one month before now, "next week" one week after;
/// "this month" is the start of the current month.
fn try_period_relative(words: &[&str], ctx: &Context) -> Option<DateTime<Utc>> {
    let (modifier, period) = match words {
        [m @ ("last" | "previous" | "next" | "this"), p] => (*m, Period::parse(p)?),
        _ => return None,
    };
    if modifier == "this" {
        return ctx.at(period.start(ctx.today(), ctx)?, NaiveTime::MIN);
    }
    let (unit, n) = period.unit()?;
    let duration = unit.times(n)?;
    if modifier == "next" {
        duration.checked_add_to(ctx.now, ctx.tz)
    } else {
        duration.checked_sub_from(ctx.now, ctx.tz)
    }
}

// ── offsets ─────────────────────────────────────────────────────────────────

/// "10 minutes ago", "in 3 hours", "a week from now", "in 2 months".
fn try_offset(words: &[&str], ctx: &Context) -> Option<DateTime<Utc>> {
    let (count, unit, forward) = match words {
        [count, unit, "ago"] => (*count, *unit, false),
        ["in", count, unit] => (*count, *unit, true),
        [count, unit, "from", "now"] => (*count, *unit, true),
        ["in", unit] => ("1", *unit, true),
        _ => return None,
    };
    let duration = Unit::parse(unit)?.times(parse_count(count)?)?;
    if forward {
        duration.checked_add_to(ctx.now, ctx.tz)
    } else {
        duration.checked_sub_from(ctx.now, ctx.tz)
    }
}

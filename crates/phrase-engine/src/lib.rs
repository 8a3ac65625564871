//! # phrase-engine
//!
//! Human-language datetime phrases for [`range_engine`].
//!
//! [`NaturalResolver`] implements [`range_engine::PhraseResolver`]. Every
//! phrase is resolved against the reference instant and timezone the caller
//! passes in; nothing here reads the system clock or the OS timezone.
//!
//! Supported phrases:
//!
//! **Anchors**: `"now"`, `"today"`, `"tomorrow"`, `"yesterday"`, `"tonight"`,
//! `"last night"`
//!
//! **Weekdays**: `"monday"`, `"next monday"`, `"this friday"`, `"last friday"`,
//! `"wednesday 2 weeks ago"`, `"next week saturday"`
//!
//! **Times**: `"noon"`, `"2pm"`, `"2:30pm"`, `"14:00"`, `"at 5"`, and any day
//! reference followed by one: `"yesterday at 12:30pm"`, `"tomorrow night at 5"`,
//! `"next week saturday morning"`
//!
//! **Offsets**: `"10 minutes ago"`, `"in 3 hours"`, `"a week from now"`,
//! `"in 2 months"`
//!
//! **Periods**: `"last month"`, `"next week"`, `"this year"`,
//! `"start of week"`, `"end of last month"`, `"beginning of next quarter"`
//!
//! **Passthrough**: RFC 3339 with an explicit offset

mod natural;
mod vocab;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use range_engine::PhraseResolver;
use tracing::debug;

/// Which day begins a week for period computations ("start of week",
/// "next week saturday").
///
/// Does **not** affect "next Monday" or "last Friday".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStartDay {
    /// ISO 8601 (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// English phrase resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalResolver {
    week_start: WeekStartDay,
}

impl NaturalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_week_start(mut self, week_start: WeekStartDay) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn week_start(&self) -> WeekStartDay {
        self.week_start
    }
}

impl PhraseResolver for NaturalResolver {
    fn resolve_phrase(&self, phrase: &str, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
        let ctx = natural::Context {
            now,
            tz,
            week_start: self.week_start,
        };
        let resolved = natural::resolve(phrase, &ctx);
        debug!(phrase, ?resolved, timezone = tz.name(), "phrase resolution");
        resolved
    }
}

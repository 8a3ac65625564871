//! Range resolution: raw expression → concrete search interval.
//!
//! Resolution runs in stages, any of which may fail and end the attempt:
//! validate the separator, detect the format, resolve the left half, resolve
//! the right half. No partial interval is ever returned.
//!
//! Only whole, non-range tokens get the full grammar-then-fallback treatment.
//! A range half that has the absolute-datetime shape must parse as one; it is
//! never retried as a phrase.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, warn};

use crate::absolute::parse_absolute;
use crate::detect::{classify, detect, Detected, Format, TimeSpec};
use crate::duration::{parse_duration, Duration};
use crate::error::{ParseError, Result};
use crate::phrase::{resolve_phrase, PhraseResolver};
use crate::separator::validate_separator;

/// Window used when no expression is given: the last hour.
pub const DEFAULT_WINDOW: Duration = Duration::from_hours(1);

/// A resolved search interval.
///
/// `end == None` means open-ended: the consumer treats it as "up to now".
/// Bounds are never reordered; see [`ResolvedInterval::is_inverted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedInterval {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl ResolvedInterval {
    pub fn open(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether an explicit end lies before the start.
    pub fn is_inverted(&self) -> bool {
        self.end.is_some_and(|end| end < self.start)
    }

    /// The end bound, or `now` for an open interval.
    pub fn end_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.unwrap_or(now)
    }
}

/// Resolves time expressions against an injected timezone and phrase
/// capability. The reference "now" and the separator are passed per call.
#[derive(Debug, Clone)]
pub struct RangeResolver<P> {
    phrases: P,
    timezone: Tz,
    default_window: Duration,
}

impl<P: PhraseResolver> RangeResolver<P> {
    pub fn new(phrases: P, timezone: Tz) -> Self {
        Self {
            phrases,
            timezone,
            default_window: DEFAULT_WINDOW,
        }
    }

    /// Replace the window used when no expression is given.
    pub fn with_default_window(mut self, window: Duration) -> Self {
        self.default_window = window;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Resolve `input` into an interval.
    ///
    /// # Arguments
    ///
    /// * `input` — The raw expression; `None` or blank selects the default window
    /// * `separator` — The range separator in effect (see [`crate::effective_separator`])
    /// * `now` — The reference instant for durations and phrases
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] met along the way. The separator is
    /// validated before anything else, even when `input` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use range_engine::{NoPhrases, RangeResolver};
    ///
    /// let resolver = RangeResolver::new(NoPhrases, chrono_tz::UTC);
    /// let now = Utc.with_ymd_and_hms(2015, 6, 26, 12, 0, 0).unwrap();
    ///
    /// let iv = resolver.resolve(Some("2015-06-23 17:45/+15m"), "/", now).unwrap();
    /// assert_eq!(iv.start, Utc.with_ymd_and_hms(2015, 6, 23, 17, 45, 0).unwrap());
    /// assert_eq!(iv.end, Some(Utc.with_ymd_and_hms(2015, 6, 23, 18, 0, 0).unwrap()));
    /// ```
    pub fn resolve(
        &self,
        input: Option<&str>,
        separator: &str,
        now: DateTime<Utc>,
    ) -> Result<ResolvedInterval> {
        validate_separator(separator)?;
        debug!(separator, "separator validated");

        let Some(token) = input.map(str::trim).filter(|t| !t.is_empty()) else {
            let window = self.default_window;
            let start = self.shift_back(now, &window, &window.to_string())?;
            debug!(window = %self.default_window, "no expression, using default window");
            return Ok(ResolvedInterval::open(start));
        };

        let detected = detect(token, separator)?;
        debug!(?detected, "format detected");

        let interval = match detected {
            Detected::Range(spec) => self.resolve_range(spec, now)?,
            Detected::Duration(t) => {
                let duration = parse_duration(t)?;
                ResolvedInterval::open(self.shift_back(now, &duration, t)?)
            }
            Detected::Absolute(t) => ResolvedInterval::open(parse_absolute(t, self.timezone)?),
            Detected::HumanLanguage(t) => {
                ResolvedInterval::open(resolve_phrase(&self.phrases, t, now, self.timezone)?)
            }
        };

        if interval.is_inverted() {
            warn!(
                start = %interval.start,
                end = ?interval.end,
                "range ends before it starts; bounds left as given"
            );
        }
        Ok(interval)
    }

    fn resolve_range(&self, spec: TimeSpec<'_>, now: DateTime<Utc>) -> Result<ResolvedInterval> {
        let left = self.resolve_anchor(spec.left, now)?;
        debug!(token = spec.left, %left, "left bound resolved");

        let Some(right) = spec.right else {
            return Ok(ResolvedInterval::open(left));
        };

        let interval = if let Some(rest) = right.strip_prefix('+') {
            let duration = parse_duration(rest)?;
            let end = duration
                .checked_add_to(left, self.timezone)
                .ok_or_else(|| ParseError::duration(right, "end of range is out of range"))?;
            ResolvedInterval::closed(left, end)
        } else if let Some(rest) = right.strip_prefix('-') {
            let duration = parse_duration(rest)?;
            let start = self.shift_back(left, &duration, right)?;
            ResolvedInterval::closed(start, left)
        } else {
            ResolvedInterval::closed(left, self.resolve_anchor(right, now)?)
        };
        debug!(token = right, ?interval, "right bound resolved");
        Ok(interval)
    }

    /// An instant usable as a range bound: an absolute datetime or a phrase.
    fn resolve_anchor(&self, token: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        match classify(token) {
            Format::Absolute => parse_absolute(token, self.timezone),
            Format::Duration => Err(ParseError::unrecognized(
                token,
                "a duration cannot bound a range; use a datetime, or +/- a duration after the separator",
            )),
            Format::HumanLanguage => resolve_phrase(&self.phrases, token, now, self.timezone),
        }
    }

    fn shift_back(
        &self,
        instant: DateTime<Utc>,
        duration: &Duration,
        token: &str,
    ) -> Result<DateTime<Utc>> {
        duration
            .checked_sub_from(instant, self.timezone)
            .ok_or_else(|| ParseError::duration(token, "start of range is out of range"))
    }
}

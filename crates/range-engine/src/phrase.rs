//! Human-language fallback.
//!
//! The engine does not understand free text itself. It delegates to a
//! [`PhraseResolver`], a single capability "(text, now, zone) → instant",
//! so callers can plug in a natural-language parser and tests can plug in a
//! deterministic stub.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{ParseError, Result};

/// Resolves a free-text phrase to a single instant relative to `now`.
pub trait PhraseResolver {
    /// Returns `None` when the phrase has no usable interpretation.
    fn resolve_phrase(&self, phrase: &str, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>>;
}

impl<F> PhraseResolver for F
where
    F: Fn(&str, DateTime<Utc>, Tz) -> Option<DateTime<Utc>>,
{
    fn resolve_phrase(&self, phrase: &str, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
        self(phrase, now, tz)
    }
}

/// A resolver that understands nothing; every phrase is unrecognized.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhrases;

impl PhraseResolver for NoPhrases {
    fn resolve_phrase(&self, _: &str, _: DateTime<Utc>, _: Tz) -> Option<DateTime<Utc>> {
        None
    }
}

/// Words that make a phrase describe two instants rather than one.
const RANGE_WORDS: [&str; 7] = ["between", "and", "to", "until", "till", "through", "thru"];

/// Resolve `phrase` through `resolver`.
///
/// # Errors
///
/// Returns [`ParseError::UnsupportedPhrase`] for a phrase describing a range
/// ("between 12 and 14", "monday to friday") without consulting the
/// resolver, and [`ParseError::UnrecognizedFormat`] when the resolver finds no
/// instant.
pub fn resolve_phrase<P>(
    resolver: &P,
    phrase: &str,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<DateTime<Utc>>
where
    P: PhraseResolver + ?Sized,
{
    let phrase = phrase.trim();
    if let Some(word) = range_word(phrase) {
        return Err(ParseError::unsupported(
            phrase,
            format!("'{word}' describes a range inside one phrase; only single instants are supported"),
        ));
    }

    resolver
        .resolve_phrase(phrase, now, tz)
        .ok_or_else(|| ParseError::unrecognized(phrase, "not a datetime, duration, range or known phrase"))
}

fn range_word(phrase: &str) -> Option<&'static str> {
    phrase
        .split_whitespace()
        .find_map(|word| {
            let word = word.to_lowercase();
            RANGE_WORDS.iter().copied().find(|r| *r == word)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 6, 26, 12, 0, 0).unwrap()
    }

    fn noon_stub(phrase: &str, now: DateTime<Utc>, _: Tz) -> Option<DateTime<Utc>> {
        (phrase == "noon").then_some(now)
    }

    #[test]
    fn test_delegates_to_resolver() {
        let t = resolve_phrase(&noon_stub, "noon", now(), chrono_tz::UTC).unwrap();
        assert_eq!(t, now());
    }

    #[test]
    fn test_none_is_unrecognized() {
        let err = resolve_phrase(&noon_stub, "teatime", now(), chrono_tz::UTC).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat);
        assert_eq!(err.token(), "teatime");

        let err = resolve_phrase(&NoPhrases, "noon", now(), chrono_tz::UTC).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat);
    }

    #[test]
    fn test_range_phrases_are_unsupported() {
        let called = std::cell::Cell::new(false);
        let spy = |_: &str, now: DateTime<Utc>, _: Tz| {
            called.set(true);
            Some(now)
        };
        for phrase in [
            "between 12 and 14",
            "last friday between 12 and 14",
            "Monday TO Friday",
            "from noon until 3pm",
        ] {
            let err = resolve_phrase(&spy, phrase, now(), chrono_tz::UTC).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedPhrase, "{phrase}");
        }
        assert!(!called.get());
    }

    #[test]
    fn test_trait_object_resolver() {
        let boxed: Box<dyn PhraseResolver> = Box::new(noon_stub);
        assert!(resolve_phrase(boxed.as_ref(), "noon", now(), chrono_tz::UTC).is_ok());
    }
}

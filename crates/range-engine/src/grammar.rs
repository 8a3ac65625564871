//! Formal shapes of the token grammars.
//!
//! Nothing here parses values. The detector uses these shapes to classify a
//! token, and the parsers re-use [`ABSOLUTE_PATTERN`] to pull out components
//! they then validate.
//!
//! # Absolute datetime
//!
//! `YYYY[-]MM[-]DD[T| ][HH[:MM[:SS]]][Z]`. The date is mandatory, missing time
//! components default to zero, and a trailing `Z` means UTC.
//!
//! # Duration
//!
//! `[Ny][NM][Nd][Nh][Nm][Ns]` in that order, at least one unit. `M` is months,
//! `m` is minutes. A bare integer is shorthand for minutes.

use std::sync::LazyLock;

use regex::Regex;

/// The separator used when neither a flag nor configuration names one.
pub const DEFAULT_SEPARATOR: &str = "/";

pub const ABSOLUTE_GRAMMAR: &str = "YYYY[-]MM[-]DD[T| ][HH[:MM[:SS]]][Z]";
pub const DURATION_GRAMMAR: &str = "[Ny][NM][Nd][Nh][Nm][Ns] (a bare number means minutes)";
pub const RANGE_GRAMMAR: &str = "<datetime><sep><datetime> or <datetime><sep>{+|-}<duration>";
pub const SEPARATOR_RULE: &str =
    "a non-empty string with at least one character outside 0-9 - : T Z y M d h m s + and whitespace";
pub const PHRASE_RULE: &str =
    "a phrase naming a single instant, e.g. \"last friday at 2pm\" (use a range for two instants)";
pub const ANY_GRAMMAR: &str =
    "a datetime (YYYY[-]MM[-]DD[T| ][HH[:MM[:SS]]][Z]), a duration ([Ny][NM][Nd][Nh][Nm][Ns]), a range, or a human-language phrase";

/// Unit symbols of the duration grammar, in canonical order.
pub const DURATION_UNITS: [char; 6] = ['y', 'M', 'd', 'h', 'm', 's'];

/// Characters that may occur inside an absolute-datetime or duration token.
pub const DISALLOWED_SEPARATOR_CHARS: [char; 12] =
    ['-', ':', 'T', 'Z', 'y', 'M', 'd', 'h', 'm', 's', '+', ' '];

/// Full-token shape of an absolute datetime, with named components.
pub static ABSOLUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<year>[0-9]{4})-?(?P<month>[0-9]{2})-?(?P<day>[0-9]{2})(?:[T ]?(?P<hour>[0-9]{2})(?::?(?P<minute>[0-9]{2})(?::?(?P<second>[0-9]{2}))?)?)?(?P<utc>Z)?$",
    )
    .expect("absolute datetime pattern compiles")
});

/// Whether `c` can occur inside a token of either grammar.
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || DISALLOWED_SEPARATOR_CHARS.contains(&c)
}

/// Whether `token` has the shape of an absolute datetime.
pub fn is_absolute_shaped(token: &str) -> bool {
    ABSOLUTE_PATTERN.is_match(token)
}

/// Whether `token` has the shape of a duration.
///
/// The shape is looser than the grammar: it admits a sign, fractional counts,
/// repeated or out-of-order units so that the duration parser can reject them
/// with a precise reason instead of the token falling through to the
/// human-language fallback.
pub fn is_duration_shaped(token: &str) -> bool {
    let body = token.strip_prefix(['+', '-']).unwrap_or(token);
    let Some(first) = body.chars().next() else {
        return false;
    };
    first.is_ascii_digit()
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || DURATION_UNITS.contains(&c))
}

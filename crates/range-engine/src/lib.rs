//! # range-engine
//!
//! Deterministic resolution of log-search time expressions.
//!
//! A user types a time expression next to a search query: an absolute
//! datetime, a compound duration reaching back from now, a range of two
//! datetimes, a datetime plus or minus a duration, or a human-language
//! phrase. This crate turns that expression into a concrete interval. It does
//! no I/O and reads no clock: the caller passes the reference "now", the
//! separator in effect and the timezone used for wall-clock datetimes.
//!
//! ## Modules
//!
//! - [`grammar`] — Token shapes, grammar descriptions, disallowed separator characters
//! - [`duration`] — `[Ny][NM][Nd][Nh][Nm][Ns]` → [`Duration`], calendar-aware arithmetic
//! - [`absolute`] — `YYYY[-]MM[-]DD[T| ][HH[:MM[:SS]]][Z]` → instant
//! - [`separator`] — Effective separator selection and validation
//! - [`detect`] — Range / duration / absolute / phrase classification
//! - [`phrase`] — The [`PhraseResolver`] seam for human-language phrases
//! - [`resolve`] — [`RangeResolver`], expression → [`ResolvedInterval`]
//! - [`zone`] — Wall-clock interpretation in the injected timezone
//! - [`error`] — Error types

pub mod absolute;
pub mod detect;
pub mod duration;
pub mod error;
pub mod grammar;
pub mod phrase;
pub mod resolve;
pub mod separator;
pub mod zone;

pub use absolute::parse_absolute;
pub use detect::{classify, detect, Detected, Format, TimeSpec};
pub use duration::{parse_duration, Duration, DurationUnit};
pub use error::{ErrorKind, ParseError};
pub use grammar::DEFAULT_SEPARATOR;
pub use phrase::{resolve_phrase, NoPhrases, PhraseResolver};
pub use resolve::{RangeResolver, ResolvedInterval, DEFAULT_WINDOW};
pub use separator::{effective_separator, validate_separator};
pub use zone::localize;

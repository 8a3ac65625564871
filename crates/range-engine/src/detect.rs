//! Format detection: which strategy resolves a raw token.

use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::grammar;

/// The raw halves of a time expression and the separator in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpec<'a> {
    pub left: &'a str,
    pub right: Option<&'a str>,
    pub separator: &'a str,
}

impl<'a> TimeSpec<'a> {
    /// Split `token` at the leftmost occurrence of `separator`.
    ///
    /// Halves are trimmed. A token without the separator has no right half.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedRange`] if the separator is present and
    /// either half is empty.
    pub fn split(token: &'a str, separator: &'a str) -> Result<Self> {
        let token = token.trim();
        let Some((left, right)) = token.split_once(separator) else {
            // Trimming the token also strips the padding of a padded separator
            // sitting at either edge: "2015-06-23 17:45 TO" with " TO ".
            let (head, tail) = (separator.trim_start(), separator.trim_end());
            if !tail.is_empty() && tail != separator && token.ends_with(tail) {
                return Err(ParseError::malformed(
                    token,
                    format!("nothing after separator '{separator}'"),
                ));
            }
            if !head.is_empty() && head != separator && token.starts_with(head) {
                return Err(ParseError::malformed(
                    token,
                    format!("nothing before separator '{separator}'"),
                ));
            }
            return Ok(Self {
                left: token,
                right: None,
                separator,
            });
        };

        let (left, right) = (left.trim(), right.trim());
        if left.is_empty() {
            return Err(ParseError::malformed(
                token,
                format!("nothing before separator '{separator}'"),
            ));
        }
        if right.is_empty() {
            return Err(ParseError::malformed(
                token,
                format!("nothing after separator '{separator}'"),
            ));
        }

        Ok(Self {
            left,
            right: Some(right),
            separator,
        })
    }

    pub fn is_range(&self) -> bool {
        self.right.is_some()
    }
}

/// Category of a single (non-range) token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    Duration,
    Absolute,
    HumanLanguage,
}

/// Classification of a whole time expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detected<'a> {
    Range(TimeSpec<'a>),
    Duration(&'a str),
    Absolute(&'a str),
    HumanLanguage(&'a str),
}

/// Classify a single token by shape.
///
/// Pure-digit tokens of a compact date length (`YYYYMMDD[HH[MM[SS]]]`) are
/// absolute datetimes; shorter or other-length digit runs are the bare-minutes
/// duration shorthand.
pub fn classify(token: &str) -> Format {
    if grammar::is_absolute_shaped(token) {
        Format::Absolute
    } else if grammar::is_duration_shaped(token) {
        Format::Duration
    } else {
        Format::HumanLanguage
    }
}

/// Classify a trimmed time expression given the active separator.
///
/// # Errors
///
/// Returns [`ParseError::UnrecognizedFormat`] for an empty token and
/// [`ParseError::MalformedRange`] when the separator leaves an empty half.
///
/// # Examples
///
/// ```
/// use range_engine::{detect, Detected};
///
/// assert!(matches!(detect("1h30m", "/").unwrap(), Detected::Duration(_)));
/// assert!(matches!(detect("2015-06-23/+15m", "/").unwrap(), Detected::Range(_)));
/// assert!(matches!(detect("yesterday", "/").unwrap(), Detected::HumanLanguage(_)));
/// ```
pub fn detect<'a>(token: &'a str, separator: &'a str) -> Result<Detected<'a>> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::unrecognized(token, "empty time expression"));
    }

    let spec = TimeSpec::split(token, separator)?;
    if spec.is_range() {
        return Ok(Detected::Range(spec));
    }

    Ok(match classify(spec.left) {
        Format::Duration => Detected::Duration(spec.left),
        Format::Absolute => Detected::Absolute(spec.left),
        Format::HumanLanguage => Detected::HumanLanguage(spec.left),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_detect_duration() {
        assert_eq!(detect("1h30m", "/").unwrap(), Detected::Duration("1h30m"));
        assert_eq!(detect(" 90 ", "/").unwrap(), Detected::Duration("90"));
    }

    #[test]
    fn test_detect_absolute() {
        assert_eq!(
            detect("2015-06-20 20:28", "/").unwrap(),
            Detected::Absolute("2015-06-20 20:28")
        );
        assert_eq!(detect("20150620", "/").unwrap(), Detected::Absolute("20150620"));
        // Invalid calendar values still have the absolute shape
        assert_eq!(detect("2015-13-40", "/").unwrap(), Detected::Absolute("2015-13-40"));
    }

    #[test]
    fn test_detect_human() {
        assert_eq!(
            detect("last friday at 2pm", "/").unwrap(),
            Detected::HumanLanguage("last friday at 2pm")
        );
    }

    #[test]
    fn test_detect_range_default_separator() {
        let Detected::Range(spec) =
            detect("2015-06-16T22:27:41/2015-06-18T22:27:41", "/").unwrap()
        else {
            panic!("expected a range");
        };
        assert_eq!(spec.left, "2015-06-16T22:27:41");
        assert_eq!(spec.right, Some("2015-06-18T22:27:41"));
        assert_eq!(spec.separator, "/");
    }

    #[test]
    fn test_detect_range_custom_separator_ignores_slash() {
        let Detected::Range(spec) =
            detect("2015-06-16T22:27:41 TO 2015-06-18T22:27:41", " TO ").unwrap()
        else {
            panic!("expected a range");
        };
        assert_eq!(spec.left, "2015-06-16T22:27:41");
        assert_eq!(spec.right, Some("2015-06-18T22:27:41"));

        // With a custom separator a slash is not a range marker
        assert!(matches!(
            detect("2015-06-16/2015-06-18", " TO ").unwrap(),
            Detected::HumanLanguage(_)
        ));
    }

    #[test]
    fn test_detect_splits_at_leftmost() {
        let Detected::Range(spec) = detect("a/b/c", "/").unwrap() else {
            panic!("expected a range");
        };
        assert_eq!(spec.left, "a");
        assert_eq!(spec.right, Some("b/c"));
    }

    #[test]
    fn test_detect_empty_halves() {
        assert_eq!(
            detect("2015-06-23/", "/").unwrap_err().kind(),
            ErrorKind::MalformedRange
        );
        assert_eq!(detect("/+15m", "/").unwrap_err().kind(), ErrorKind::MalformedRange);
        assert_eq!(detect(" / ", "/").unwrap_err().kind(), ErrorKind::MalformedRange);
    }

    #[test]
    fn test_detect_padded_separator_at_edge() {
        let err = detect("2015-06-23 17:45 TO ", " TO ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRange);
        assert!(err.to_string().contains("nothing after"), "got: {err}");

        let err = detect(" TO 2015-06-23", " TO ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRange);
        assert!(err.to_string().contains("nothing before"), "got: {err}");

        // The bare word inside a longer token is not a separator
        assert!(matches!(
            detect("PHOTO", " TO ").unwrap(),
            Detected::HumanLanguage("PHOTO")
        ));
    }

    #[test]
    fn test_detect_empty_token() {
        assert_eq!(detect("   ", "/").unwrap_err().kind(), ErrorKind::UnrecognizedFormat);
    }

    proptest! {
        #[test]
        fn prop_detection_is_total(token in "[ -~]{1,40}") {
            match detect(&token, "/") {
                Ok(_) => {}
                Err(e) => prop_assert!(matches!(
                    e.kind(),
                    ErrorKind::MalformedRange | ErrorKind::UnrecognizedFormat
                )),
            }
        }
    }
}

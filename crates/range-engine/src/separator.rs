//! Range separator selection and validation.

use crate::error::{ParseError, Result};
use crate::grammar::{self, DEFAULT_SEPARATOR};

/// The separator in effect: the explicit flag value, else the configured
/// value, else [`DEFAULT_SEPARATOR`].
pub fn effective_separator<'a>(flag: Option<&'a str>, configured: Option<&'a str>) -> &'a str {
    flag.or(configured).unwrap_or(DEFAULT_SEPARATOR)
}

/// Reject a separator that could occur inside a datetime or duration token.
///
/// A separator made only of token characters (digits, `-`, `:`, `T`, `Z`,
/// `y`, `M`, `d`, `h`, `m`, `s`, `+`, whitespace) can occur inside a token and
/// would split it. A separator with at least one character outside that set,
/// such as `/` or `" TO "`, never can.
///
/// # Errors
///
/// Returns [`ParseError::InvalidSeparator`] naming the clashing characters.
///
/// # Examples
///
/// ```
/// use range_engine::validate_separator;
///
/// assert!(validate_separator("/").is_ok());
/// assert!(validate_separator(" TO ").is_ok());
/// assert!(validate_separator(":").is_err());
/// ```
pub fn validate_separator(separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(ParseError::separator(separator, "separator is empty"));
    }

    if separator.chars().all(grammar::is_token_char) {
        let mut offending: Vec<String> = Vec::new();
        for c in separator.chars() {
            let shown = if c.is_whitespace() {
                format!("{c:?}")
            } else {
                format!("'{c}'")
            };
            if !offending.contains(&shown) {
                offending.push(shown);
            }
        }
        return Err(ParseError::separator(
            separator,
            format!(
                "clashes with datetime or duration notation (offending characters: {})",
                offending.join(", ")
            ),
        ));
    }

    Ok(())
}

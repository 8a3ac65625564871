//! Error types for time-expression resolution.

use thiserror::Error;

use crate::grammar;

/// A failed resolution. Every variant carries the offending token and the
/// reason it was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid separator '{separator}': {reason}")]
    InvalidSeparator { separator: String, reason: String },

    #[error("Invalid duration '{token}': {reason}")]
    InvalidDuration { token: String, reason: String },

    #[error("Invalid datetime '{token}': {reason}")]
    InvalidDatetime { token: String, reason: String },

    #[error("Unsupported phrase '{token}': {reason}")]
    UnsupportedPhrase { token: String, reason: String },

    #[error("Unrecognized format '{token}': {reason}")]
    UnrecognizedFormat { token: String, reason: String },

    #[error("Malformed range '{token}': {reason}")]
    MalformedRange { token: String, reason: String },
}

/// The kind of a [`ParseError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSeparator,
    InvalidDuration,
    InvalidDatetime,
    UnsupportedPhrase,
    UnrecognizedFormat,
    MalformedRange,
}

impl ParseError {
    pub(crate) fn separator(separator: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSeparator {
            separator: separator.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn duration(token: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn datetime(token: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDatetime {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(token: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedPhrase {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unrecognized(token: &str, reason: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSeparator { .. } => ErrorKind::InvalidSeparator,
            Self::InvalidDuration { .. } => ErrorKind::InvalidDuration,
            Self::InvalidDatetime { .. } => ErrorKind::InvalidDatetime,
            Self::UnsupportedPhrase { .. } => ErrorKind::UnsupportedPhrase,
            Self::UnrecognizedFormat { .. } => ErrorKind::UnrecognizedFormat,
            Self::MalformedRange { .. } => ErrorKind::MalformedRange,
        }
    }

    /// The offending substring (the separator, for separator errors).
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidSeparator { separator, .. } => separator,
            Self::InvalidDuration { token, .. }
            | Self::InvalidDatetime { token, .. }
            | Self::UnsupportedPhrase { token, .. }
            | Self::UnrecognizedFormat { token, .. }
            | Self::MalformedRange { token, .. } => token,
        }
    }

    /// The grammar the rejected input was expected to satisfy, for user-facing help.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::InvalidSeparator { .. } => grammar::SEPARATOR_RULE,
            Self::InvalidDuration { .. } => grammar::DURATION_GRAMMAR,
            Self::InvalidDatetime { .. } => grammar::ABSOLUTE_GRAMMAR,
            Self::UnsupportedPhrase { .. } => grammar::PHRASE_RULE,
            Self::UnrecognizedFormat { .. } => grammar::ANY_GRAMMAR,
            Self::MalformedRange { .. } => grammar::RANGE_GRAMMAR,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

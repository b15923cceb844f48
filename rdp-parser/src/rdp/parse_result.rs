//! Match results
//!
//! Every matcher reports one of three outcomes:
//!
//! - `Matched(value)`: input was consumed and `value` describes it
//! - `Unmatched`: nothing was consumed, the parser is exactly where it was
//! - `Error(ParseError)`: the input started like something the caller asked for but could not
//!   be completed (a sign without digits, an overflowing literal). The parser is restored as
//!   well, but ordered-choice retry is not the right recovery for it.
//!
//! Plain checks that can only succeed or fail return `bool`; see [`super::parser::Parser::check`].

use std::fmt;

use super::location::Location;
use super::parser::Parser;
use super::unit::CodeUnit;

/// A hard parse failure together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    location: Location,
    message: String,
}

impl ParseError {
    /// Creates an error at the parser's current position.
    pub fn new<U: CodeUnit>(parser: &Parser<'_, U>, message: impl Into<String>) -> Self {
        Self::at(parser.location(), message)
    }

    pub fn at(location: Location, message: impl Into<String>) -> Self {
        ParseError {
            location,
            message: message.into(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the error with the offending line and a caret under the column.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}^",
            self,
            self.location.line,
            " ".repeat(self.location.column)
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.location, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Outcome of a matcher or literal parser.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ParseResult<T> {
    Matched(T),
    Unmatched,
    Error(ParseError),
}

impl<T> ParseResult<T> {
    pub fn is_matched(&self) -> bool {
        matches!(self, ParseResult::Matched(_))
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, ParseResult::Unmatched)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ParseResult::Error(_))
    }

    /// The matched value.
    ///
    /// # Panics
    ///
    /// When the result is not `Matched`. Check with [`ParseResult::is_matched`] first.
    pub fn value(&self) -> &T {
        match self {
            ParseResult::Matched(value) => value,
            ParseResult::Unmatched => panic!("value() called on an unmatched parse result"),
            ParseResult::Error(error) => panic!("value() called on a parse error: {error}"),
        }
    }

    /// The error, if this is one.
    pub fn error(&self) -> Option<&ParseError> {
        match self {
            ParseResult::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Converts into an `Option`, dropping any error.
    pub fn matched(self) -> Option<T> {
        match self {
            ParseResult::Matched(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<R>(self, f: impl FnOnce(T) -> R) -> ParseResult<R> {
        match self {
            ParseResult::Matched(value) => ParseResult::Matched(f(value)),
            ParseResult::Unmatched => ParseResult::Unmatched,
            ParseResult::Error(error) => ParseResult::Error(error),
        }
    }

    /// Chains another matcher onto a successful match.
    pub fn and_then<R>(self, f: impl FnOnce(T) -> ParseResult<R>) -> ParseResult<R> {
        match self {
            ParseResult::Matched(value) => f(value),
            ParseResult::Unmatched => ParseResult::Unmatched,
            ParseResult::Error(error) => ParseResult::Error(error),
        }
    }

    /// Splits off hard errors so they can be propagated with `?`; `Unmatched` becomes `None`.
    pub fn into_result(self) -> Result<Option<T>, ParseError> {
        match self {
            ParseResult::Matched(value) => Ok(Some(value)),
            ParseResult::Unmatched => Ok(None),
            ParseResult::Error(error) => Err(error),
        }
    }
}

impl<T> Default for ParseResult<T> {
    fn default() -> Self {
        ParseResult::Unmatched
    }
}

impl<T> From<ParseError> for ParseResult<T> {
    fn from(error: ParseError) -> Self {
        ParseResult::Error(error)
    }
}

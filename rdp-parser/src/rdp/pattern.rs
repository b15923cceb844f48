//! Regular expression matching
//!
//! Patterns run on the input from the current offset and must match right there; a match
//! further ahead does not count. Like every other run matcher, an empty match is reported as
//! `Unmatched`, so `[a-z]*` in front of a digit fails instead of succeeding without progress.
//!
//! Byte parsers (`Parser<u8>`) match with [`regex::bytes::Regex`] directly on the input.
//! Parsers over `char` use [`regex::Regex`]; each attempt copies the rest of the input into a
//! `String` and converts the match end back to a count of chars. `u16` and `u32` parsers have
//! no regex support.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use super::parse_result::ParseResult;
use super::parser::Parser;

/// `[a-zA-Z_][a-zA-Z0-9\-_]*`, the identifier shape used by configuration style formats.
static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[a-zA-Z_][a-zA-Z0-9\-_]*").unwrap());

impl<'a> Parser<'a, u8> {
    /// Compiles `pattern` and matches it at the current offset.
    ///
    /// An invalid pattern is a hard error rather than `Unmatched`; it is a mistake in the caller,
    /// not in the input.
    pub fn match_regex(&mut self, pattern: &str) -> ParseResult<&'a [u8]> {
        match Regex::new(&format!(r"\A(?:{pattern})")) {
            Ok(regex) => self.match_pattern(&regex),
            Err(e) => {
                log::debug!("invalid pattern {pattern:?}: {e}");
                self.error(format!("Invalid regular expression: {e}")).into()
            }
        }
    }

    /// Matches an already compiled regex at the current offset.
    ///
    /// `regex` should start with `\A`. The search itself is not anchored, so without it a
    /// failed attempt scans the rest of the input before being rejected. `match_regex`
    /// adds the anchor for you.
    pub fn match_pattern(&mut self, regex: &Regex) -> ParseResult<&'a [u8]> {
        match regex.find(self.remaining()) {
            Some(found) if found.start() == 0 => self.take(found.end()),
            _ => ParseResult::Unmatched,
        }
    }

    /// Matches an identifier: a letter or `_`, then letters, digits, `-` or `_`.
    pub fn match_identifier(&mut self) -> ParseResult<&'a [u8]> {
        self.match_pattern(&IDENTIFIER_REGEX)
    }
}

impl<'a> Parser<'a, char> {
    /// Compiles `pattern` and matches it at the current offset.
    pub fn match_regex(&mut self, pattern: &str) -> ParseResult<&'a [char]> {
        match regex::Regex::new(&format!(r"\A(?:{pattern})")) {
            Ok(regex) => self.match_pattern(&regex),
            Err(e) => {
                log::debug!("invalid pattern {pattern:?}: {e}");
                self.error(format!("Invalid regular expression: {e}")).into()
            }
        }
    }

    /// Matches an already compiled regex at the current offset. Should start with `\A`.
    pub fn match_pattern(&mut self, regex: &regex::Regex) -> ParseResult<&'a [char]> {
        let text: String = self.remaining().iter().collect();
        match regex.find(&text) {
            Some(found) if found.start() == 0 => {
                let len = text[..found.end()].chars().count();
                self.take(len)
            }
            _ => ParseResult::Unmatched,
        }
    }
}

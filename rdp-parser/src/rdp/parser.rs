//! Parser cursor
//!
//! [`Parser`] borrows a slice of code units and keeps a single offset into it. Everything else
//! in this crate is built on the primitives here.
//!
//! Method naming:
//!
//! - `check*`  test for a unit or literal at the current position; consume it and return `true`
//!             on success, leave the parser untouched and return `false` otherwise
//! - `skip*`   consume zero or more units; always succeeds
//! - `match*`  consume a non-empty run and return it as a [`ParseResult`]. An empty run is
//!             reported as `Unmatched`, so a loop retrying a matcher always makes progress
//! - `parse*`  (see [`super::numeric`]) match and convert the run into a value
//!
//! Nothing moves the offset on failure. Multi-step alternatives that need to abandon
//! already-successful matches can use [`Parser::scoped`] or save [`Parser::offset`] and
//! [`Parser::jump`] back.

use super::location::Location;
use super::parse_result::{ParseError, ParseResult};
use super::scoped_state::ScopedState;
use super::unit::CodeUnit;

/// What a `match_until*` call does when no stop unit occurs before end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofMode {
    /// The match fails and nothing is consumed.
    #[default]
    Fail,
    /// The rest of the input is the match.
    Match,
}

/// A cursor over a fixed input of code units.
#[derive(Debug, Clone)]
pub struct Parser<'a, U: CodeUnit = u8> {
    input: &'a [U],
    offset: usize,
    filename: Option<&'a str>,
}

impl<'a> Parser<'a, u8> {
    /// A byte parser over UTF-8 text.
    pub fn from_text(text: &'a str) -> Self {
        Parser::new(text.as_bytes())
    }
}

impl<'a> From<&'a str> for Parser<'a, u8> {
    fn from(text: &'a str) -> Self {
        Parser::from_text(text)
    }
}

impl<'a, U: CodeUnit> Parser<'a, U> {
    pub fn new(input: &'a [U]) -> Self {
        Parser {
            input,
            offset: 0,
            filename: None,
        }
    }

    /// Attaches a filename, reported in locations and errors.
    pub fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    pub fn filename(&self) -> Option<&'a str> {
        self.filename
    }

    /// The whole input.
    pub fn input(&self) -> &'a [U] {
        self.input
    }

    /// The input from the current offset on.
    pub fn remaining(&self) -> &'a [U] {
        &self.input[self.offset..]
    }

    pub fn size(&self) -> usize {
        self.input.len()
    }

    pub fn remaining_size(&self) -> usize {
        self.input.len() - self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn eof(&self) -> bool {
        self.offset == self.input.len()
    }

    pub fn bof(&self) -> bool {
        self.offset == 0
    }

    /// The unit at the current offset.
    ///
    /// # Panics
    ///
    /// At end of input. Use [`Parser::peek`] when that is possible.
    pub fn current(&self) -> U {
        assert!(!self.eof(), "current() called at end of input");
        self.input[self.offset]
    }

    pub fn peek(&self) -> Option<U> {
        self.input.get(self.offset).copied()
    }

    /// Moves one unit forward. Returns `false` at end of input.
    pub fn advance(&mut self) -> bool {
        if self.eof() {
            return false;
        }

        self.offset += 1;
        true
    }

    /// Moves `count` units forward, or not at all if fewer remain.
    pub fn advance_by(&mut self, count: usize) -> bool {
        if count > self.remaining_size() {
            return false;
        }

        self.offset += count;
        true
    }

    pub fn advance_to_end(&mut self) {
        self.offset = self.input.len();
    }

    /// Moves one unit back. Returns `false` at beginning of input.
    pub fn reverse(&mut self) -> bool {
        if self.bof() {
            return false;
        }

        self.offset -= 1;
        true
    }

    /// Repositions the parser.
    ///
    /// # Panics
    ///
    /// When `offset` is past the end of the input.
    pub fn jump(&mut self, offset: usize) {
        assert!(
            offset <= self.input.len(),
            "jump({offset}) beyond input of size {}",
            self.input.len()
        );
        self.offset = offset;
    }

    /// Starts a guarded attempt; the offset is restored on drop unless accepted.
    pub fn scoped(&mut self) -> ScopedState<'_, 'a, U> {
        ScopedState::new(self)
    }

    /// The units between `start` and the current offset.
    pub fn slice_from(&self, start: usize) -> &'a [U] {
        &self.input[start.min(self.offset)..self.offset]
    }

    /// A sub-range of the input, independent of the current offset.
    pub fn get_range(&self, begin: usize, end: usize) -> ParseResult<&'a [U]> {
        if end <= begin {
            return self.error("End <= Begin.").into();
        }

        if end > self.input.len() {
            return self.error("Index out of range.").into();
        }

        ParseResult::Matched(&self.input[begin..end])
    }

    pub fn location(&self) -> Location {
        Location::locate(self.input, self.offset, self.filename)
    }

    /// A [`ParseError`] at the current position.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self, message)
    }

    pub fn check(&mut self, unit: U) -> bool {
        self.check_by(|u| u == unit)
    }

    /// Consumes the current unit if it is any of `units`.
    pub fn check_any(&mut self, units: &[U]) -> bool {
        self.check_by(|u| units.contains(&u))
    }

    /// Consumes `literal` if the input continues with all of it.
    pub fn check_literal(&mut self, literal: &[U]) -> bool {
        if !self.peek_literal(literal) {
            return false;
        }

        self.offset += literal.len();
        true
    }

    /// Like [`Parser::check_literal`], with the literal encoded to this parser's unit width.
    pub fn check_str(&mut self, literal: &str) -> bool {
        self.check_literal(&U::encode(literal))
    }

    /// Like [`Parser::check_str`], comparing ASCII letters case-insensitively.
    pub fn check_ignore_ascii_case(&mut self, literal: &str) -> bool {
        let rest = self.remaining();
        let len = literal.len();

        if !literal.is_ascii() || rest.len() < len {
            return false;
        }

        let equal = rest
            .iter()
            .zip(literal.bytes())
            .all(|(&u, b)| u.to_ascii().is_some_and(|a| a.eq_ignore_ascii_case(&b)));

        if equal {
            self.offset += len;
        }

        equal
    }

    /// Whether the input continues with `literal`, without consuming it.
    pub fn peek_literal(&self, literal: &[U]) -> bool {
        self.remaining().starts_with(literal)
    }

    /// Consumes all consecutive occurrences of `unit`; returns how many.
    pub fn skip(&mut self, unit: U) -> usize {
        self.skip_while(|u| u == unit)
    }

    pub fn skip_any(&mut self, units: &[U]) -> usize {
        self.skip_while(|u| units.contains(&u))
    }

    /// Advances until the current unit is `unit` or end of input; the stop unit is not consumed.
    pub fn skip_until(&mut self, unit: U) -> usize {
        self.skip_while(|u| u != unit)
    }

    pub fn skip_until_any(&mut self, units: &[U]) -> usize {
        self.skip_while(|u| !units.contains(&u))
    }

    /// Consumes units while `pred` holds; returns how many.
    pub fn skip_while(&mut self, pred: impl Fn(U) -> bool) -> usize {
        let len = self.remaining().iter().take_while(|&&u| pred(u)).count();
        self.offset += len;
        len
    }

    /// Matches everything up to, not including, the first `unit`.
    pub fn match_until(&mut self, unit: U, mode: EofMode) -> ParseResult<&'a [U]> {
        self.match_until_by(mode, |u| u == unit)
    }

    /// Matches everything up to the earliest occurrence of any of `units`.
    pub fn match_until_any(&mut self, units: &[U], mode: EofMode) -> ParseResult<&'a [U]> {
        self.match_until_by(mode, |u| units.contains(&u))
    }

    /// Matches everything up to, not including, the first occurrence of `literal`.
    pub fn match_until_literal(&mut self, literal: &[U], mode: EofMode) -> ParseResult<&'a [U]> {
        if literal.is_empty() {
            return ParseResult::Unmatched;
        }

        let rest = self.remaining();
        let end = match rest.windows(literal.len()).position(|w| w == literal) {
            Some(end) => end,
            None if mode == EofMode::Match => rest.len(),
            None => return ParseResult::Unmatched,
        };

        self.take(end)
    }

    pub fn match_until_str(&mut self, literal: &str, mode: EofMode) -> ParseResult<&'a [U]> {
        self.match_until_literal(&U::encode(literal), mode)
    }

    /// Matches the longest run of units that are all in `units`.
    pub fn match_each(&mut self, units: &[U]) -> ParseResult<&'a [U]> {
        self.match_with(|u| units.contains(&u))
    }

    /// Matches the longest run of units accepted by `pred`.
    pub fn match_with(&mut self, pred: impl Fn(U) -> bool) -> ParseResult<&'a [U]> {
        let len = self.remaining().iter().take_while(|&&u| pred(u)).count();
        self.take(len)
    }

    /// Matches the longest run accepted by `pred`, which also receives the unit's index
    /// within the run (not the absolute offset).
    pub fn match_indexed(&mut self, pred: impl Fn(U, usize) -> bool) -> ParseResult<&'a [U]> {
        let len = self
            .remaining()
            .iter()
            .enumerate()
            .take_while(|&(i, &u)| pred(u, i))
            .count();
        self.take(len)
    }

    fn check_by(&mut self, pred: impl Fn(U) -> bool) -> bool {
        match self.peek() {
            Some(u) if pred(u) => {
                self.offset += 1;
                true
            }
            _ => false,
        }
    }

    fn match_until_by(&mut self, mode: EofMode, is_stop: impl Fn(U) -> bool) -> ParseResult<&'a [U]> {
        let rest = self.remaining();
        let end = match rest.iter().position(|&u| is_stop(u)) {
            Some(end) => end,
            None if mode == EofMode::Match => rest.len(),
            None => return ParseResult::Unmatched,
        };

        self.take(end)
    }

    /// Consumes `len` units as a match; an empty run is unmatched.
    pub(crate) fn take(&mut self, len: usize) -> ParseResult<&'a [U]> {
        if len == 0 {
            return ParseResult::Unmatched;
        }

        let start = self.offset;
        self.offset += len;
        ParseResult::Matched(&self.input[start..self.offset])
    }
}

pub fn eof<U: CodeUnit>(parser: &Parser<'_, U>) -> bool {
    parser.eof()
}

pub fn bof<U: CodeUnit>(parser: &Parser<'_, U>) -> bool {
    parser.bof()
}

pub fn current<U: CodeUnit>(parser: &Parser<'_, U>) -> U {
    parser.current()
}

pub fn offset<U: CodeUnit>(parser: &Parser<'_, U>) -> usize {
    parser.offset()
}

pub fn filename<'a, U: CodeUnit>(parser: &Parser<'a, U>) -> Option<&'a str> {
    parser.filename()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_reverse_eof_bof_current() {
        let mut parser = Parser::from_text("123");
        assert!(!eof(&parser));
        assert!(bof(&parser));
        assert!(!parser.reverse());
        assert!(bof(&parser));
        assert_eq!(current(&parser), b'1');

        assert!(parser.advance());
        assert_eq!(current(&parser), b'2');
        assert!(parser.advance());
        assert_eq!(current(&parser), b'3');
        assert!(parser.advance());
        assert!(eof(&parser));
        assert!(!bof(&parser));
        assert!(!parser.advance());
        assert!(eof(&parser));

        assert!(parser.reverse());
        assert_eq!(current(&parser), b'3');
        assert!(parser.reverse());
        assert_eq!(current(&parser), b'2');
        assert!(parser.reverse());
        assert!(bof(&parser));
        assert_eq!(current(&parser), b'1');
        assert!(!parser.reverse());
        assert!(bof(&parser));
    }

    #[test]
    #[should_panic(expected = "end of input")]
    fn test_current_at_eof_panics() {
        let mut parser = Parser::from_text("x");
        parser.advance_to_end();
        let _ = parser.current();
    }

    #[test]
    #[should_panic(expected = "beyond input")]
    fn test_jump_past_end_panics() {
        let mut parser = Parser::from_text("xy");
        parser.jump(3);
    }

    #[test]
    fn test_empty_input_is_both_bof_and_eof() {
        let mut parser = Parser::from_text("");
        assert!(parser.eof() && parser.bof());
        assert_eq!(parser.peek(), None);
        assert!(!parser.advance());
        assert!(!parser.reverse());
        assert!(parser.match_until(b'x', EofMode::Match).is_unmatched());
    }

    #[test]
    fn test_advance_by_is_all_or_nothing() {
        let mut parser = Parser::from_text("abcd");
        assert!(parser.advance_by(3));
        assert_eq!(parser.offset(), 3);
        assert!(!parser.advance_by(2));
        assert_eq!(parser.offset(), 3);
        assert!(parser.advance_by(1));
        assert!(parser.eof());
    }

    #[test]
    fn test_offset_check_char() {
        let mut parser = Parser::from_text("123");
        assert_eq!(offset(&parser), 0);
        assert!(parser.check(b'1'));
        assert_eq!(offset(&parser), 1);
        assert!(!parser.check(b'1'));
        assert_eq!(offset(&parser), 1);
        assert!(parser.check(b'2'));
        assert!(parser.check(b'3'));
        assert!(!parser.check(b'3'));
        assert_eq!(offset(&parser), 3);
    }

    #[test]
    fn test_check_any() {
        let mut parser = Parser::from_text("+-x");
        assert!(parser.check_any(b"+-"));
        assert!(parser.check_any(b"+-"));
        assert!(!parser.check_any(b"+-"));
        assert_eq!(parser.offset(), 2);
    }

    #[test]
    fn test_offset_check_string() {
        let mut parser = Parser::from_text("123");
        assert!(!parser.check_str("13"));
        assert_eq!(parser.offset(), 0);
        assert!(parser.check_str("12"));
        assert_eq!(parser.offset(), 2);
        assert!(!parser.check_str("34"));
        assert_eq!(parser.offset(), 2);
        assert!(parser.check_str("3"));
        assert_eq!(parser.offset(), 3);
    }

    #[test]
    fn test_check_literal_longer_than_input() {
        let mut parser = Parser::from_text("ab");
        assert!(!parser.check_literal(b"abc"));
        assert_eq!(parser.offset(), 0);
        assert!(parser.peek_literal(b"ab"));
        assert_eq!(parser.offset(), 0);
    }

    #[test]
    fn test_check_ignore_ascii_case() {
        let mut parser = Parser::from_text("TrUe!");
        assert!(!parser.check_ignore_ascii_case("false"));
        assert!(parser.check_ignore_ascii_case("true"));
        assert_eq!(parser.offset(), 4);
    }

    #[test]
    fn test_offset_skip() {
        let mut parser = Parser::from_text("111122223333");
        assert_eq!(parser.skip(b'2'), 0);
        assert_eq!(parser.offset(), 0);
        assert_eq!(parser.skip(b'1'), 4);
        assert_eq!(parser.offset(), 4);
        parser.skip(b'1');
        assert_eq!(parser.offset(), 4);
        parser.skip(b'2');
        assert_eq!(parser.offset(), 8);
        parser.skip(b'3');
        assert_eq!(parser.offset(), 12);
    }

    #[test]
    fn test_skip_any() {
        let mut parser = Parser::from_text(" \t \nx");
        assert_eq!(parser.skip_any(b" \t"), 3);
        assert_eq!(parser.current(), b'\n');
    }

    #[test]
    fn test_offset_skip_until() {
        let mut parser = Parser::from_text("111122223333");
        parser.skip_until(b'1');
        assert_eq!(parser.offset(), 0);
        parser.skip_until(b'2');
        assert_eq!(parser.offset(), 4);
        parser.skip_until(b'2');
        assert_eq!(parser.offset(), 4);
        parser.skip_until(b'3');
        assert_eq!(parser.offset(), 8);
        parser.skip_until(b'4');
        assert!(parser.eof());
    }

    #[test]
    fn test_skip_until_any() {
        let mut parser = Parser::from_text("abc;def,ghi");
        parser.skip_until_any(b",;");
        assert_eq!(parser.offset(), 3);
    }

    #[test]
    fn test_offset_match_until() {
        let mut parser = Parser::from_text("111122223333");
        assert_eq!(
            parser.match_until(b'2', EofMode::Fail),
            ParseResult::Matched(&b"1111"[..])
        );
        assert_eq!(parser.remaining_size(), 8);
        assert_eq!(
            parser.match_until(b'3', EofMode::default()),
            ParseResult::Matched(&b"2222"[..])
        );
        assert!(parser.match_until(b'4', EofMode::Fail).is_unmatched());
        assert_eq!(parser.offset(), 8);
        assert_eq!(
            parser.match_until(b'4', EofMode::Match),
            ParseResult::Matched(&b"3333"[..])
        );
        assert!(parser.eof());
    }

    #[test]
    fn test_match_until_at_stop_unit_is_unmatched() {
        let mut parser = Parser::from_text("\"quoted\"");
        assert!(parser.match_until(b'"', EofMode::Match).is_unmatched());
        assert_eq!(parser.offset(), 0);
        assert!(parser.check(b'"'));
        assert_eq!(*parser.match_until(b'"', EofMode::Fail).value(), b"quoted");
    }

    #[test]
    fn test_match_until_any_takes_earliest_stop() {
        let mut parser = Parser::from_text("key=value;rest");
        assert_eq!(
            parser.match_until_any(b";=", EofMode::Fail),
            ParseResult::Matched(&b"key"[..])
        );
    }

    #[test]
    fn test_offset_match_until_string() {
        let mut parser = Parser::from_text("112233abc123");
        assert_eq!(*parser.match_until_str("abc", EofMode::Fail).value(), b"112233");
        assert_eq!(*parser.match_until_str("23", EofMode::Fail).value(), b"abc1");
        assert!(parser.match_until_str("23", EofMode::Fail).is_unmatched());
        assert!(parser.match_until_str("zz", EofMode::Fail).is_unmatched());
        assert_eq!(parser.offset(), 10);
        assert_eq!(*parser.match_until_str("zz", EofMode::Match).value(), b"23");
    }

    #[test]
    fn test_match_each() {
        let mut parser = Parser::from_text("1213414adbdcacd55658758");
        assert_eq!(*parser.match_each(b"1234").value(), b"1213414");
        assert!(parser.match_each(b"1234").is_unmatched());
        assert_eq!(*parser.match_each(b"abcd").value(), b"adbdcacd");
        assert_eq!(*parser.match_each(b"5678").value(), b"55658758");
        assert!(parser.match_each(b"5678").is_unmatched());
    }

    #[test]
    fn test_offset_match_pred() {
        let mut parser = Parser::from_text("1234abcd5678");
        assert!(parser.match_with(|c| c.is_ascii_alphabetic()).is_unmatched());
        assert_eq!(*parser.match_with(|c| c.is_ascii_digit()).value(), b"1234");
        assert_eq!(*parser.match_with(|c| c.is_ascii_alphabetic()).value(), b"abcd");
        assert!(parser.match_with(|c| c.is_ascii_alphabetic()).is_unmatched());
        assert_eq!(*parser.match_with(|c| c.is_ascii_digit()).value(), b"5678");
    }

    #[test]
    fn test_offset_match_pred_indexed() {
        let mut parser = Parser::from_text("1a2b3c4d");
        let letter_first = |c: u8, i: usize| {
            if i % 2 == 0 {
                c.is_ascii_alphabetic()
            } else {
                c.is_ascii_digit()
            }
        };
        assert!(parser.match_indexed(letter_first).is_unmatched());

        let digit_first = |c: u8, i: usize| {
            if i % 2 == 0 {
                c.is_ascii_digit()
            } else {
                c.is_ascii_alphabetic()
            }
        };
        assert_eq!(*parser.match_indexed(digit_first).value(), b"1a2b3c4d");
    }

    #[test]
    fn test_match_indexed_index_is_relative_to_run() {
        let mut parser = Parser::from_text("xx12");
        parser.advance_by(2);
        let result = parser.match_indexed(|_, i| i < 1);
        assert_eq!(*result.value(), b"1");
    }

    #[test]
    fn test_get_range() {
        let parser = Parser::from_text("abcdef");
        assert_eq!(*parser.get_range(1, 3).value(), b"bc");
        assert_eq!(*parser.get_range(0, 6).value(), b"abcdef");
        assert!(parser.get_range(3, 3).is_error());
        assert!(parser.get_range(2, 7).is_error());
    }

    #[test]
    fn test_slice_from() {
        let mut parser = Parser::from_text("abcdef");
        parser.advance_by(4);
        assert_eq!(parser.slice_from(1), b"bcd");
        assert_eq!(parser.slice_from(9), b"");
    }

    #[test]
    fn test_wide_units() {
        let text: Vec<u16> = "ab,cd".encode_utf16().collect();
        let mut parser = Parser::new(&text[..]);
        let comma = u16::from(b',');
        let first = parser.match_until(comma, EofMode::Fail);
        assert_eq!(first.value().len(), 2);
        assert!(parser.check(comma));
        assert_eq!(parser.match_until(comma, EofMode::Match).value().len(), 2);
    }

    #[test]
    fn test_char_units() {
        let text: Vec<char> = "größe=1".chars().collect();
        let mut parser = Parser::new(&text[..]);
        assert_eq!(*parser.match_with(|c| c.is_alphabetic()).value(), ['g', 'r', 'ö', 'ß', 'e']);
        assert!(parser.check_str("="));
        assert_eq!(parser.remaining(), ['1']);
    }

    #[test]
    fn test_location_and_filename() {
        let mut parser = Parser::from_text("a\nbc").with_filename("x.txt");
        assert_eq!(filename(&parser), Some("x.txt"));
        parser.skip_until(b'c');
        let loc = parser.location();
        assert_eq!((loc.line_number, loc.column), (1, 1));
        assert_eq!(loc.line, "bc");
    }
}

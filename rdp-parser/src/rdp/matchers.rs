//! Character-class matchers
//!
//! Free functions composing the [`Parser`] primitives for the classes hand-written parsers
//! keep reaching for: whitespace, newlines and ASCII letter/digit runs. Classes are ASCII
//! only, for every unit width.

use super::parse_result::ParseResult;
use super::parser::Parser;
use super::unit::CodeUnit;

fn is_blank<U: CodeUnit>(u: U) -> bool {
    u.is_ascii_byte(b' ') || u.is_ascii_byte(b'\t')
}

fn is_blank_or_newline<U: CodeUnit>(u: U) -> bool {
    is_blank(u) || u.is_ascii_byte(b'\r') || u.is_ascii_byte(b'\n')
}

/// Consumes one space or tab.
pub fn check_whitespace<U: CodeUnit>(parser: &mut Parser<'_, U>) -> bool {
    parser.check_any(&[U::from_ascii(b' '), U::from_ascii(b'\t')])
}

/// Consumes a `\n` or `\r\n` line ending; a lone `\r` is not consumed.
pub fn check_newline<U: CodeUnit>(parser: &mut Parser<'_, U>) -> bool {
    if parser.check(U::from_ascii(b'\n')) {
        return true;
    }

    parser.check_literal(&[U::from_ascii(b'\r'), U::from_ascii(b'\n')])
}

/// Skips spaces and tabs.
pub fn skip_whitespace<U: CodeUnit>(parser: &mut Parser<'_, U>) -> usize {
    parser.skip_while(is_blank)
}

/// Skips spaces, tabs, `\r` and `\n`.
pub fn skip_whitespace_and_newline<U: CodeUnit>(parser: &mut Parser<'_, U>) -> usize {
    parser.skip_while(is_blank_or_newline)
}

/// Skips to the next `\n`, leaving it unconsumed.
pub fn skip_until_newline<U: CodeUnit>(parser: &mut Parser<'_, U>) -> usize {
    parser.skip_until(U::from_ascii(b'\n'))
}

/// Skips a byte order marker at the very start of the input.
///
/// The marker is U+FEFF in the parser's unit width, so `EF BB BF` for byte input. Anywhere
/// else, or when absent, this does nothing.
pub fn skip_byte_order_marker<U: CodeUnit>(parser: &mut Parser<'_, U>) -> bool {
    parser.bof() && parser.check_str("\u{feff}")
}

/// Matches `[a-zA-Z]+`.
pub fn match_alpha<'a, U: CodeUnit>(parser: &mut Parser<'a, U>) -> ParseResult<&'a [U]> {
    parser.match_with(U::is_alpha)
}

/// Matches `[0-9]+`.
pub fn match_digit<'a, U: CodeUnit>(parser: &mut Parser<'a, U>) -> ParseResult<&'a [U]> {
    parser.match_with(U::is_decimal_digit)
}

/// Matches `-?[0-9]+`. A lone `-` is unmatched.
pub fn match_signed_digit<'a, U: CodeUnit>(parser: &mut Parser<'a, U>) -> ParseResult<&'a [U]> {
    let mut state = parser.scoped();
    let _ = state.check(U::from_ascii(b'-'));

    if match_digit(&mut state).is_unmatched() {
        return ParseResult::Unmatched;
    }

    let run = state.consumed();
    state.accept();
    ParseResult::Matched(run)
}

/// Matches `[a-zA-Z0-9]+`.
pub fn match_alnum<'a, U: CodeUnit>(parser: &mut Parser<'a, U>) -> ParseResult<&'a [U]> {
    parser.match_with(U::is_alnum)
}

/// Matches `[01]+`.
pub fn match_binary<'a, U: CodeUnit>(parser: &mut Parser<'a, U>) -> ParseResult<&'a [U]> {
    parser.match_with(|u| u.is_ascii_byte(b'0') || u.is_ascii_byte(b'1'))
}

/// Matches `[0-9a-fA-F]+`.
pub fn match_hexadecimal<'a, U: CodeUnit>(parser: &mut Parser<'a, U>) -> ParseResult<&'a [U]> {
    parser.match_with(U::is_hex_digit)
}

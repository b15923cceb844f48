//! Literal parsers
//!
//! Compositions of the matchers that convert what they consume into a value. They follow one
//! policy for failure:
//!
//! - no sign, prefix or digit at the current position: `Unmatched`
//! - a sign or prefix that is not followed by digits: `Error`
//! - a digit run that does not fit the target type: `Error`
//!
//! In every non-matched case the parser is back where the call started. Errors point at the
//! position where the digits were expected.

use uuid::Uuid;

use super::matchers::{match_binary, match_digit, match_hexadecimal};
use super::parse_result::ParseResult;
use super::parser::Parser;
use super::unit::CodeUnit;

/// Folds a digit run into an unsigned value, `None` on overflow.
fn accumulate<U: CodeUnit>(digits: &[U], radix: u32) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, &u| {
        let digit = u.digit_value(radix)?;
        acc.checked_mul(u64::from(radix))?
            .checked_add(u64::from(digit))
    })
}

/// Like [`accumulate`], building the negative value directly so `i64::MIN` fits.
fn accumulate_signed<U: CodeUnit>(digits: &[U], negative: bool) -> Option<i64> {
    digits.iter().try_fold(0i64, |acc, &u| {
        let digit = i64::from(u.digit_value(10)?);
        let acc = acc.checked_mul(10)?;
        if negative {
            acc.checked_sub(digit)
        } else {
            acc.checked_add(digit)
        }
    })
}

/// Parses `-?[0-9]+` into an `i64`.
pub fn parse_decimal_signed<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<i64> {
    let mut state = parser.scoped();
    let negative = state.check(U::from_ascii(b'-'));
    let digits_start = state.offset();

    let digits = match match_digit(&mut state) {
        ParseResult::Matched(digits) => digits,
        _ if negative => {
            log::debug!("no digits after '-' at offset {digits_start}");
            return state.error("Expected digits after '-'.").into();
        }
        _ => return ParseResult::Unmatched,
    };

    match accumulate_signed(digits, negative) {
        Some(value) => {
            state.accept();
            ParseResult::Matched(value)
        }
        None => {
            state.jump(digits_start);
            log::debug!("decimal literal out of range at offset {digits_start}");
            state.error("Decimal value out of range for a signed 64-bit integer.").into()
        }
    }
}

/// Parses `[0-9]+` into a `u64`.
pub fn parse_decimal_unsigned<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<u64> {
    parse_unsigned_run(parser, match_digit, 10, "Decimal")
}

/// Parses `[01]+` into a `u64`, most significant digit first.
pub fn parse_binary<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<u64> {
    parse_unsigned_run(parser, match_binary, 2, "Binary")
}

/// Parses `prefix[01]+`, e.g. with `"0b"`.
pub fn parse_binary_prefixed<U: CodeUnit>(
    parser: &mut Parser<'_, U>,
    prefix: &str,
) -> ParseResult<u64> {
    parse_prefixed(parser, prefix, parse_binary)
}

/// Parses `[0-9a-fA-F]+` into a `u64`.
pub fn parse_hexadecimal<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<u64> {
    parse_unsigned_run(parser, match_hexadecimal, 16, "Hexadecimal")
}

/// Parses `prefix[0-9a-fA-F]+`, e.g. with `"0x"`.
pub fn parse_hexadecimal_prefixed<U: CodeUnit>(
    parser: &mut Parser<'_, U>,
    prefix: &str,
) -> ParseResult<u64> {
    parse_prefixed(parser, prefix, parse_hexadecimal)
}

fn parse_unsigned_run<'a, U: CodeUnit>(
    parser: &mut Parser<'a, U>,
    matcher: fn(&mut Parser<'a, U>) -> ParseResult<&'a [U]>,
    radix: u32,
    kind: &str,
) -> ParseResult<u64> {
    let mut state = parser.scoped();
    let digits_start = state.offset();

    let ParseResult::Matched(digits) = matcher(&mut state) else {
        return ParseResult::Unmatched;
    };

    match accumulate(digits, radix) {
        Some(value) => {
            state.accept();
            ParseResult::Matched(value)
        }
        None => {
            state.jump(digits_start);
            log::debug!("{kind} literal out of range at offset {digits_start}");
            state
                .error(format!("{kind} value out of range for an unsigned 64-bit integer."))
                .into()
        }
    }
}

fn parse_prefixed<U: CodeUnit>(
    parser: &mut Parser<'_, U>,
    prefix: &str,
    parse_digits: fn(&mut Parser<'_, U>) -> ParseResult<u64>,
) -> ParseResult<u64> {
    let mut state = parser.scoped();

    if !state.check_str(prefix) {
        return ParseResult::Unmatched;
    }

    match parse_digits(&mut state) {
        ParseResult::Matched(value) => {
            state.accept();
            ParseResult::Matched(value)
        }
        ParseResult::Unmatched => {
            log::debug!("no digits after prefix '{prefix}' at offset {}", state.offset());
            state.error(format!("Expected digits after '{prefix}'.")).into()
        }
        error => error,
    }
}

/// Parses a floating point literal into an `f64`.
///
/// Accepts an optional sign, digits, then a fraction (`.` and digits) and/or an exponent
/// (`e` or `E`, optional sign, digits). At least one of fraction and exponent is required, so
/// plain integers are left for [`parse_decimal_signed`]. A literal whose magnitude is too large
/// for an `f64` is an `Error` reported at its first unit.
pub fn parse_floating_point<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<f64> {
    let mut state = parser.scoped();
    let _ = state.check_any(&[U::from_ascii(b'-'), U::from_ascii(b'+')]);

    if match_digit(&mut state).is_unmatched() {
        return ParseResult::Unmatched;
    }

    let has_fraction = {
        let mut fraction = state.scoped();
        if fraction.check(U::from_ascii(b'.')) && match_digit(&mut fraction).is_matched() {
            fraction.accept();
            true
        } else {
            false
        }
    };

    let has_exponent = {
        let mut exponent = state.scoped();
        let matched = exponent.check_any(&[U::from_ascii(b'e'), U::from_ascii(b'E')])
            && {
                let _ = exponent.check_any(&[U::from_ascii(b'-'), U::from_ascii(b'+')]);
                match_digit(&mut exponent).is_matched()
            };
        if matched {
            exponent.accept();
        }
        matched
    };

    if !has_fraction && !has_exponent {
        return ParseResult::Unmatched;
    }

    let text = U::render(state.consumed());
    let start = state.saved_offset();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            state.accept();
            ParseResult::Matched(value)
        }
        Ok(_) => {
            state.jump(start);
            log::debug!("floating point literal out of range at offset {start}");
            state.error("Floating point value out of range.").into()
        }
        Err(e) => {
            state.jump(start);
            state.error(format!("Invalid floating point value: {e}")).into()
        }
    }
}

/// Parses `true` or `false`, ASCII case-insensitive.
pub fn parse_boolean<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<bool> {
    if parser.check_ignore_ascii_case("true") {
        return ParseResult::Matched(true);
    }

    if parser.check_ignore_ascii_case("false") {
        return ParseResult::Matched(false);
    }

    ParseResult::Unmatched
}

const UUID_LEN: usize = 36;

fn is_uuid_unit<U: CodeUnit>(u: U, index: usize) -> bool {
    match index {
        8 | 13 | 18 | 23 => u.is_ascii_byte(b'-'),
        i if i < UUID_LEN => u.is_hex_digit(),
        _ => false,
    }
}

/// Parses a UUID in its canonical `8-4-4-4-12` hexadecimal form.
pub fn parse_uuid<U: CodeUnit>(parser: &mut Parser<'_, U>) -> ParseResult<Uuid> {
    let mut state = parser.scoped();

    let text = match state.match_indexed(is_uuid_unit) {
        ParseResult::Matched(run) if run.len() == UUID_LEN => U::render(run),
        _ => return ParseResult::Unmatched,
    };

    match Uuid::parse_str(&text) {
        Ok(uuid) => {
            state.accept();
            ParseResult::Matched(uuid)
        }
        Err(e) => state.error(format!("Invalid uuid: {e}")).into(),
    }
}

//! Literal scanner
//!
//! Splits text into the literal kinds the toolkit can parse and reports each with its byte
//! offset. Radix prefixes and the comment marker come from the configuration.

use rdp_config::RdpConfig;
use rdp_parser::rdp::{
    parse_binary_prefixed, parse_boolean, parse_floating_point,
    parse_hexadecimal_prefixed, parse_uuid, skip_byte_order_marker, skip_whitespace_and_newline,
    EofMode, ParseError, Parser,
};
use serde::Serialize;

use crate::ini::{check_comment, parse_integer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Uuid,
    Hexadecimal,
    Binary,
    Float,
    Integer,
    Boolean,
    Identifier,
    String,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first unit of the token
    pub offset: usize,
}

pub fn scan<'a>(
    text: &'a str,
    filename: &'a str,
    config: &'a RdpConfig,
) -> Result<Vec<Token>, ParseError> {
    let mut parser = Parser::from_text(text).with_filename(filename);
    if config.scan.skip_byte_order_marker {
        skip_byte_order_marker(&mut parser);
    }

    let mut tokens = Vec::new();
    loop {
        skip_whitespace_and_newline(&mut parser);
        if parser.eof() {
            break;
        }

        if check_comment(&mut parser, &config.scan.comment_marker) {
            continue;
        }

        let offset = parser.offset();
        let kind = match_token(&mut parser, config)?;
        tokens.push(Token {
            kind,
            text: String::from_utf8_lossy(parser.slice_from(offset)).into_owned(),
            offset,
        });
    }

    log::debug!("scanned {} tokens from {}", tokens.len(), filename);
    Ok(tokens)
}

/// Renders tokens one per line as `offset kind text`.
pub fn to_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            let kind = format!("{:?}", token.kind).to_lowercase();
            format!("{:>6} {:<12} {}\n", token.offset, kind, token.text)
        })
        .collect()
}

fn match_token(parser: &mut Parser<'_>, config: &RdpConfig) -> Result<TokenKind, ParseError> {
    if parse_uuid(parser).into_result()?.is_some() {
        return Ok(TokenKind::Uuid);
    }

    let hex_prefix = config.literals.hex_prefix.as_str();
    if !hex_prefix.is_empty()
        && parse_hexadecimal_prefixed(parser, hex_prefix)
            .into_result()?
            .is_some()
    {
        return Ok(TokenKind::Hexadecimal);
    }

    let binary_prefix = config.literals.binary_prefix.as_str();
    if !binary_prefix.is_empty()
        && parse_binary_prefixed(parser, binary_prefix)
            .into_result()?
            .is_some()
    {
        return Ok(TokenKind::Binary);
    }

    if starts_number(parser) {
        if parse_floating_point(parser).into_result()?.is_some() {
            return Ok(TokenKind::Float);
        }

        if parse_integer(parser).into_result()?.is_some() {
            return Ok(TokenKind::Integer);
        }
    }

    if check_keyword_boolean(parser) {
        return Ok(TokenKind::Boolean);
    }

    if parser.match_identifier().is_matched() {
        return Ok(TokenKind::Identifier);
    }

    if check_quoted(parser)? {
        return Ok(TokenKind::String);
    }

    match parser.peek() {
        Some(unit) if unit.is_ascii_punctuation() => {
            parser.advance();
            Ok(TokenKind::Punctuation)
        }
        _ => Err(parser.error("Unexpected character.")),
    }
}

/// A digit, or a sign directly followed by one. A lone sign scans as punctuation.
fn starts_number(parser: &Parser<'_>) -> bool {
    match parser.remaining() {
        [b'-' | b'+', next, ..] => next.is_ascii_digit(),
        [first, ..] => first.is_ascii_digit(),
        [] => false,
    }
}

fn is_identifier_continue(unit: u8) -> bool {
    unit.is_ascii_alphanumeric() || unit == b'-' || unit == b'_'
}

/// `true` or `false` as a whole word, so `trueish` stays an identifier.
fn check_keyword_boolean(parser: &mut Parser<'_>) -> bool {
    let mut state = parser.scoped();

    if parse_boolean(&mut state).is_unmatched() {
        return false;
    }

    if state.peek().is_some_and(is_identifier_continue) {
        return false;
    }

    state.accept();
    true
}

fn check_quoted(parser: &mut Parser<'_>) -> Result<bool, ParseError> {
    let mut state = parser.scoped();

    if !state.check(b'"') {
        return Ok(false);
    }

    let _ = state.match_until(b'"', EofMode::Fail);

    if !state.check(b'"') {
        return Err(state.error("Expected: '\"'"));
    }

    state.accept();
    Ok(true)
}

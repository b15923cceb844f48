//! INI reading and writing
//!
//! Accepted syntax, one construct per line:
//!
//! ```text
//! ; comment
//! [section]
//! key = value ; trailing comment
//! ```
//!
//! Keys and section names are identifiers (`[a-zA-Z_][a-zA-Z0-9\-_]*`). Values are tried in
//! order as uuid, float, integer, boolean and quoted string; uuids go first since one can start
//! with what reads as a float (`1e3a...`). Every key must belong to a section.

use std::collections::BTreeMap;
use std::fmt;

use rdp_config::ScanConfig;
use rdp_parser::rdp::{
    check_newline, parse_boolean, parse_decimal_signed, parse_floating_point, parse_uuid,
    skip_byte_order_marker, skip_until_newline, skip_whitespace, skip_whitespace_and_newline,
    parse_decimal_unsigned, EofMode, ParseError, ParseResult, Parser,
};
use serde::Serialize;
use uuid::Uuid;

/// Keys of one section, sorted by name
pub type Section = BTreeMap<String, IniValue>;

/// Sections by name
pub type IniDocument = BTreeMap<String, Section>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IniValue {
    Uuid(Uuid),
    Float(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl fmt::Display for IniValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniValue::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
            // Debug keeps the fraction on whole numbers, so they read back as floats
            IniValue::Float(value) => write!(f, "{:?}", value),
            IniValue::Integer(value) => write!(f, "{}", value),
            IniValue::Boolean(value) => write!(f, "{}", value),
            IniValue::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

/// Parses an INI document.
pub fn parse_ini<'a>(
    text: &'a str,
    filename: &'a str,
    config: &'a ScanConfig,
) -> Result<IniDocument, ParseError> {
    let mut parser = Parser::from_text(text).with_filename(filename);
    if config.skip_byte_order_marker {
        skip_byte_order_marker(&mut parser);
    }

    IniReader::new(parser, &config.comment_marker).read()
}

/// Writes a document back as INI text.
pub fn to_ini(document: &IniDocument) -> String {
    let mut out = String::new();

    for (name, section) in document {
        out.push_str(&format!("[{}]\n", name));
        for (key, value) in section {
            out.push_str(&format!("{} = {}\n", key, value));
        }
    }

    out
}

/// Consumes optional blanks, then a comment up to (not including) the line end.
pub(crate) fn check_comment(parser: &mut Parser<'_>, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }

    let mut state = parser.scoped();
    skip_whitespace(&mut state);

    if !state.check_str(marker) {
        return false;
    }

    skip_until_newline(&mut state);
    state.accept();
    true
}

/// The end of a construct: an optional comment, then a line ending or end of input.
fn check_line_end(parser: &mut Parser<'_>, marker: &str) -> bool {
    skip_whitespace(parser);
    check_comment(parser, marker);
    check_newline(parser) || parser.eof()
}

struct IniReader<'a> {
    parser: Parser<'a>,
    comment_marker: &'a str,
    sections: IniDocument,
    current: Option<String>,
}

impl<'a> IniReader<'a> {
    fn new(parser: Parser<'a>, comment_marker: &'a str) -> Self {
        IniReader {
            parser,
            comment_marker,
            sections: IniDocument::new(),
            current: None,
        }
    }

    fn read(mut self) -> Result<IniDocument, ParseError> {
        loop {
            skip_whitespace_and_newline(&mut self.parser);
            if self.parser.eof() {
                break;
            }

            if check_comment(&mut self.parser, self.comment_marker) {
                continue;
            }

            if self.match_header()? || self.match_key_value()? {
                continue;
            }

            return Err(self.parser.error("Syntax error."));
        }

        Ok(self.sections)
    }

    fn match_header(&mut self) -> Result<bool, ParseError> {
        let marker = self.comment_marker;
        let mut state = self.parser.scoped();

        if !state.check(b'[') {
            return Ok(false);
        }

        let Some(name) = state.match_identifier().matched() else {
            return Err(state.error("Expected a valid header name after '['"));
        };

        if !state.check(b']') {
            return Err(state.error("Expected: ']'"));
        }

        if !check_line_end(&mut state, marker) {
            return Err(state.error("Expected newline."));
        }

        let name = String::from_utf8_lossy(name).into_owned();
        log::trace!("section [{}]", name);
        self.sections.entry(name.clone()).or_default();
        self.current = Some(name);

        state.accept();
        Ok(true)
    }

    fn match_key_value(&mut self) -> Result<bool, ParseError> {
        let marker = self.comment_marker;
        let mut state = self.parser.scoped();

        let Some(key) = state.match_identifier().matched() else {
            return Ok(false);
        };

        let Some(section) = self
            .current
            .as_ref()
            .and_then(|name| self.sections.get_mut(name))
        else {
            let start = state.saved_offset();
            state.jump(start);
            return Err(state.error("Expected a section header before the first key."));
        };

        skip_whitespace(&mut state);
        if !state.check(b'=') {
            return Err(state.error("Expected: '='"));
        }
        skip_whitespace(&mut state);

        let value = match_value(&mut state)?;

        if !check_line_end(&mut state, marker) {
            return Err(state.error("Expected newline."));
        }

        section.insert(String::from_utf8_lossy(key).into_owned(), value);

        state.accept();
        Ok(true)
    }
}

fn match_value(parser: &mut Parser<'_>) -> Result<IniValue, ParseError> {
    if let Some(value) = parse_uuid(parser).into_result()? {
        return Ok(IniValue::Uuid(value));
    }

    if let Some(value) = parse_floating_point(parser).into_result()? {
        return Ok(IniValue::Float(value));
    }

    if let Some(value) = parse_integer(parser).into_result()? {
        return Ok(IniValue::Integer(value));
    }

    if let Some(value) = parse_boolean(parser).into_result()? {
        return Ok(IniValue::Boolean(value));
    }

    if let Some(value) = match_string(parser)? {
        return Ok(IniValue::String(value));
    }

    Err(parser.error("Unknown value type."))
}

/// A decimal `i64` with an optional sign. `+` is accepted like `-`, matching the floats.
pub(crate) fn parse_integer(parser: &mut Parser<'_>) -> ParseResult<i64> {
    let mut state = parser.scoped();

    if !state.check(b'+') {
        drop(state);
        return parse_decimal_signed(parser);
    }

    let digits_start = state.offset();
    let value = match parse_decimal_unsigned(&mut state) {
        ParseResult::Matched(value) => i64::try_from(value).ok(),
        ParseResult::Unmatched => return state.error("Expected digits after '+'.").into(),
        ParseResult::Error(_) => None,
    };

    match value {
        Some(value) => {
            state.accept();
            ParseResult::Matched(value)
        }
        None => {
            state.jump(digits_start);
            state
                .error("Decimal value out of range for a signed 64-bit integer.")
                .into()
        }
    }
}

fn match_string(parser: &mut Parser<'_>) -> Result<Option<String>, ParseError> {
    let mut state = parser.scoped();

    if !state.check(b'"') {
        return Ok(None);
    }

    let value = state
        .match_until(b'"', EofMode::Fail)
        .matched()
        .map(|text| String::from_utf8_lossy(text).into_owned())
        .unwrap_or_default();

    if !state.check(b'"') {
        return Err(state.error("Expected: '\"'"));
    }

    state.accept();
    Ok(Some(value))
}

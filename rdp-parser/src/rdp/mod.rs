//! Main module for rdp functionality

pub mod location;
pub mod matchers;
pub mod numeric;
pub mod parse_result;
pub mod parser;
pub mod pattern;
pub mod scoped_state;
pub mod unit;

pub use location::Location;
pub use matchers::{
    check_newline, check_whitespace, match_alnum, match_alpha, match_binary, match_digit,
    match_hexadecimal, match_signed_digit, skip_byte_order_marker, skip_until_newline,
    skip_whitespace, skip_whitespace_and_newline,
};
pub use numeric::{
    parse_binary, parse_binary_prefixed, parse_boolean, parse_decimal_signed,
    parse_decimal_unsigned, parse_floating_point, parse_hexadecimal, parse_hexadecimal_prefixed,
    parse_uuid,
};
pub use parse_result::{ParseError, ParseResult};
pub use parser::{bof, current, eof, filename, offset, EofMode, Parser};
pub use scoped_state::ScopedState;
pub use unit::CodeUnit;

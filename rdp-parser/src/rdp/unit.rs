//! Code units
//!
//! A parser scans a slice of code units. The unit width is picked at compile time through
//! the parser's type parameter:
//!
//! - `u8`   bytes, usually UTF-8 text scanned opaquely
//! - `u16`  UTF-16 code units
//! - `u32`  raw 32-bit units
//! - `char` decoded Unicode scalar values
//!
//! Matchers never decode: a multi-unit sequence is only ever compared unit by unit. The
//! [`CodeUnit`] trait gives the handful of conversions needed for ASCII character classes,
//! literal encoding and rendering error locations.

use std::fmt::Debug;
use std::hash::Hash;

/// An element of the input sequence.
pub trait CodeUnit: Copy + Eq + Ord + Hash + Debug + 'static {
    /// The unit for an ASCII byte.
    fn from_ascii(byte: u8) -> Self;

    /// Numeric value of the unit.
    fn to_u32(self) -> u32;

    /// Encodes text into units of this width.
    fn encode(text: &str) -> Vec<Self>;

    /// Lossily renders units as text, used for error locations.
    fn render(units: &[Self]) -> String;

    /// The unit as an ASCII byte, if it is one.
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self.to_u32()).ok().filter(u8::is_ascii)
    }

    /// Whether the unit equals the given ASCII byte.
    fn is_ascii_byte(self, byte: u8) -> bool {
        self.to_u32() == u32::from(byte)
    }

    fn is_decimal_digit(self) -> bool {
        self.to_ascii().is_some_and(|b| u8::is_ascii_digit(&b))
    }

    fn is_hex_digit(self) -> bool {
        self.to_ascii().is_some_and(|b| u8::is_ascii_hexdigit(&b))
    }

    fn is_alpha(self) -> bool {
        self.to_ascii().is_some_and(|b| u8::is_ascii_alphabetic(&b))
    }

    fn is_alnum(self) -> bool {
        self.to_ascii().is_some_and(|b| u8::is_ascii_alphanumeric(&b))
    }

    /// Value of the unit as a digit in `radix`, ASCII only.
    fn digit_value(self, radix: u32) -> Option<u32> {
        self.to_ascii().and_then(|b| char::from(b).to_digit(radix))
    }
}

impl CodeUnit for u8 {
    fn from_ascii(byte: u8) -> Self {
        byte
    }

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn encode(text: &str) -> Vec<Self> {
        text.as_bytes().to_vec()
    }

    fn render(units: &[Self]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

impl CodeUnit for u16 {
    fn from_ascii(byte: u8) -> Self {
        u16::from(byte)
    }

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn encode(text: &str) -> Vec<Self> {
        text.encode_utf16().collect()
    }

    fn render(units: &[Self]) -> String {
        String::from_utf16_lossy(units)
    }
}

impl CodeUnit for u32 {
    fn from_ascii(byte: u8) -> Self {
        u32::from(byte)
    }

    fn to_u32(self) -> u32 {
        self
    }

    fn encode(text: &str) -> Vec<Self> {
        text.chars().map(u32::from).collect()
    }

    fn render(units: &[Self]) -> String {
        units
            .iter()
            .map(|&u| char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

impl CodeUnit for char {
    fn from_ascii(byte: u8) -> Self {
        char::from(byte)
    }

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn encode(text: &str) -> Vec<Self> {
        text.chars().collect()
    }

    fn render(units: &[Self]) -> String {
        units.iter().collect()
    }
}

//! Source locations
//!
//! A [`Location`] is an owned snapshot of where a parser is: the file it was given (if any),
//! the text of the current line, and the zero-based line/column. It is what parse errors
//! carry, so it outlives the input buffer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::unit::CodeUnit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub filename: Option<String>,
    /// The current line, without its line terminator
    pub line: String,
    /// Zero-based line number
    pub line_number: usize,
    /// Zero-based column, in code units
    pub column: usize,
    /// Absolute offset, in code units
    pub offset: usize,
}

impl Location {
    /// Locates `offset` within `input`.
    ///
    /// At end of input the location refers to the last line; when the input ends with a
    /// newline that is the empty line after it.
    pub fn locate<U: CodeUnit>(input: &[U], offset: usize, filename: Option<&str>) -> Self {
        let offset = offset.min(input.len());
        let newline = U::from_ascii(b'\n');
        let carriage_return = U::from_ascii(b'\r');

        let line_begin = input[..offset]
            .iter()
            .rposition(|&u| u == newline)
            .map_or(0, |i| i + 1);

        let mut line_end = input[line_begin..]
            .iter()
            .position(|&u| u == newline)
            .map_or(input.len(), |i| line_begin + i);

        if line_end > line_begin && input[line_end - 1] == carriage_return {
            line_end -= 1;
        }

        Location {
            filename: filename.map(str::to_string),
            line: U::render(&input[line_begin..line_end]),
            line_number: input[..offset].iter().filter(|&&u| u == newline).count(),
            column: offset - line_begin,
            offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.filename.as_deref().unwrap_or("<input>"),
            self.line_number + 1,
            self.column + 1
        )
    }
}

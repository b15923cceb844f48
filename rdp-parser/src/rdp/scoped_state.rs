//! Rewind guard for multi-step matches
//!
//! ```ignore
//! let mut state = parser.scoped();
//! if !state.check(b'[') {
//!     return ParseResult::Unmatched; // rewound on drop
//! }
//! let name = state.match_with(|c| c.is_ascii_alphanumeric());
//! if !state.check(b']') {
//!     return state.error("Expected: ']'").into(); // rewound as well
//! }
//! state.accept();
//! ```

use std::ops::{Deref, DerefMut};

use super::parser::Parser;
use super::unit::CodeUnit;

/// Restores the parser's offset on drop unless [`ScopedState::accept`] was called.
#[derive(Debug)]
pub struct ScopedState<'p, 'a, U: CodeUnit> {
    parser: &'p mut Parser<'a, U>,
    saved_offset: usize,
    accepted: bool,
}

impl<'p, 'a, U: CodeUnit> ScopedState<'p, 'a, U> {
    pub fn new(parser: &'p mut Parser<'a, U>) -> Self {
        let saved_offset = parser.offset();
        ScopedState {
            parser,
            saved_offset,
            accepted: false,
        }
    }

    /// Offset the parser returns to if the state is not accepted.
    pub fn saved_offset(&self) -> usize {
        self.saved_offset
    }

    /// Everything consumed since the state was created.
    pub fn consumed(&self) -> &'a [U] {
        self.parser.slice_from(self.saved_offset)
    }

    /// Keeps everything consumed since the state was created.
    pub fn accept(mut self) {
        self.accepted = true;
    }
}

impl<'a, U: CodeUnit> Deref for ScopedState<'_, 'a, U> {
    type Target = Parser<'a, U>;

    fn deref(&self) -> &Self::Target {
        &*self.parser
    }
}

impl<U: CodeUnit> DerefMut for ScopedState<'_, '_, U> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.parser
    }
}

impl<U: CodeUnit> Drop for ScopedState<'_, '_, U> {
    fn drop(&mut self) {
        if !self.accepted {
            self.parser.jump(self.saved_offset);
        }
    }
}

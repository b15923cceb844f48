//! # rdp
//!
//! Building blocks for hand-written recursive descent parsers and tokenizers.
//!
//! File Layout
//!
//! src/rdp
//!   ├── parser         The cursor: offset, lookahead, checks, skips and run matchers
//!   ├── scoped_state   Rewind guard for multi-step matches
//!   ├── matchers       Character classes, whitespace, newlines, byte order marker
//!   ├── numeric        Literal parsers (decimal, binary, hex, float, boolean, uuid)
//!   ├── pattern        Anchored regex matching on byte input
//!   ├── parse_result   The matched / unmatched / error outcome
//!   ├── location       Line and column reporting
//!   └── unit           The code unit widths a parser can run on
//!
//! A parser never copies its input. Matched runs are sub-slices that live as long as the input,
//! and every failed match leaves the parser where it was.

pub mod rdp;

//! Source location tracking.
//!
//! Jack compilation units are small enough (and compiled one at a time) that
//! a full `SourceMap`/`FileId` indirection buys nothing; a [`Span`] is just
//! the 1-based line/column of the token or lexeme it was recorded from.

use std::fmt;

/// A single point in source text, 1-based in both line and column.
///
/// Jack diagnostics only ever need to point at where a token starts — there
/// is no multi-span labeling or snippet rendering, so unlike an AST-heavy
/// compiler we don't carry a byte range here, just the position a reader
/// would read off an editor's status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

//! Locations of tokens within their source file

use std::fmt::{Display, Formatter};

/// A trait that can provide the [Span] of something that came from source text
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A region of a source file.
///
/// Lines and columns are 1-based and refer to the original file, even after comments and
/// blank lines were stripped. The length is measured in characters.
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Span {
    line: usize,
    column: usize,
    len: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(line: usize, column: usize, len: usize) -> Self {
        Self { line, column, len }
    }

    /// Gets a zero-length span directly after this span
    pub const fn end(&self) -> Self {
        Self {
            line: self.line,
            column: self.column + self.len,
            len: 0,
        }
    }

    pub const fn line(&self) -> usize {
        self.line
    }

    pub const fn column(&self) -> usize {
        self.column
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

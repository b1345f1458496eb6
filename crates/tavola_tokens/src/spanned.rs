//! A trait that can provide the [Span] of the complete context of a node

/// A trait that can provide the [Span] of the complete context of a node
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A half-open byte range into a single source text
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Gets the byte offset of the start of this span
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Gets the byte length of this span
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets an empty span directly after this span
    pub const fn end(&self) -> Self {
        Self {
            offset: self.offset + self.len,
            len: 0,
        }
    }

    /// Joins two spans, creating a span covering both
    pub fn join(self, other: Self) -> Self {
        let offset = self.offset.min(other.offset);
        let end = (self.offset + self.len).max(other.offset + other.len);
        Self {
            offset,
            len: end - offset,
        }
    }

    /// Gets the 1-based line and column of the start of this span within `source`
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let mut line = 1usize;
        let mut col = 1usize;
        let mut offset = 0usize;
        for char in source.chars() {
            if offset >= self.offset {
                break;
            }
            if char == '\n' {
                col = 1;
                line += 1;
            } else {
                col += 1;
            }
            offset += char.len_utf8();
        }
        (line, col)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

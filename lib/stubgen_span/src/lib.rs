use std::ops::Range;

/// A byte range into the scanned header file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    pub fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    /// Moves a span measured inside a line to the file offset of that line.
    pub fn shift(self, offset: usize) -> Self {
        Self::new(self.lo + offset, self.hi + offset)
    }

    /// The smallest span covering both.
    pub fn to(self, other: Span) -> Self {
        Self::new(self.lo.min(other.lo), self.hi.max(other.hi))
    }
}

impl From<Span> for Range<usize> {
    fn from(val: Span) -> Self {
        val.lo..val.hi
    }
}

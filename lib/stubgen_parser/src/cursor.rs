use stubgen_span::Span;

/// A slice of the line together with its position in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Strips surrounding whitespace, narrowing the span to match.
    pub fn trim(self) -> Self {
        let start = self.text.len() - self.text.trim_start().len();
        let text = self.text.trim();
        let lo = self.span.lo + start;
        Self {
            text,
            span: Span::new(lo, lo + text.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Scans forward over a single trimmed line.
///
/// Every `take_*` returns `None` without moving when the delimiter is absent,
/// so callers decide what a missing delimiter means.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    line: &'a str,
    pos: usize,
    /// File offset of the first byte of `line`.
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a str, offset: usize) -> Self {
        Self {
            line,
            pos: 0,
            offset,
        }
    }

    /// Everything from the cursor to the end of the line.
    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Span from the cursor to the end of the line.
    pub fn rest_span(&self) -> Span {
        self.span(self.pos, self.line.len())
    }

    /// Span of the whole line.
    pub fn line_span(&self) -> Span {
        self.span(0, self.line.len())
    }

    /// Span of the next character, or an empty span at the end of the line.
    pub fn here(&self) -> Span {
        let hi = self
            .rest()
            .chars()
            .next()
            .map_or(self.pos, |c| self.pos + c.len_utf8());
        self.span(self.pos, hi)
    }

    fn span(&self, lo: usize, hi: usize) -> Span {
        Span::new(lo, hi).shift(self.offset)
    }

    fn take_to(&mut self, end: usize) -> Token<'a> {
        let token = Token {
            text: &self.line[self.pos..end],
            span: self.span(self.pos, end),
        };
        self.pos = end;
        token
    }

    /// Takes the text up to `delim`, leaving the cursor on it.
    pub fn take_until(&mut self, delim: char) -> Option<Token<'a>> {
        let found = self.rest().find(delim)?;
        Some(self.take_to(self.pos + found))
    }

    /// Takes the text up to the next whitespace, leaving the cursor on it.
    pub fn take_until_whitespace(&mut self) -> Option<Token<'a>> {
        let found = self.rest().find(char::is_whitespace)?;
        Some(self.take_to(self.pos + found))
    }

    /// Advances over `n` characters, stopping at the end of the line.
    pub fn skip(&mut self, n: usize) {
        let advance: usize = self.rest().chars().take(n).map(char::len_utf8).sum();
        self.pos += advance;
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consumes `prefix` if the rest of the line starts with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }
}

use core::fmt;

use super::{Line, LineMap, Location, Span};

/// Source text together with its line index.
///
/// The text is an immutable snapshot taken at construction. Only the line
/// map can change afterwards, and only through [`Buffer::start_line`] and
/// [`Buffer::finish_line`] while a streaming lexer discovers lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    name: Option<String>,
    text: String,
    lines: LineMap,
}

impl Buffer {
    /// Create a buffer, indexing every line of `text` up front.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineMap::scan(&text);
        Self {
            name: None,
            text,
            lines,
        }
    }

    /// Create a buffer with a display name, typically the path it was read
    /// from. The name only affects diagnostics.
    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(text)
        }
    }

    /// Create a buffer with an empty line map, for lexers that record lines
    /// as they encounter terminators.
    pub fn unindexed(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
            lines: LineMap::new(),
        }
    }

    /// Attach a display name to a buffer built with another constructor.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn lines(&self) -> &LineMap {
        &self.lines
    }

    /// Location one past the last byte.
    #[inline]
    pub fn end_location(&self) -> Location {
        Location::new(self.text.len())
    }

    pub fn start_line(&mut self, offset: usize) -> &mut Line {
        self.lines.start_line(offset)
    }

    #[track_caller]
    pub fn finish_line(&mut self, offset: usize, end: usize) {
        self.lines.finish_line(offset, end);
    }

    #[track_caller]
    pub fn line(&self, loc: Location) -> &Line {
        self.lines.line(loc)
    }

    #[track_caller]
    pub fn line_no(&self, loc: Location) -> usize {
        self.lines.line_no(loc)
    }

    #[track_caller]
    pub fn column_no(&self, loc: Location) -> usize {
        self.lines.column_no(loc)
    }

    /// Text of `line`, without its terminator.
    pub fn line_text(&self, line: &Line) -> &str {
        self.text.get(line.range()).unwrap_or_default()
    }

    /// Source text covered by `span`, if it lies within the buffer.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.range()?)
    }

    /// Pair `loc` with this buffer for rendering.
    #[inline]
    pub fn location(&self, loc: Location) -> BoundLocation<'_> {
        BoundLocation {
            buffer: self,
            location: loc,
        }
    }

    /// Pair `span` with this buffer for rendering.
    #[inline]
    pub fn span(&self, span: Span) -> BoundSpan<'_> {
        BoundSpan { buffer: self, span }
    }
}

/// A [`Location`] together with the buffer it points into.
#[derive(Debug, Clone, Copy)]
pub struct BoundLocation<'a> {
    buffer: &'a Buffer,
    location: Location,
}

impl<'a> BoundLocation<'a> {
    #[inline]
    pub fn buffer(&self) -> &'a Buffer {
        self.buffer
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[track_caller]
    pub fn line(&self) -> &'a Line {
        self.buffer.line(self.location)
    }

    #[track_caller]
    pub fn line_no(&self) -> usize {
        self.buffer.line_no(self.location)
    }

    #[track_caller]
    pub fn column_no(&self) -> usize {
        self.buffer.column_no(self.location)
    }

    /// Full text of the line holding the location.
    #[track_caller]
    pub fn line_text(&self) -> &'a str {
        self.buffer.line_text(self.line())
    }
}

impl fmt::Display for BoundLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.buffer.name() {
            write!(f, "{}:", name)?;
        }
        let lines = self.buffer.lines();
        match lines.get(self.location).zip(lines.column_of(self.location)) {
            Some((line, column)) => write!(f, "{}:{}", line.number(), column),
            None => write!(f, "?:?"),
        }
    }
}

/// A [`Span`] together with the buffer it points into.
#[derive(Debug, Clone, Copy)]
pub struct BoundSpan<'a> {
    buffer: &'a Buffer,
    span: Span,
}

impl<'a> BoundSpan<'a> {
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn begin(&self) -> BoundLocation<'a> {
        self.buffer.location(self.span.begin())
    }

    #[inline]
    pub fn end(&self) -> BoundLocation<'a> {
        self.buffer.location(self.span.end())
    }

    /// The literal source text of the span; empty if it lies outside the
    /// buffer.
    pub fn text(&self) -> &'a str {
        self.buffer.slice(self.span).unwrap_or_default()
    }
}

impl fmt::Display for BoundSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.begin())?;
        let (begin, end) = (self.begin(), self.end());
        match (
            self.buffer.lines().get(begin.location()),
            self.buffer.lines().get(end.location()),
        ) {
            (Some(first), Some(last)) if first.number() != last.number() => {
                write!(f, "-{}:{}", last.number(), end.column_no())
            }
            (Some(_), Some(_)) if begin.location() != end.location() => {
                write!(f, "-{}", end.column_no())
            }
            _ => Ok(()),
        }
    }
}

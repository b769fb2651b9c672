use core::ops::Range;

use crate::contract::contract_assert;
use crate::traits::SpanLike;

/// A byte offset into the text of a [`Buffer`](super::Buffer).
///
/// `Location::NONE` is the sentinel for "no location", used for synthetic
/// tokens and for diagnostics that cannot be attributed to source text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location(usize);

impl Location {
    /// The "no location" sentinel.
    pub const NONE: Self = Self(usize::MAX);

    #[inline]
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// The raw byte offset. For [`Location::NONE`] this is `usize::MAX`.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == usize::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the offset, or `None` for the sentinel.
    #[inline]
    pub const fn get(self) -> Option<usize> {
        if self.is_none() { None } else { Some(self.0) }
    }

    /// Moves the location `n` bytes forward. The sentinel stays put.
    #[inline]
    pub const fn advance(self, n: usize) -> Self {
        if self.is_none() {
            self
        } else {
            Self(self.0.saturating_add(n))
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<usize> for Location {
    fn from(offset: usize) -> Self {
        Self(offset)
    }
}

/// A half-open range of locations, `begin..end`.
///
/// Zero-width spans are valid and are produced for empty productions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    begin: Location,
    end: Location,
}

impl Span {
    /// The span with neither end known.
    pub const NONE: Self = Self {
        begin: Location::NONE,
        end: Location::NONE,
    };

    /// Creates a span. Panics if both ends are known and `begin > end`.
    #[track_caller]
    pub fn new(begin: Location, end: Location) -> Self {
        contract_assert!(
            begin.is_none() || end.is_none() || begin <= end,
            "inverted span: {} > {}",
            begin.offset(),
            end.offset()
        );
        Self { begin, end }
    }

    /// A zero-width span at `loc`.
    #[inline]
    pub const fn empty_at(loc: Location) -> Self {
        Self {
            begin: loc,
            end: loc,
        }
    }

    #[inline]
    pub const fn begin(&self) -> Location {
        self.begin
    }

    #[inline]
    pub const fn end(&self) -> Location {
        self.end
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.begin.is_none() || self.end.is_none()
    }

    /// True if `loc` falls inside `begin..end`.
    #[inline]
    pub fn contains(&self, loc: Location) -> bool {
        !self.is_none() && loc.is_some() && self.begin <= loc && loc < self.end
    }

    /// The byte range covered, or `None` if either end is unknown.
    #[inline]
    pub fn range(&self) -> Option<Range<usize>> {
        if self.is_none() {
            None
        } else {
            Some(self.begin.offset()..self.end.offset())
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Range<usize>> for Span {
    #[track_caller]
    fn from(range: Range<usize>) -> Self {
        Self::new(Location::new(range.start), Location::new(range.end))
    }
}

impl SpanLike for Span {
    #[inline]
    fn start(&self) -> usize {
        self.begin.offset()
    }

    #[inline]
    fn end(&self) -> usize {
        self.end.offset()
    }

    /// An inverted pair is clamped to the empty span at `start`, unlike
    /// [`Span::new`], which treats it as a contract violation.
    #[inline]
    fn new(start: usize, end: usize) -> Self {
        Span::new(Location::new(start), Location::new(end.max(start)))
    }

    #[inline]
    fn call_site() -> Self {
        Self::NONE
    }

    /// Unknown spans are absorbed rather than stretching the result to
    /// the sentinel offset.
    fn join(&self, other: &Self) -> Self {
        match (self.is_none(), other.is_none()) {
            (true, _) => *other,
            (_, true) => *self,
            _ => Self {
                begin: self.begin.min(other.begin),
                end: self.end.max(other.end),
            },
        }
    }
}

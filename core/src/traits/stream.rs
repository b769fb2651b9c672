use super::diagnostic::TokenKind;
use crate::source::{Location, Span};

/// A span representing a source location range.
///
/// Spans track the byte offsets of tokens and parsed nodes within source
/// text. All implementations must be `Clone` so parsers can keep them
/// around while backtracking.
pub trait SpanLike: Clone {
    /// Returns the start byte offset.
    fn start(&self) -> usize;

    /// Returns the end byte offset (exclusive).
    fn end(&self) -> usize;

    /// Creates a new span from start and end offsets.
    fn new(start: usize, end: usize) -> Self;

    /// Returns a synthetic span for generated code.
    fn call_site() -> Self;

    /// Returns the length of this span.
    ///
    /// # Clamping Behavior
    ///
    /// Uses saturating subtraction to compute `end - start`. If `end < start`
    /// (an inverted span), this returns `0` rather than panicking or wrapping.
    #[inline]
    fn len(&self) -> usize {
        self.end().saturating_sub(self.start())
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join two spans into one covering both regions.
    #[inline]
    fn join(&self, other: &Self) -> Self {
        Self::new(self.start().min(other.start()), self.end().max(other.end()))
    }
}

/// A lexed token as seen by the combinators: a kind and where it starts.
pub trait Token {
    type Kind: TokenKind;

    fn kind(&self) -> Self::Kind;

    fn location(&self) -> Location;

    /// Source extent of the token. Defaults to a zero-width span at its
    /// location for token types that do not record their length.
    #[inline]
    fn span(&self) -> Span {
        Span::empty_at(self.location())
    }
}

/// The token kind produced by stream `S`.
pub type KindOf<S> = <<S as Stream>::Token as Token>::Kind;

/// The stream capability a grammar supplies to the combinators.
///
/// A stream reports whether input is exhausted, exposes the next token for
/// inspection, consumes it, and knows where it currently is. At end of input
/// `location` should return the end-of-text location so "expected X"
/// diagnostics point past the last token.
pub trait Stream {
    type Token: Token;

    /// Peeks at the next token without consuming it.
    fn peek(&self) -> Option<&Self::Token>;

    /// Consumes and returns the next token.
    fn next(&mut self) -> Option<Self::Token>;

    /// Location of the next token, or of the end of input.
    fn location(&self) -> Location;

    #[inline]
    fn is_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Kind of the next token, if any.
    #[inline]
    fn peek_kind(&self) -> Option<KindOf<Self>> {
        self.peek().map(Token::kind)
    }

    #[inline]
    fn next_is(&self, kind: KindOf<Self>) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// True at end of input as well.
    #[inline]
    fn next_is_not(&self, kind: KindOf<Self>) -> bool {
        !self.next_is(kind)
    }

    /// True if the next token's kind lies in `first..=last`.
    #[inline]
    fn next_in_range(&self, first: KindOf<Self>, last: KindOf<Self>) -> bool
    where
        KindOf<Self>: Ord,
    {
        self.peek_kind()
            .is_some_and(|kind| first <= kind && kind <= last)
    }
}

use crate::Error;
use crate::config::ParseConfig;
use crate::source::Location;
use crate::traits::{Stream, Token};

/// A [`Stream`] over a vector of already-lexed tokens.
///
/// Most grammars lex a whole buffer up front; this cursor is the stream
/// they hand to the combinators. `end` is the location reported once the
/// tokens run out, normally [`Buffer::end_location`](crate::Buffer::end_location).
///
/// # Example
///
/// ```ignore
/// let buffer = Buffer::new("1 + 2");
/// let tokens = lex(&buffer)?;
/// let mut cursor = TokenCursor::new(tokens, buffer.end_location());
/// let expr = additive(&mut calc, &mut cursor);
/// ```
#[derive(Debug, Clone)]
pub struct TokenCursor<T> {
    tokens: Vec<T>,
    pos: usize,
    furthest: usize,
    end: Location,
    limit: usize,
    budget: usize,
}

impl<T> TokenCursor<T> {
    pub fn new(tokens: Vec<T>, end: Location) -> Self {
        Self::with_config(tokens, end, ParseConfig::DEFAULT)
    }

    /// Create a cursor that reports end of input after
    /// `config.max_tokens` tokens have been consumed.
    pub fn with_config(tokens: Vec<T>, end: Location, config: ParseConfig) -> Self {
        let limit = tokens.len().min(config.max_tokens);
        if limit < tokens.len() {
            log::debug!(
                "token budget {} truncates a stream of {} tokens",
                config.max_tokens,
                tokens.len()
            );
        }
        Self {
            tokens,
            pos: 0,
            furthest: 0,
            end,
            limit,
            budget: config.max_tokens,
        }
    }

    /// Number of tokens consumed so far.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Rewinds to a previous cursor position, clamped to the valid range.
    #[inline]
    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos.min(self.limit);
    }

    /// Number of tokens left before end of input.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// True if the token budget stopped the stream before its last token.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.limit < self.tokens.len()
    }

    /// [`Error::TokenLimitExceeded`] if the parse consumed every token the
    /// budget allows and the stream had more. A parse that failed after
    /// reaching the cut saw a false end of input, so this is the error to
    /// report instead of its diagnostic.
    pub fn limit_error(&self) -> Option<Error> {
        (self.is_truncated() && self.furthest == self.limit).then_some(Error::TokenLimitExceeded {
            consumed: self.furthest,
            limit: self.budget,
        })
    }

    /// Check that the top-level production consumed the whole stream.
    ///
    /// Fails with [`Error::StreamNotConsumed`] if tokens remain, or with
    /// [`Error::TokenLimitExceeded`] if the token budget cut the stream
    /// short.
    pub fn finish(&self) -> Result<(), Error> {
        if self.pos < self.limit {
            return Err(Error::StreamNotConsumed {
                remaining: self.remaining(),
            });
        }
        if self.is_truncated() {
            return Err(Error::TokenLimitExceeded {
                consumed: self.pos,
                limit: self.budget,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<T> {
        self.tokens
    }
}

impl<T: Token + Clone> Stream for TokenCursor<T> {
    type Token = T;

    #[inline]
    fn peek(&self) -> Option<&T> {
        if self.pos < self.limit {
            self.tokens.get(self.pos)
        } else {
            None
        }
    }

    #[inline]
    fn next(&mut self) -> Option<T> {
        let tok = self.peek().cloned()?;
        self.pos += 1;
        self.furthest = self.furthest.max(self.pos);
        Some(tok)
    }

    #[inline]
    fn location(&self) -> Location {
        self.peek().map_or(self.end, Token::location)
    }
}

//! Errors raised by frontkit itself.
//!
//! Grammar-level failures are the parser's own `Error` type, produced by its
//! hooks. This enum covers only the resource limits the toolkit enforces;
//! a parser's error type should implement `From<frontkit::Error>` so the
//! limits can be reported with `?`.

use core::fmt;

/// Core frontkit error type.
///
/// # Example
///
/// ```ignore
/// use thiserror::Error;
///
/// #[derive(Error, Debug)]
/// pub enum CalcError {
///     #[error("{location}: expected {expected}")]
///     Expected { location: String, expected: &'static str },
///
///     #[error(transparent)]
///     Limit(#[from] frontkit::Error),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Tokens remain after the top-level production matched.
    ///
    /// Returned by [`TokenCursor::finish`](crate::TokenCursor::finish).
    StreamNotConsumed {
        /// Number of tokens left in the stream.
        remaining: usize,
    },

    /// An enclosure nested deeper than
    /// [`ParseConfig::max_recursion_depth`](crate::ParseConfig::max_recursion_depth).
    RecursionLimitExceeded {
        /// Depth the rejected enclosure would have reached.
        depth: usize,
        limit: usize,
    },

    /// The token budget ran out before the input did.
    TokenLimitExceeded {
        /// Number of tokens consumed when the budget ran out.
        consumed: usize,
        limit: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StreamNotConsumed { remaining } => {
                write!(
                    f,
                    "stream not fully consumed: {} tokens remaining",
                    remaining
                )
            }
            Error::RecursionLimitExceeded { depth, limit } => {
                write!(
                    f,
                    "recursion limit exceeded: depth {} > limit {}",
                    depth, limit
                )
            }
            Error::TokenLimitExceeded { consumed, limit } => {
                write!(
                    f,
                    "token limit exceeded: stopped after {} of at most {} tokens",
                    consumed, limit
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

//! Resource limits for grammar-driven parsing.
//!
//! [`ParseConfig`] carries the limits; [`RecursionGuard`] is the counter a
//! [`Parser`](crate::Parser) bumps from its `enter_nested` hook, which
//! [`parse_enclosed`](crate::parse_enclosed) calls around every enclosed
//! production.
//!
//! # Example
//!
//! ```ignore
//! use frontkit_core::config::ParseConfig;
//!
//! // Nesting depth 128, unbounded token count.
//! let config = ParseConfig::default();
//!
//! let config = ParseConfig::new()
//!     .with_max_recursion_depth(256)
//!     .with_max_tokens(1 << 20);
//! ```

use crate::Error;

/// Limits applied while parsing one buffer.
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_recursion_depth` | 128 |
/// | `max_tokens` | `usize::MAX` |
///
/// With the `serde` feature the struct deserializes from a table in which
/// every field is optional, so a front end can read it from its own
/// configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseConfig {
    /// Maximum number of simultaneously open enclosures.
    ///
    /// Exceeding it fails with [`Error::RecursionLimitExceeded`].
    pub max_recursion_depth: usize,

    /// Maximum number of tokens a [`TokenCursor`](crate::TokenCursor) hands
    /// out before it reports end of input.
    pub max_tokens: usize,
}

impl Default for ParseConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseConfig {
    /// `ParseConfig::default()`, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_recursion_depth: 128,
        max_tokens: usize::MAX,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    #[inline]
    pub const fn with_max_tokens(mut self, count: usize) -> Self {
        self.max_tokens = count;
        self
    }

    /// Only for trusted input: deep nesting will overflow the stack.
    #[inline]
    pub const fn disable_recursion_limit(self) -> Self {
        self.with_max_recursion_depth(usize::MAX)
    }
}

/// Nesting depth counter for a parser.
///
/// ```ignore
/// impl Parser<Cursor> for Calc {
///     fn enter_nested(&mut self) -> Result<(), CalcError> {
///         Ok(self.depth.enter(self.config.max_recursion_depth)?)
///     }
///
///     fn exit_nested(&mut self) {
///         self.depth.exit();
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    /// Creates a new guard with depth 0.
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Current recursion depth.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested context.
    ///
    /// Fails with [`Error::RecursionLimitExceeded`] if the new depth would
    /// exceed `limit`; the depth is left unchanged in that case, so the
    /// caller must not pair a failed `enter` with an `exit`.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> Result<(), Error> {
        let depth = self.depth.saturating_add(1);
        if depth > limit {
            log::debug!("nesting depth {} exceeds limit {}", depth, limit);
            return Err(Error::RecursionLimitExceeded { depth, limit });
        }
        self.depth = depth;
        Ok(())
    }

    /// Leave a nested context. Extra calls saturate at zero.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Reset depth to zero before reusing a parser on a new buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

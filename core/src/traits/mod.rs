//! Capability traits for the frontkit combinators.
//!
//! A grammar plugs into the combinators by implementing two contracts:
//! a [`Stream`] of [`Token`]s and a [`Parser`] of semantic actions.
//! Productions are [`Rule`]s, usually built from plain functions with
//! [`rule`].
//!
//! # Trait Hierarchy
//!
//! ```text
//! Stream (token source)
//!     └── Token (kind + location)
//!             └── TokenKind (spelling for diagnostics)
//!                     └── Punctuation (comma and bracket kinds)
//!
//! Parser<S> (semantic actions, diagnostics)
//!     └── Rule<P, S> (production with a stable id)
//!
//! Peek<K> (operator sets)
//! SpanLike (position ranges)
//! ```
//!
//! # Usage Patterns
//!
//! ```ignore
//! use frontkit::{Outcome, Parser, Stream, parse_left_infix, rule};
//!
//! fn additive(p: &mut Calc, s: &mut Cursor) -> Outcome<Expr, CalcError> {
//!     parse_left_infix(p, s, &[Tok::Plus, Tok::Minus], rule(Rule::Term, term))
//! }
//! ```

mod diagnostic;
mod parser;
mod peek;
mod rule;
mod stream;

pub use diagnostic::{Punctuation, TokenKind};
pub use parser::Parser;
pub use peek::Peek;
pub use rule::{NamedRule, Rule, rule};
pub use stream::{KindOf, SpanLike, Stream, Token};

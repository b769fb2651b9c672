//! Building blocks for language front ends.
//!
//! - [`source`]: locations, spans, line maps and source buffers;
//! - [`input`]: the buffer currently being processed, with scope guards;
//! - [`symbol`]: string interning with per-symbol binding stacks;
//! - [`parsing`]: a recursive-descent combinator protocol whose rules
//!   return a three-way [`Outcome`].
//!
//! Most users depend on the `frontkit` facade, which re-exports this crate
//! together with the derive macros.

mod contract;

pub mod config;
mod error;
pub mod input;
pub mod parsing;
pub mod source;
pub mod symbol;
pub mod traits;

pub use config::{ParseConfig, RecursionGuard};
pub use error::Error;
pub use input::{AmbientGuard, InputContext, InputGuard};
pub use parsing::{
    Grammar, GrammarRule, Outcome, RuleId, TokenCursor, UNNAMED_RULE, expect_token, match_any,
    match_if, match_token, parse_brace_enclosed, parse_bracket_enclosed, parse_enclosed,
    parse_expected, parse_left_infix, parse_list, parse_paren_enclosed, parse_prefix,
    parse_sequence, require_token,
};
pub use source::{BoundLocation, BoundSpan, Buffer, Line, LineMap, Location, Span};
pub use symbol::{BindingGuard, Symbol, SymbolDescriptor, SymbolId, SymbolKind, SymbolTable};
pub use traits::{
    KindOf, NamedRule, Parser, Peek, Punctuation, Rule, SpanLike, Stream, Token, TokenKind, rule,
};

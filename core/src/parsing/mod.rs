//! The recursive-descent protocol: the three-way [`Outcome`], token
//! primitives, generic combinators and the rule-name registry.
//!
//! A grammar is written as plain functions of the shape
//! `fn(&mut P, &mut S) -> Outcome<P::Output, P::Error>` and composed with
//! the combinators here. `P` implements [`Parser`](crate::Parser): it turns
//! matched fragments into AST values and reports diagnostics. `S`
//! implements [`Stream`](crate::Stream) over the lexer's tokens.
//!
//! ```ignore
//! fn additive(p: &mut Calc, s: &mut Cursor) -> Outcome<Expr, CalcError> {
//!     parse_left_infix(p, s, &[Kind::Plus, Kind::Minus], rule(Rule::Term, term))
//! }
//!
//! fn primary(p: &mut Calc, s: &mut Cursor) -> Outcome<Expr, CalcError> {
//!     parse_paren_enclosed(p, s, rule(Rule::Expr, additive))
//!         .or_else(|| literal(p, s))
//! }
//! ```

mod combinators;
mod cursor;
mod grammar;
mod outcome;
mod tokens;

#[cfg(test)]
pub(crate) mod testing;

pub use combinators::{
    parse_brace_enclosed, parse_bracket_enclosed, parse_enclosed, parse_expected,
    parse_left_infix, parse_list, parse_paren_enclosed, parse_prefix, parse_sequence,
};
pub use cursor::TokenCursor;
pub use grammar::{Grammar, GrammarRule, RuleId, UNNAMED_RULE};
pub use outcome::Outcome;
pub use tokens::{expect_token, match_any, match_if, match_token, require_token};
